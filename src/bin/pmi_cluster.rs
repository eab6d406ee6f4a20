//! Creates hierarchical word clusters from a corpus
//!
//! Usage: pmi-cluster <input> <output> [--max-vocab-size N] [--batch-size N]

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::info;
use simple_error::bail;

use pmi_cluster::base::BoxResult;
use pmi_cluster::documents::LineDocuments;
use pmi_cluster::{try_cluster_documents, ClusteringOptions};

#[derive(Parser, Debug)]
#[command(
    name = "pmi-cluster",
    version,
    about = "Create hierarchical word clusters from a corpus, following Brown et al. (1992)"
)]
struct Cli {
    /// Input file, one document per line, with whitespace-separated tokens
    input_path: PathBuf,

    /// Output path (word, bitstring and frequency, tab-separated)
    output_path: PathBuf,

    /// Maximum number of words in the vocabulary (a smaller number will be
    /// used if there are ties at the specified level)
    #[arg(long)]
    max_vocab_size: Option<usize>,

    /// Number of clusters to merge at one time (runtime is quadratic in
    /// this value)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Seed for the random tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with clustering options (overridden by the command line)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long, action = ArgAction::SetTrue)]
    progress: bool,
}

fn main() -> BoxResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => ClusteringOptions::from_json_file(path)?,
        None => ClusteringOptions::default(),
    };
    if let Some(v) = cli.max_vocab_size {
        options.max_vocab_size = Some(v);
    }
    if let Some(v) = cli.batch_size {
        options.batch_size = v;
    }
    if let Some(v) = cli.seed {
        options.seed = v;
    }
    options.progress |= cli.progress;

    if !cli.input_path.is_file() {
        bail!("input file {} does not exist", cli.input_path.display());
    }

    let documents = LineDocuments::open(&cli.input_path)?;
    let clustering = try_cluster_documents(documents, &options)?;

    clustering.save(&cli.output_path)?;
    info!(
        "{} words written to {}",
        clustering.words().len(),
        cli.output_path.display()
    );
    Ok(())
}
