//! Greedy batch merging of clusters
//!
//! The scheduler keeps a batch of at most `batch_size + 1` clusters, scores
//! every pair of clusters in the batch, and merges the best pair. The batch
//! is then refilled with the next most frequent word.

pub mod hierarchy;
pub mod random;
pub mod store;

use std::collections::VecDeque;
use std::fs::File;
use std::path::Path;

use derivative::Derivative;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::base::{BoxResult, ClusterId, ClusterPair, Count, DocId, Len, MergeIndex};
use crate::builder::{index_documents, try_index_documents};
use crate::error::{ClusterError, ClusterResult};
use crate::index::CorpusIndex;
use crate::output::Clustering;
use crate::scoring::{compute_scores, ScoreTable};
use crate::vocabulary::{select_vocabulary, Vocabulary};

use hierarchy::{Hierarchy, MergeRecord};
use random::{RandomSource, SeededRandom, DEFAULT_SEED};
use store::ClusterStore;

const DEFAULT_PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

fn pb_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(DEFAULT_PROGRESS_TEMPLATE)
        .progress_chars("=> ")
}

#[derive(Derivative, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[derivative(Default)]
#[serde(default)]
pub struct ClusteringOptions {
    /// Number of clusters merged at one time
    /// (runtime is quadratic in this value)
    #[derivative(Default(value = "1000"))]
    pub batch_size: usize,

    /// Maximum number of words in the vocabulary (a smaller or larger
    /// number is used if there are ties at the specified level)
    pub max_vocab_size: Option<usize>,

    /// Seed of the random source used to break ties and assign bits
    #[derivative(Default(value = "DEFAULT_SEED"))]
    pub seed: u64,

    /// Show a progress bar while merging
    pub progress: bool,

    /// Fails with an empty corpus instead of returning empty clusters
    pub require_documents: bool,
}

impl ClusteringOptions {
    pub fn validate(&self) -> ClusterResult<()> {
        if self.batch_size == 0 {
            return Err(ClusterError::InvalidOption(
                "batch_size should be strictly positive".to_string(),
            ));
        }
        if self.max_vocab_size == Some(0) {
            return Err(ClusterError::InvalidOption(
                "max_vocab_size should be strictly positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads options from a JSON file (missing fields take default values)
    pub fn from_json_file(path: &Path) -> BoxResult<Self> {
        let file = File::open(path)?;
        let options: Self = serde_json::from_reader(file)?;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Initializing,
    Merging,
    Done,
}

/// Greedy merge scheduler
pub struct MergeScheduler<R: RandomSource> {
    words: Vec<String>,
    frequencies: Vec<Count>,
    num_documents: DocId,

    store: ClusterStore,
    hierarchy: Hierarchy,

    /// Clusters that can be merged in the next round
    batch: Vec<ClusterId>,

    /// Words (by rank) not yet in the batch
    backlog: VecDeque<usize>,

    /// Scores of all the pairs in the batch
    scores: ScoreTable,

    merge_counter: MergeIndex,
    batch_size: usize,
    state: SchedulerState,
    rng: R,
}

impl<R: RandomSource> MergeScheduler<R> {
    /// Creates the scheduler and scores the initial batch
    pub fn new(vocabulary: Vocabulary, batch_size: usize, rng: R) -> ClusterResult<Self> {
        if batch_size == 0 {
            return Err(ClusterError::InvalidOption(
                "batch_size should be strictly positive".to_string(),
            ));
        }

        let (words, frequencies, postings, num_documents) = vocabulary.into_parts();
        let store = ClusterStore::new(postings, &frequencies);

        let mut scheduler = Self {
            backlog: (0..words.len()).collect(),
            words,
            frequencies,
            num_documents,
            store,
            hierarchy: Hierarchy::new(),
            batch: Vec::new(),
            scores: ScoreTable::new(),
            merge_counter: 0,
            batch_size,
            state: SchedulerState::Initializing,
            rng,
        };
        scheduler.initialize()?;
        Ok(scheduler)
    }

    fn initialize(&mut self) -> ClusterResult<()> {
        let initial = self.backlog.len().min(self.batch_size + 1);
        self.batch = self
            .backlog
            .drain(..initial)
            .map(ClusterId::Word)
            .collect();

        let mut pairs = Vec::with_capacity(self.batch.len() * self.batch.len() / 2);
        for (ix, c1) in self.batch.iter().enumerate() {
            for c2 in self.batch[ix + 1..].iter() {
                pairs.push(ClusterPair::new(*c1, *c2));
            }
        }
        self.scores.extend(compute_scores(&self.store, &pairs)?);
        debug!(
            "Initial batch of {} clusters ({} scored pairs)",
            self.batch.len(),
            self.scores.len()
        );

        self.state = if self.batch.len() > 1 {
            SchedulerState::Merging
        } else {
            SchedulerState::Done
        };
        Ok(())
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn batch(&self) -> &[ClusterId] {
        &self.batch
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Number of clusters still to be merged (batch and backlog)
    pub fn population(&self) -> usize {
        self.batch.len() + self.backlog.len()
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn store(&self) -> &ClusterStore {
        &self.store
    }

    /// Name of a cluster (the word itself or the merged cluster ID)
    pub fn cluster_name(&self, cluster: ClusterId) -> String {
        match cluster {
            ClusterId::Word(ix) => self.words[ix].clone(),
            ClusterId::Merged(ix) => ix.to_string(),
        }
    }

    /// Performs one merge, or returns None if the batch cannot be reduced
    pub fn step(&mut self) -> ClusterResult<Option<&MergeRecord>> {
        if self.state != SchedulerState::Merging {
            return Ok(None);
        }

        let (pair, score) = self
            .scores
            .best(&mut self.rng)
            .ok_or(ClusterError::MissingScores {
                batch_size: self.batch.len(),
            })?;
        let (c1, c2) = (pair.first(), pair.second());

        self.merge(c1, c2, score)?;
        self.update_batch(c1, c2)?;

        debug!(
            "{} AND {} WERE MERGED INTO {}. {} REMAIN.",
            self.cluster_name(c1),
            self.cluster_name(c2),
            self.merge_counter,
            self.population() - 1
        );

        self.merge_counter += 1;
        if self.batch.len() <= 1 {
            self.state = SchedulerState::Done;
        }
        Ok(self.hierarchy.merges().last())
    }

    /// Merges two clusters into a new one
    fn merge(&mut self, c1: ClusterId, c2: ClusterId, score: f64) -> ClusterResult<()> {
        // Checks both clusters before modifying anything
        self.store.get(c1)?;
        self.store.get(c2)?;

        let left = self.store.take(c1)?;
        let right = self.store.take(c2)?;
        let merged = left.merge(right);
        let frequency = merged.frequency;

        let id = self.store.push_merged(merged);
        assert!(
            id == self.merge_counter,
            "Merged cluster {} does not match the merge counter {}",
            id,
            self.merge_counter
        );

        self.hierarchy.add(MergeRecord {
            id,
            left: c1,
            right: c2,
            left_bit: self.rng.next_bit(),
            frequency,
            score,
        });
        Ok(())
    }

    /// Replaces the merged clusters by the new one, and adds the next word
    fn update_batch(&mut self, c1: ClusterId, c2: ClusterId) -> ClusterResult<()> {
        self.batch.retain(|c| *c != c1 && *c != c2);
        self.scores.remove_cluster(c1, &self.batch);
        self.scores.remove_cluster(c2, &self.batch);
        self.scores.remove_cluster(c1, &[c2]);

        let mut new_items = vec![ClusterId::Merged(self.merge_counter)];
        if let Some(word) = self.backlog.pop_front() {
            new_items.push(ClusterId::Word(word));
        }

        // Score before adding the new items to the batch (avoids duplicates)
        let mut pairs = Vec::with_capacity(new_items.len() * (self.batch.len() + 1));
        for (ix, new_item) in new_items.iter().enumerate() {
            for c in self.batch.iter().chain(new_items[ix + 1..].iter()) {
                pairs.push(ClusterPair::new(*new_item, *c));
            }
        }
        self.scores.extend(compute_scores(&self.store, &pairs)?);

        self.batch.extend(new_items);
        Ok(())
    }

    /// Merges until the batch cannot be reduced anymore
    pub fn run(mut self, progress: bool) -> ClusterResult<Clustering> {
        let total_merges = self.population().saturating_sub(1);
        let progress = if progress {
            let pb = ProgressBar::new(total_merges as u64);
            pb.set_style(pb_style());
            pb
        } else {
            ProgressBar::hidden()
        };

        while self.step()?.is_some() {
            progress.inc(1);
        }
        progress.finish();

        info!("{} merges performed", self.hierarchy.len());
        Ok(self.into_clustering())
    }

    /// Returns the result (merges still to do are ignored)
    pub fn into_clustering(self) -> Clustering {
        Clustering::new(
            self.words,
            self.frequencies,
            self.hierarchy,
            self.num_documents,
        )
    }
}

/// Clusters the words of an index
pub fn cluster_index(index: CorpusIndex, options: &ClusteringOptions) -> ClusterResult<Clustering> {
    options.validate()?;

    if let Err(e) = index.num_documents() {
        if options.require_documents {
            return Err(e);
        }
        warn!("{}: no cluster will be created", e);
    }

    let vocabulary = select_vocabulary(index, options.max_vocab_size);
    let scheduler = MergeScheduler::new(
        vocabulary,
        options.batch_size,
        SeededRandom::new(options.seed),
    )?;
    scheduler.run(options.progress)
}

/// Indexes documents and clusters their words
pub fn cluster_documents<D, I, T>(
    documents: D,
    options: &ClusteringOptions,
) -> ClusterResult<Clustering>
where
    D: IntoIterator<Item = I>,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    options.validate()?;
    cluster_index(index_documents(documents), options)
}

/// Same as [cluster_documents] for document sources that can fail
pub fn try_cluster_documents<D, I, T, E>(
    documents: D,
    options: &ClusteringOptions,
) -> BoxResult<Clustering>
where
    D: IntoIterator<Item = Result<I, E>>,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
    E: std::error::Error + 'static,
{
    options.validate()?;
    let index = try_index_documents(documents)?;
    Ok(cluster_index(index, options)?)
}
