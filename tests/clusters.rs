use std::collections::HashMap;
use std::fs;
use std::io::Write;

use helpers::corpus::{check_binary_tree, TestCorpus};
use log::info;
use ntest::timeout;
use pmi_cluster::{
    base::{ClusterId, Len},
    builder::index_documents,
    cluster_documents, cluster_index,
    documents::LineDocuments,
    try_cluster_documents, Clustering, ClusteringOptions,
};
use rstest::rstest;
use temp_dir::TempDir;

/// Initialize the logger
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn options(batch_size: usize, max_vocab_size: Option<usize>, seed: u64) -> ClusteringOptions {
    ClusteringOptions {
        batch_size,
        max_vocab_size,
        seed,
        ..ClusteringOptions::default()
    }
}

fn to_tsv(clustering: &Clustering) -> String {
    let mut output = Vec::new();
    clustering
        .write_tsv(&mut output)
        .expect("writing in memory should not fail");
    String::from_utf8(output).expect("output should be UTF-8")
}

#[rstest]
#[case(50, 200, 5., 20, 10, None)]
#[case(50, 200, 5., 20, 1000, None)]
#[case(200, 500, 8., 30, 20, Some(100))]
#[case(30, 50, 3., 5, 1, Some(10))]
fn test_clusters(
    #[case] vocabulary_size: usize,
    #[case] document_count: usize,
    #[case] lambda_words: f32,
    #[case] max_words: usize,
    #[case] batch_size: usize,
    #[case] max_vocab_size: Option<usize>,
) {
    init_logger();
    let corpus = TestCorpus::new(
        vocabulary_size,
        document_count,
        lambda_words,
        max_words,
        Some(42),
    );
    let clustering = cluster_documents(
        corpus.documents_as_str(),
        &options(batch_size, max_vocab_size, 1234567890),
    )
    .expect("clustering should succeed");
    info!(
        "{} words, {} merges",
        clustering.len(),
        clustering.num_merges()
    );

    assert_eq!(clustering.num_documents(), document_count as u64);
    if max_vocab_size.is_none() {
        assert_eq!(clustering.len(), corpus.frequencies.len());
    }
    if clustering.len() > 0 {
        assert_eq!(clustering.num_merges(), clustering.len() - 1);
    }

    // Frequencies are the corpus ones, in decreasing order
    let mut previous = u64::MAX;
    for record in clustering.records() {
        assert_eq!(Some(&record.frequency), corpus.frequencies.get(record.word));
        assert!(record.frequency <= previous);
        previous = record.frequency;
    }

    check_binary_tree(&clustering);

    // Code length is the number of merges above the word
    let hierarchy = clustering.hierarchy();
    for (ix, record) in clustering.records().enumerate() {
        assert_eq!(record.code.len(), hierarchy.depth(ClusterId::Word(ix)));
    }

    // Merged frequencies are the sum of the children ones
    let frequency = |c: ClusterId| match c {
        ClusterId::Word(ix) => clustering
            .frequency(&clustering.words()[ix])
            .expect("word in vocabulary"),
        ClusterId::Merged(ix) => hierarchy.merge(ix).expect("merged cluster").frequency,
    };
    for merge in hierarchy.merges() {
        for child in [merge.left, merge.right] {
            if let ClusterId::Merged(ix) = child {
                assert!(ix < merge.id, "Child {} created after {}", ix, merge.id);
            }
        }
        assert_eq!(merge.frequency, frequency(merge.left) + frequency(merge.right));
    }
}

#[rstest]
#[case(5)]
#[case(1000)]
fn test_deterministic(#[case] batch_size: usize) {
    let corpus = TestCorpus::new(80, 300, 6., 20, Some(7));
    let options = options(batch_size, None, 99);

    let first = cluster_documents(corpus.documents_as_str(), &options).expect("first run");
    let second = cluster_documents(corpus.documents_as_str(), &options).expect("second run");
    assert_eq!(to_tsv(&first), to_tsv(&second));
}

#[test]
fn test_pair_statistics() {
    let corpus = TestCorpus::new(20, 40, 4., 10, Some(5));
    let index = index_documents(corpus.documents_as_str());

    let words: Vec<&String> = corpus.frequencies.keys().collect();
    for a in words.iter() {
        let a_ix = index.word_index(a).expect("word is indexed");
        assert_eq!(index.frequency(a_ix), corpus.frequencies[*a]);
        for b in words.iter() {
            let b_ix = index.word_index(b).expect("word is indexed");
            assert_eq!(
                pmi_cluster::scoring::cooccurrences(index.counts(a_ix), index.counts(b_ix)),
                corpus.cooccurrences(a, b),
                "Co-occurrences differ for {} and {}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_documented_scenario() {
    let clustering = cluster_documents(
        vec![vec!["dog", "cat"], vec!["cat", "bird"], vec!["dog", "bird"]],
        &options(10, None, 1234567890),
    )
    .expect("clustering should succeed");

    let tsv = to_tsv(&clustering);
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 3);

    let mut lengths = Vec::new();
    for (line, word) in lines.iter().zip(["dog", "cat", "bird"]) {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], word);
        assert!(fields[1].chars().all(|c| c == '0' || c == '1'));
        assert_eq!(fields[2], "2");
        lengths.push(fields[1].len());
    }
    lengths.sort();
    assert_eq!(lengths, vec![1, 2, 2]);
}

#[test]
#[timeout(60000)]
fn test_files() {
    init_logger();
    let dir = TempDir::new().expect("Could not create temporary directory");
    let corpus = TestCorpus::new(100, 400, 6., 20, Some(3));

    let input_path = dir.path().join("corpus.txt");
    {
        let mut file = fs::File::create(&input_path).expect("Could not create the corpus file");
        for document in corpus.documents.iter() {
            writeln!(file, "{}", document.join(" ")).expect("Could not write the corpus");
        }
    }

    let options_path = dir.path().join("options.json");
    fs::write(&options_path, r#"{"batch_size": 25, "seed": 17}"#)
        .expect("Could not write the options");
    let options =
        ClusteringOptions::from_json_file(&options_path).expect("Could not read the options");
    assert_eq!(options.batch_size, 25);
    assert_eq!(options.seed, 17);

    let documents = LineDocuments::open(&input_path).expect("Could not open the corpus");
    let clustering = try_cluster_documents(documents, &options).expect("clustering failed");

    let output_path = dir.path().join("clusters.tsv");
    clustering.save(&output_path).expect("Could not save");

    let saved = fs::read_to_string(&output_path).expect("Could not read the output");
    assert_eq!(saved, to_tsv(&clustering));

    let mut codes = HashMap::new();
    for line in saved.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        codes.insert(fields[0].to_string(), fields[1].to_string());
    }
    assert_eq!(codes.len(), corpus.frequencies.len());

    // Same result when clustering in memory
    let in_memory = cluster_index(index_documents(corpus.documents_as_str()), &options)
        .expect("clustering failed");
    assert_eq!(to_tsv(&in_memory), saved);
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let error = LineDocuments::open(&dir.path().join("missing.txt"))
        .err()
        .expect("the file does not exist");
    assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
}
