use std::collections::{HashMap, HashSet};

use rand::{rngs::StdRng, SeedableRng};

use crate::documents::create_document;
use pmi_cluster::Clustering;

/// A random corpus with brute-force statistics
pub struct TestCorpus {
    pub vocabulary_size: usize,
    pub documents: Vec<Vec<String>>,
    pub frequencies: HashMap<String, u64>,
}

impl TestCorpus {
    pub fn new(
        vocabulary_size: usize,
        document_count: usize,
        lambda_words: f32,
        max_words: usize,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let mut frequencies = HashMap::<String, u64>::new();
        let mut documents = Vec::new();
        for _ in 0..document_count {
            let document = create_document(lambda_words, max_words, vocabulary_size, &mut rng);
            for word in document.iter() {
                *frequencies.entry(word.clone()).or_insert(0) += 1;
            }
            documents.push(document);
        }

        Self {
            vocabulary_size,
            documents,
            frequencies,
        }
    }

    /// Number of (token of a, token of b) pairs in the same document
    pub fn cooccurrences(&self, a: &str, b: &str) -> u64 {
        self.documents
            .iter()
            .map(|doc| {
                let count_a = doc.iter().filter(|w| *w == a).count() as u64;
                let count_b = doc.iter().filter(|w| *w == b).count() as u64;
                count_a * count_b
            })
            .sum()
    }

    pub fn documents_as_str(&self) -> Vec<Vec<&str>> {
        self.documents
            .iter()
            .map(|doc| doc.iter().map(String::as_str).collect())
            .collect()
    }
}

/// Checks that the codes describe the leaves of a single binary tree
pub fn check_binary_tree(clustering: &Clustering) {
    let codes: Vec<String> = clustering.records().map(|r| r.code).collect();
    let unique: HashSet<&String> = codes.iter().collect();
    assert!(
        unique.len() == codes.len(),
        "Two words share the same bitstring"
    );

    for (i, a) in codes.iter().enumerate() {
        assert!(
            codes.len() == 1 || !a.is_empty(),
            "Only a single word can have an empty code"
        );
        for (j, b) in codes.iter().enumerate() {
            assert!(
                i == j || !b.starts_with(a.as_str()),
                "Code {} is a prefix of {}",
                a,
                b
            );
        }
    }
}
