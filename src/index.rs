//! Main data structure used to describe an indexed corpus

use std::fmt;

use rustc_hash::FxHashMap;

use crate::base::{Count, DocId, DocumentCounts, Len, WordIndex};
use crate::error::{ClusterError, ClusterResult};

/// Word/document counts for a whole corpus
///
/// Words are indexed in order of discovery.
pub struct CorpusIndex {
    words: Vec<String>,
    word_ids: FxHashMap<String, WordIndex>,
    postings: Vec<DocumentCounts>,
    frequencies: Vec<Count>,
    num_documents: DocId,
}

impl CorpusIndex {
    pub(crate) fn new(
        words: Vec<String>,
        postings: Vec<DocumentCounts>,
        frequencies: Vec<Count>,
        num_documents: DocId,
    ) -> Self {
        assert!(
            words.len() == postings.len() && words.len() == frequencies.len(),
            "Words, postings and frequencies should have the same length"
        );
        let word_ids = words
            .iter()
            .enumerate()
            .map(|(ix, w)| (w.clone(), ix))
            .collect();
        Self {
            words,
            word_ids,
            postings,
            frequencies,
            num_documents,
        }
    }

    /// Number of documents, fails if the corpus is empty
    pub fn num_documents(&self) -> ClusterResult<DocId> {
        if self.num_documents == 0 {
            Err(ClusterError::EmptyCorpus)
        } else {
            Ok(self.num_documents)
        }
    }

    pub fn is_empty_corpus(&self) -> bool {
        self.num_documents == 0
    }

    pub fn word(&self, ix: WordIndex) -> &str {
        &self.words[ix]
    }

    pub fn word_index(&self, word: &str) -> Option<WordIndex> {
        self.word_ids.get(word).copied()
    }

    pub fn frequency(&self, ix: WordIndex) -> Count {
        self.frequencies[ix]
    }

    pub fn frequencies(&self) -> &[Count] {
        &self.frequencies
    }

    /// Document counts for a word
    pub fn counts(&self, ix: WordIndex) -> &DocumentCounts {
        &self.postings[ix]
    }

    /// Consumes the index
    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<DocumentCounts>, Vec<Count>, DocId) {
        (
            self.words,
            self.postings,
            self.frequencies,
            self.num_documents,
        )
    }
}

impl Len for CorpusIndex {
    fn len(&self) -> usize {
        self.words.len()
    }
}

impl fmt::Display for CorpusIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "(documents: {}, words: {})",
            self.num_documents,
            self.words.len()
        )
    }
}
