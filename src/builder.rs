//! First phase: indexing documents
//!
//! The indexer consumes a stream of documents (sequences of tokens) and
//! records, for each word, in which documents it appears and how many times.

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::base::{Count, DocId, DocumentCounts, WordIndex};
use crate::index::CorpusIndex;

/// The indexer consumes documents and
/// builds the word/document counts
#[derive(Default)]
pub struct DocumentIndexer {
    /// Word -> index (in order of discovery)
    word_ids: FxHashMap<String, WordIndex>,

    /// Index -> word
    words: Vec<String>,

    /// Index -> document counts
    postings: Vec<DocumentCounts>,

    /// Index -> total number of occurrences
    frequencies: Vec<Count>,

    /// Number of documents seen so far (= next document ID)
    num_documents: DocId,
}

impl DocumentIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document and returns its ID
    ///
    /// Documents are numbered from 0 in the order they are added; an empty
    /// document still gets an ID.
    pub fn add<I, T>(&mut self, tokens: I) -> DocId
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let doc_id = self.num_documents;
        for token in tokens {
            let word_ix = self.word_index(token.as_ref());
            *self.postings[word_ix].entry(doc_id).or_insert(0) += 1;
            self.frequencies[word_ix] += 1;
        }

        self.num_documents += 1;
        if self.num_documents % 100_000 == 0 {
            debug!(
                "{} documents indexed ({} distinct words)",
                self.num_documents,
                self.words.len()
            );
        }
        doc_id
    }

    /// Returns the index of a word, adding it if needed
    fn word_index(&mut self, word: &str) -> WordIndex {
        if let Some(ix) = self.word_ids.get(word) {
            return *ix;
        }

        let ix = self.words.len();
        self.word_ids.insert(word.to_string(), ix);
        self.words.push(word.to_string());
        self.postings.push(DocumentCounts::default());
        self.frequencies.push(0);
        ix
    }

    pub fn num_documents(&self) -> DocId {
        self.num_documents
    }

    /// Closes the indexer
    pub fn build(self) -> CorpusIndex {
        info!("{} documents were indexed.", self.num_documents);
        CorpusIndex::new(
            self.words,
            self.postings,
            self.frequencies,
            self.num_documents,
        )
    }
}

/// Indexes a full stream of documents
pub fn index_documents<D, I, T>(documents: D) -> CorpusIndex
where
    D: IntoIterator<Item = I>,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut indexer = DocumentIndexer::new();
    for document in documents {
        indexer.add(document);
    }
    indexer.build()
}

/// Indexes a stream of documents that can fail (e.g. read from a file)
///
/// The first error stops the indexing and is returned as is.
pub fn try_index_documents<D, I, T, E>(documents: D) -> Result<CorpusIndex, E>
where
    D: IntoIterator<Item = Result<I, E>>,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut indexer = DocumentIndexer::new();
    for document in documents {
        indexer.add(document?);
    }
    Ok(indexer.build())
}
