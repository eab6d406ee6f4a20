//! Vocabulary selection
//!
//! Orders the words of an index by decreasing frequency and optionally keeps
//! only the most frequent ones.

use log::{info, warn};

use crate::base::{Count, DocId, DocumentCounts, Len, WordIndex};
use crate::error::ClusterError;
use crate::index::CorpusIndex;

/// The retained words, sorted by decreasing frequency
///
/// Words are identified by their rank (0 being the most frequent).
pub struct Vocabulary {
    words: Vec<String>,
    frequencies: Vec<Count>,
    postings: Vec<DocumentCounts>,
    num_documents: DocId,
    relaxation: Option<ClusterError>,
}

impl Vocabulary {
    pub fn word(&self, rank: WordIndex) -> &str {
        &self.words[rank]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn frequency(&self, rank: WordIndex) -> Count {
        self.frequencies[rank]
    }

    pub fn counts(&self, rank: WordIndex) -> &DocumentCounts {
        &self.postings[rank]
    }

    pub fn num_documents(&self) -> DocId {
        self.num_documents
    }

    /// Set when the requested size could not be used because of ties
    pub fn relaxation(&self) -> Option<&ClusterError> {
        self.relaxation.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Count>, Vec<DocumentCounts>, DocId) {
        (
            self.words,
            self.frequencies,
            self.postings,
            self.num_documents,
        )
    }
}

impl Len for Vocabulary {
    fn len(&self) -> usize {
        self.words.len()
    }
}

/// Returns the frequency threshold (words must be strictly more frequent)
///
/// `order` is sorted by decreasing frequency and is longer than `max_size`.
fn frequency_threshold(order: &[WordIndex], frequencies: &[Count], max_size: usize) -> Count {
    let boundary = (max_size + 1).min(order.len() - 1);
    let mut too_rare = frequencies[order[boundary]];
    if too_rare == frequencies[order[0]] {
        too_rare += 1;
        info!(
            "max_vocab_size too low.  Using all words that appeared >= {} times.",
            too_rare
        );
    }
    too_rare
}

/// Selects the vocabulary from an index
///
/// Without `max_size`, all the words are kept. Otherwise, words are kept if
/// they are more frequent than the word after the cut, so that equally
/// frequent words are either all kept or all removed: the actual size can
/// differ from the requested one.
pub fn select_vocabulary(index: CorpusIndex, max_size: Option<usize>) -> Vocabulary {
    let (words, postings, frequencies, num_documents) = index.into_parts();

    // Stable sort: ties are ordered by discovery
    let mut order: Vec<WordIndex> = (0..words.len()).collect();
    order.sort_by(|a, b| frequencies[*b].cmp(&frequencies[*a]));

    let mut relaxation = None;
    if let Some(max_size) = max_size {
        if order.len() > max_size {
            let too_rare = frequency_threshold(&order, &frequencies, max_size);
            order.retain(|ix| frequencies[*ix] > too_rare);

            if order.len() != max_size {
                let diagnostic = ClusterError::VocabCapTooSmall {
                    requested: max_size,
                    used: order.len(),
                };
                warn!("{}", diagnostic);
                relaxation = Some(diagnostic);
            }
        }
    }

    let mut words: Vec<Option<String>> = words.into_iter().map(Some).collect();
    let mut postings: Vec<Option<DocumentCounts>> = postings.into_iter().map(Some).collect();

    let mut vocabulary = Vocabulary {
        words: Vec::with_capacity(order.len()),
        frequencies: Vec::with_capacity(order.len()),
        postings: Vec::with_capacity(order.len()),
        num_documents,
        relaxation,
    };
    for ix in order {
        vocabulary
            .words
            .push(words[ix].take().expect("word selected twice"));
        vocabulary
            .postings
            .push(postings[ix].take().expect("word selected twice"));
        vocabulary.frequencies.push(frequencies[ix]);
    }

    info!("Vocabulary size: {}", vocabulary.len());
    vocabulary
}
