//! Clustering results

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::base::{ClusterId, Count, DocId, Len, WordIndex};
use crate::cluster::hierarchy::Hierarchy;

/// Output record: word, bitstring and frequency
pub struct ClusterRecord<'a> {
    pub word: &'a str,
    pub code: String,
    pub frequency: Count,
}

impl<'a> fmt::Display for ClusterRecord<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.word, self.code, self.frequency)
    }
}

/// Word hierarchy built by merging clusters
pub struct Clustering {
    /// Words sorted by decreasing frequency
    words: Vec<String>,
    word_ids: FxHashMap<String, WordIndex>,
    frequencies: Vec<Count>,
    hierarchy: Hierarchy,
    num_documents: DocId,
}

impl Clustering {
    pub(crate) fn new(
        words: Vec<String>,
        frequencies: Vec<Count>,
        hierarchy: Hierarchy,
        num_documents: DocId,
    ) -> Self {
        let word_ids = words
            .iter()
            .enumerate()
            .map(|(ix, w)| (w.clone(), ix))
            .collect();
        Self {
            words,
            word_ids,
            frequencies,
            hierarchy,
            num_documents,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn frequency(&self, word: &str) -> Option<Count> {
        self.word_ids.get(word).map(|ix| self.frequencies[*ix])
    }

    /// Bitstring of a word (None if not in the vocabulary)
    pub fn bitstring(&self, word: &str) -> Option<String> {
        self.word_ids
            .get(word)
            .map(|ix| self.hierarchy.code(ClusterId::Word(*ix)))
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn num_documents(&self) -> DocId {
        self.num_documents
    }

    pub fn num_merges(&self) -> usize {
        self.hierarchy.len()
    }

    /// Records in decreasing frequency order
    pub fn records(&self) -> impl Iterator<Item = ClusterRecord<'_>> + '_ {
        self.words
            .iter()
            .zip(self.frequencies.iter())
            .enumerate()
            .map(move |(ix, (word, frequency))| ClusterRecord {
                word,
                code: self.hierarchy.code(ClusterId::Word(ix)),
                frequency: *frequency,
            })
    }

    /// Writes one tab-separated record per line
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for record in self.records() {
            writeln!(writer, "{}", record)?;
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_tsv(&mut writer)?;
        writer.flush()
    }
}

impl Len for Clustering {
    fn len(&self) -> usize {
        self.words.len()
    }
}
