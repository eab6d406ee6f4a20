use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Index of a word in discovery order
pub type WordIndex = usize;

/// Index of a merged cluster (the value of the merge counter)
pub type MergeIndex = usize;

pub type DocId = u64;
pub type Count = u64;
pub type BoxResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Document ID -> number of occurrences in the document (never zero)
pub type DocumentCounts = FxHashMap<DocId, Count>;

/// Marks object that have a length
pub trait Len {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A cluster is either an original word or the result of a merge
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClusterId {
    Word(WordIndex),
    Merged(MergeIndex),
}

impl ClusterId {
    pub fn is_word(&self) -> bool {
        matches!(self, ClusterId::Word(_))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClusterId::Word(ix) => write!(f, "w{}", ix),
            ClusterId::Merged(ix) => write!(f, "{}", ix),
        }
    }
}

/// Unordered pair of clusters (stored with the smallest ID first)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterPair(ClusterId, ClusterId);

impl ClusterPair {
    pub fn new(a: ClusterId, b: ClusterId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> ClusterId {
        self.0
    }

    pub fn second(&self) -> ClusterId {
        self.1
    }

    pub fn contains(&self, c: ClusterId) -> bool {
        self.0 == c || self.1 == c
    }
}

impl fmt::Display for ClusterPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}
