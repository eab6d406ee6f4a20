use std::fmt;

use crate::base::ClusterId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// No document was indexed
    EmptyCorpus,

    /// The vocabulary cap fell in a group of equally frequent words
    /// (requested size, size actually used)
    VocabCapTooSmall { requested: usize, used: usize },

    /// A cluster in the batch has no document counts or frequency
    MissingCluster(ClusterId),

    /// More than one cluster in the batch but no scored pair
    MissingScores { batch_size: usize },

    /// Invalid clustering option
    InvalidOption(String),
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClusterError::EmptyCorpus => write!(f, "the corpus does not contain any document"),
            ClusterError::VocabCapTooSmall { requested, used } => write!(
                f,
                "max_vocab_size {} splits words with equal frequencies, using {} words",
                requested, used
            ),
            ClusterError::MissingCluster(c) => {
                write!(f, "cluster {} is in the batch but has no counts", c)
            }
            ClusterError::MissingScores { batch_size } => write!(
                f,
                "no scored pair while {} clusters remain in the batch",
                batch_size
            ),
            ClusterError::InvalidOption(msg) => write!(f, "invalid option: {}", msg),
        }
    }
}

impl std::error::Error for ClusterError {}

pub type ClusterResult<T> = Result<T, ClusterError>;
