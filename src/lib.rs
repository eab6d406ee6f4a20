//! Hierarchical word clusters based on document-level co-occurrences
//!
//! Clusters are merged greedily by picking the pair with the highest
//! pointwise mutual information, where the probability of a pair is the
//! probability that two tokens of the same document belong to the two
//! clusters. Each word is finally described by the bits on the path from the
//! root of the merge tree.

pub mod base;
pub mod builder;
pub mod cluster;
pub mod documents;
pub mod error;
pub mod index;
pub mod output;
pub mod scoring;
pub mod vocabulary;

#[cfg(feature = "python")]
mod py;

#[cfg(test)]
mod tests;

pub use cluster::{cluster_documents, cluster_index, try_cluster_documents, ClusteringOptions};
pub use error::ClusterError;
pub use output::Clustering;
