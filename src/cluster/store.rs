//! Storage for the counts of live clusters
//!
//! Each cluster owns a slot; the slot is emptied as soon as the cluster is
//! merged so that the memory is released.

use crate::base::{ClusterId, Count, DocumentCounts, MergeIndex};
use crate::error::{ClusterError, ClusterResult};
use crate::scoring::ClusterCounts;

/// Counts of a live cluster
pub struct ClusterSlot {
    pub counts: DocumentCounts,
    pub frequency: Count,
}

impl ClusterSlot {
    /// Merges two slots, summing counts document by document
    pub fn merge(self, other: ClusterSlot) -> ClusterSlot {
        let (mut target, source) = if self.counts.len() >= other.counts.len() {
            (self.counts, other.counts)
        } else {
            (other.counts, self.counts)
        };
        for (doc_id, count) in source {
            *target.entry(doc_id).or_insert(0) += count;
        }

        ClusterSlot {
            counts: target,
            frequency: self.frequency + other.frequency,
        }
    }
}

#[derive(Default)]
pub struct ClusterStore {
    words: Vec<Option<ClusterSlot>>,
    merged: Vec<Option<ClusterSlot>>,
    live: usize,
}

impl ClusterStore {
    /// Creates the store from the words counts (indexed by rank)
    pub fn new(postings: Vec<DocumentCounts>, frequencies: &[Count]) -> Self {
        let words: Vec<Option<ClusterSlot>> = postings
            .into_iter()
            .zip(frequencies.iter())
            .map(|(counts, frequency)| {
                Some(ClusterSlot {
                    counts,
                    frequency: *frequency,
                })
            })
            .collect();
        Self {
            live: words.len(),
            words,
            merged: Vec::new(),
        }
    }

    fn slot(&self, cluster: ClusterId) -> Option<&ClusterSlot> {
        match cluster {
            ClusterId::Word(ix) => self.words.get(ix),
            ClusterId::Merged(ix) => self.merged.get(ix),
        }
        .and_then(Option::as_ref)
    }

    pub fn get(&self, cluster: ClusterId) -> ClusterResult<&ClusterSlot> {
        self.slot(cluster)
            .ok_or(ClusterError::MissingCluster(cluster))
    }

    pub fn contains(&self, cluster: ClusterId) -> bool {
        self.slot(cluster).is_some()
    }

    /// Takes the slot out of the store
    pub fn take(&mut self, cluster: ClusterId) -> ClusterResult<ClusterSlot> {
        let slot = match cluster {
            ClusterId::Word(ix) => self.words.get_mut(ix),
            ClusterId::Merged(ix) => self.merged.get_mut(ix),
        }
        .and_then(Option::take)
        .ok_or(ClusterError::MissingCluster(cluster))?;
        self.live -= 1;
        Ok(slot)
    }

    /// Adds a merged cluster and returns its index
    pub fn push_merged(&mut self, slot: ClusterSlot) -> MergeIndex {
        self.merged.push(Some(slot));
        self.live += 1;
        self.merged.len() - 1
    }

    /// Number of clusters that have not been merged
    pub fn live(&self) -> usize {
        self.live
    }
}

impl ClusterCounts for ClusterStore {
    fn cluster_counts(&self, cluster: ClusterId) -> ClusterResult<(&DocumentCounts, Count)> {
        let slot = self.get(cluster)?;
        Ok((&slot.counts, slot.frequency))
    }
}
