//! Merge hierarchy and bitstring codes

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::base::{ClusterId, Count, Len, MergeIndex};

/// One merge of two clusters
#[derive(Serialize, Clone, Debug)]
pub struct MergeRecord {
    /// ID of the new cluster
    pub id: MergeIndex,
    pub left: ClusterId,
    pub right: ClusterId,
    /// Bit of the left child (the right child gets the other one)
    pub left_bit: bool,
    /// Frequency of the new cluster
    pub frequency: Count,
    pub score: f64,
}

impl MergeRecord {
    pub fn cluster(&self) -> ClusterId {
        ClusterId::Merged(self.id)
    }
}

/// Parents and bits of all merged clusters
#[derive(Default)]
pub struct Hierarchy {
    parents: FxHashMap<ClusterId, MergeIndex>,
    bits: FxHashMap<ClusterId, bool>,
    merges: Vec<MergeRecord>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a merge
    ///
    /// Merges must be added in order and each cluster can only be merged
    /// once.
    pub fn add(&mut self, record: MergeRecord) {
        assert!(
            record.id == self.merges.len(),
            "Merge {} recorded after {} merges",
            record.id,
            self.merges.len()
        );
        for (child, bit) in [
            (record.left, record.left_bit),
            (record.right, !record.left_bit),
        ] {
            let previous = self.parents.insert(child, record.id);
            assert!(previous.is_none(), "Cluster {} merged twice", child);
            self.bits.insert(child, bit);
        }
        self.merges.push(record);
    }

    pub fn parent(&self, cluster: ClusterId) -> Option<ClusterId> {
        self.parents.get(&cluster).map(|ix| ClusterId::Merged(*ix))
    }

    pub fn bit(&self, cluster: ClusterId) -> Option<bool> {
        self.bits.get(&cluster).copied()
    }

    /// Bitstring from the root to the cluster
    ///
    /// Empty if the cluster was never merged.
    pub fn code(&self, cluster: ClusterId) -> String {
        let mut bits = Vec::new();
        let mut current = cluster;
        while let Some(parent) = self.parents.get(&current) {
            bits.push(if self.bits[&current] { '1' } else { '0' });
            current = ClusterId::Merged(*parent);
        }
        bits.iter().rev().collect()
    }

    /// Number of merges between the cluster and its root
    pub fn depth(&self, cluster: ClusterId) -> usize {
        let mut depth = 0;
        let mut current = cluster;
        while let Some(parent) = self.parents.get(&current) {
            depth += 1;
            current = ClusterId::Merged(*parent);
        }
        depth
    }

    pub fn merges(&self) -> &[MergeRecord] {
        &self.merges
    }

    pub fn merge(&self, id: MergeIndex) -> Option<&MergeRecord> {
        self.merges.get(id)
    }

    /// The last created cluster (never merged since IDs are increasing)
    pub fn last_cluster(&self) -> Option<ClusterId> {
        self.merges.last().map(MergeRecord::cluster)
    }
}

impl Len for Hierarchy {
    fn len(&self) -> usize {
        self.merges.len()
    }
}
