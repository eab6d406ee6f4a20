use crate::base::{ClusterId, Len};
use crate::cluster::hierarchy::{Hierarchy, MergeRecord};
use crate::cluster::store::{ClusterSlot, ClusterStore};
use crate::error::ClusterError;

fn record(id: usize, left: ClusterId, right: ClusterId, left_bit: bool) -> MergeRecord {
    MergeRecord {
        id,
        left,
        right,
        left_bit,
        frequency: 0,
        score: 0.,
    }
}

#[test]
fn test_codes() {
    let (w0, w1, w2) = (ClusterId::Word(0), ClusterId::Word(1), ClusterId::Word(2));
    let mut hierarchy = Hierarchy::new();
    hierarchy.add(record(0, w0, w1, true));
    hierarchy.add(record(1, ClusterId::Merged(0), w2, false));

    assert_eq!(hierarchy.code(w0), "01");
    assert_eq!(hierarchy.code(w1), "00");
    assert_eq!(hierarchy.code(w2), "1");
    assert_eq!(hierarchy.code(ClusterId::Merged(1)), "");

    // Codes can be asked again
    assert_eq!(hierarchy.code(w0), "01");

    assert_eq!(hierarchy.depth(w0), 2);
    assert_eq!(hierarchy.depth(w2), 1);
    assert_eq!(hierarchy.parent(w0), Some(ClusterId::Merged(0)));
    assert_eq!(hierarchy.bit(w2), Some(true));
    assert_eq!(hierarchy.last_cluster(), Some(ClusterId::Merged(1)));
    assert_eq!(hierarchy.len(), 2);
}

#[test]
fn test_unmerged_word() {
    let hierarchy = Hierarchy::new();
    assert_eq!(hierarchy.code(ClusterId::Word(0)), "");
    assert_eq!(hierarchy.last_cluster(), None);
}

#[test]
#[should_panic(expected = "merged twice")]
fn test_merged_twice() {
    let (w0, w1, w2) = (ClusterId::Word(0), ClusterId::Word(1), ClusterId::Word(2));
    let mut hierarchy = Hierarchy::new();
    hierarchy.add(record(0, w0, w1, true));
    hierarchy.add(record(1, w0, w2, true));
}

#[test]
fn test_slot_merge() {
    let left = ClusterSlot {
        counts: [(0, 2), (1, 1)].into_iter().collect(),
        frequency: 3,
    };
    let right = ClusterSlot {
        counts: [(1, 4), (5, 1)].into_iter().collect(),
        frequency: 5,
    };
    let merged = left.merge(right);

    assert_eq!(merged.frequency, 8);
    assert_eq!(merged.counts.len(), 3);
    assert_eq!(merged.counts[&0], 2);
    assert_eq!(merged.counts[&1], 5);
    assert_eq!(merged.counts[&5], 1);
}

#[test]
fn test_store_slots() {
    let mut store = ClusterStore::new(
        vec![
            [(0, 1)].into_iter().collect(),
            [(0, 2)].into_iter().collect(),
        ],
        &[1, 2],
    );
    assert_eq!(store.live(), 2);

    let w0 = ClusterId::Word(0);
    let slot = store.take(w0).expect("the word has a slot");
    assert_eq!(slot.frequency, 1);
    assert!(!store.contains(w0));
    assert_eq!(store.take(w0).err(), Some(ClusterError::MissingCluster(w0)));
    assert_eq!(
        store.get(ClusterId::Merged(0)).err(),
        Some(ClusterError::MissingCluster(ClusterId::Merged(0)))
    );

    let id = store.push_merged(slot);
    assert_eq!(id, 0);
    assert!(store.contains(ClusterId::Merged(0)));
    assert_eq!(store.live(), 2);
}
