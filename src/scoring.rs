//! Pairwise PMI scores

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::base::{ClusterId, ClusterPair, Count, DocumentCounts, Len};
use crate::cluster::random::RandomSource;
use crate::error::ClusterResult;

/// Above this number of pairs, scores are computed in parallel
pub(crate) const PARALLEL_SCORE_THRESHOLD: usize = 512;

/// Number of pairs of tokens (one from each cluster) appearing in the same
/// document
pub fn cooccurrences(a: &DocumentCounts, b: &DocumentCounts) -> Count {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(doc_id, count)| large.get(doc_id).map(|other| count * other))
        .sum()
}

/// Pointwise mutual information (up to a constant) of two clusters
///
/// Returns -infinity when the two clusters never appear in the same
/// document.
pub fn pmi_score(
    a: &DocumentCounts,
    a_frequency: Count,
    b: &DocumentCounts,
    b_frequency: Count,
) -> f64 {
    let pair_count = cooccurrences(a, b);
    if pair_count == 0 {
        return f64::NEG_INFINITY;
    }

    (pair_count as f64).ln() - (a_frequency as f64).ln() - (b_frequency as f64).ln()
}

/// Gives access to the counts of live clusters
pub trait ClusterCounts: Sync {
    /// Returns the document counts and the frequency of a cluster
    fn cluster_counts(&self, cluster: ClusterId) -> ClusterResult<(&DocumentCounts, Count)>;
}

fn score_pair<S: ClusterCounts + ?Sized>(
    source: &S,
    pair: ClusterPair,
) -> ClusterResult<(ClusterPair, f64)> {
    let (a, a_frequency) = source.cluster_counts(pair.first())?;
    let (b, b_frequency) = source.cluster_counts(pair.second())?;
    Ok((pair, pmi_score(a, a_frequency, b, b_frequency)))
}

/// Scores a list of pairs (results are in the same order)
pub fn compute_scores<S: ClusterCounts + ?Sized>(
    source: &S,
    pairs: &[ClusterPair],
) -> ClusterResult<Vec<(ClusterPair, f64)>> {
    if pairs.len() >= PARALLEL_SCORE_THRESHOLD {
        pairs
            .par_iter()
            .map(|pair| score_pair(source, *pair))
            .collect()
    } else {
        pairs.iter().map(|pair| score_pair(source, *pair)).collect()
    }
}

/// Scores of the pairs of clusters in the current batch
#[derive(Default)]
pub struct ScoreTable {
    scores: FxHashMap<ClusterPair, f64>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pair: ClusterPair, score: f64) {
        self.scores.insert(pair, score);
    }

    pub fn extend(&mut self, scores: Vec<(ClusterPair, f64)>) {
        self.scores.extend(scores);
    }

    pub fn get(&self, a: ClusterId, b: ClusterId) -> Option<f64> {
        self.scores.get(&ClusterPair::new(a, b)).copied()
    }

    /// Removes all the pairs containing `cluster`, given the other clusters
    /// it could be paired with
    pub fn remove_cluster(&mut self, cluster: ClusterId, others: &[ClusterId]) {
        for other in others {
            self.scores.remove(&ClusterPair::new(cluster, *other));
        }
    }

    /// Returns the pair with the highest score
    ///
    /// Ties are broken uniformly at random.
    pub fn best<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<(ClusterPair, f64)> {
        let mut best_score = f64::NEG_INFINITY;
        let mut best = Vec::new();
        for (pair, score) in self.scores.iter() {
            if best.is_empty() || *score > best_score {
                best_score = *score;
                best.clear();
                best.push(*pair);
            } else if *score == best_score {
                best.push(*pair);
            }
        }

        match best.len() {
            0 => None,
            1 => Some((best[0], best_score)),
            n => {
                // Hash map order is arbitrary
                best.sort_unstable();
                Some((best[rng.choose(n)], best_score))
            }
        }
    }

    pub fn contains_cluster(&self, cluster: ClusterId) -> bool {
        self.scores.keys().any(|pair| pair.contains(cluster))
    }
}

impl Len for ScoreTable {
    fn len(&self) -> usize {
        self.scores.len()
    }
}
