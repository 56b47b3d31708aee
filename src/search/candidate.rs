// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidates and their ranking.

use crate::machine::MachineConfig;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CandidateStatus {
    Unverified,
    Verified,
    Rejected,
}

/// A key-space configuration as it moves through the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Position in the key space; the tie-break for equal scores.
    pub index: u128,
    pub config: MachineConfig,
    /// `None` when running without a scorer, or when the scorer failed.
    pub score: Option<f64>,
    /// Language fit of the full trial decryption, once verified.
    pub plausibility: Option<f64>,
    pub status: CandidateStatus,
}

impl Candidate {
    pub fn new(index: u128, config: MachineConfig, score: Option<f64>) -> Self {
        Self {
            index,
            config,
            score,
            plausibility: None,
            status: CandidateStatus::Unverified,
        }
    }

    fn score_key(&self) -> f64 {
        self.score.unwrap_or(f64::NEG_INFINITY)
    }

    /// Whether `self` is a better answer to report than `other`: higher
    /// score, then higher plausibility, then lower index.
    pub(crate) fn outranks(&self, other: &Candidate) -> bool {
        self.score_key()
            .total_cmp(&other.score_key())
            .then_with(|| {
                let a = self.plausibility.unwrap_or(f64::NEG_INFINITY);
                let b = other.plausibility.unwrap_or(f64::NEG_INFINITY);
                a.total_cmp(&b)
            })
            .then_with(|| other.index.cmp(&self.index))
            == Ordering::Greater
    }
}

/// Heap entry: max-heap order is score descending, then index ascending.
///
/// Only the index is kept; the configuration is rebuilt from the key space
/// when the entry is popped, so a large frontier stays small in memory.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ranked {
    pub score: Option<f64>,
    pub index: u128,
}

impl Ranked {
    fn score_key(&self) -> f64 {
        self.score.unwrap_or(f64::NEG_INFINITY)
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score_key()
            .total_cmp(&other.score_key())
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RotorId;
    use crate::machine::MachineModel;
    use std::collections::BinaryHeap;

    fn candidate(index: u128, score: Option<f64>) -> Candidate {
        let config =
            MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::I, RotorId::II, RotorId::III]);
        Candidate::new(index, config, score)
    }

    fn drain(items: Vec<(u128, Option<f64>)>) -> Vec<u128> {
        let mut heap: BinaryHeap<Ranked> = items
            .into_iter()
            .map(|(index, score)| Ranked { score, index })
            .collect();
        std::iter::from_fn(|| heap.pop().map(|r| r.index)).collect()
    }

    #[test]
    fn test_heap_orders_by_score_then_index() {
        let order = drain(vec![(4, Some(0.5)), (1, Some(0.2)), (3, Some(0.9)), (2, Some(0.5))]);
        assert_eq!(order, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_unscored_heap_is_lexicographic() {
        let order = drain(vec![(7, None), (2, None), (5, None)]);
        assert_eq!(order, vec![2, 5, 7]);
    }

    #[test]
    fn test_outranks() {
        assert!(candidate(9, Some(1.0)).outranks(&candidate(1, Some(0.0))));
        assert!(candidate(1, Some(1.0)).outranks(&candidate(2, Some(1.0))));
        let mut plausible = candidate(8, None);
        plausible.plausibility = Some(0.4);
        assert!(plausible.outranks(&candidate(1, None)));
    }
}
