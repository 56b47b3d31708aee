// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The scoring seam.
//!
//! A [`Scorer`] estimates how likely a configuration is to be the key of a
//! ciphertext. Scores only order exploration: correctness comes from trial
//! decryption, so a poor scorer makes the search slower, never wrong.
//!
//! Scorers are async because the usual implementation is a learned model
//! behind a network call. Batching is optional; the default
//! [`score_batch`](Scorer::score_batch) calls [`score`](Scorer::score) in turn.

pub mod heuristic;

pub use heuristic::TrialDecryptionScorer;

use crate::alphabet::Letter;
use crate::error::ScoreError;
use crate::machine::MachineConfig;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

pub type ScoreOutcome = Result<f64, ScoreError>;

/// External plausibility estimate for a candidate key. Higher is better.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, ciphertext: &[Letter], config: &MachineConfig) -> ScoreOutcome;

    /// Score several candidates; one result per config, in order.
    async fn score_batch(
        &self,
        ciphertext: &[Letter],
        configs: &[MachineConfig],
    ) -> Vec<ScoreOutcome> {
        let mut scores = Vec::with_capacity(configs.len());
        for config in configs {
            scores.push(self.score(ciphertext, config).await);
        }
        scores
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        "scorer"
    }
}

/// Reject NaN and infinities.
pub fn check_finite(score: f64) -> ScoreOutcome {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(ScoreError::OutOfRange(score))
    }
}

/// Adapts a synchronous closure into a [`Scorer`].
///
/// ```
/// use enigma_search::scorer::{FnScorer, Scorer};
///
/// let scorer = FnScorer::new("rightmost", |_text, config| {
///     Ok(config.positions[2] as f64)
/// });
/// assert_eq!(scorer.name(), "rightmost");
/// ```
pub struct FnScorer<F> {
    name: String,
    function: F,
}

impl<F> FnScorer<F>
where
    F: Fn(&[Letter], &MachineConfig) -> ScoreOutcome + Send + Sync,
{
    pub fn new(name: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

#[async_trait]
impl<F> Scorer for FnScorer<F>
where
    F: Fn(&[Letter], &MachineConfig) -> ScoreOutcome + Send + Sync,
{
    async fn score(&self, ciphertext: &[Letter], config: &MachineConfig) -> ScoreOutcome {
        (self.function)(ciphertext, config)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A scorer backed by a table of known scores, e.g. precomputed model output.
/// Configs missing from the table get `default`.
pub fn lookup_scorer(
    table: HashMap<MachineConfig, f64>,
    default: f64,
) -> FnScorer<impl Fn(&[Letter], &MachineConfig) -> ScoreOutcome + Send + Sync> {
    FnScorer::new("lookup", move |_text: &[Letter], config: &MachineConfig| {
        Ok(table.get(config).copied().unwrap_or(default))
    })
}

/// Scores already obtained during a run, keyed by candidate identity.
///
/// Failures are cached too, so a failing candidate is never retried.
#[derive(Debug, Default)]
pub struct ScoreCache {
    scores: DashMap<MachineConfig, ScoreOutcome>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, config: &MachineConfig) -> Option<ScoreOutcome> {
        self.scores.get(config).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, config: MachineConfig, outcome: ScoreOutcome) {
        self.scores.insert(config, outcome);
    }

    /// Distinct candidates scored so far.
    pub(crate) fn len(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RotorId;
    use crate::machine::MachineModel;

    fn config(position: u8) -> MachineConfig {
        MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::I, RotorId::II, RotorId::III])
            .with_positions(vec![0, 0, position])
    }

    #[tokio::test]
    async fn test_fn_scorer_default_batch() {
        let scorer = FnScorer::new("test", |_: &[Letter], c: &MachineConfig| {
            Ok(c.positions[2] as f64)
        });
        let scores = scorer.score_batch(&[], &[config(3), config(7)]).await;
        assert_eq!(scores, vec![Ok(3.0), Ok(7.0)]);
    }

    #[tokio::test]
    async fn test_lookup_scorer() {
        let mut table = HashMap::new();
        table.insert(config(1), 0.9);
        let scorer = lookup_scorer(table, -1.0);
        assert_eq!(scorer.score(&[], &config(1)).await, Ok(0.9));
        assert_eq!(scorer.score(&[], &config(2)).await, Ok(-1.0));
    }

    #[test]
    fn test_check_finite() {
        assert_eq!(check_finite(0.5), Ok(0.5));
        assert!(matches!(check_finite(f64::NAN), Err(ScoreError::OutOfRange(_))));
        assert!(check_finite(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_cache_keeps_failures() {
        let cache = ScoreCache::new();
        cache.insert(config(1), Ok(1.0));
        cache.insert(config(2), Err(ScoreError::Failed("down".into())));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&config(1)), Some(Ok(1.0)));
        assert!(matches!(cache.get(&config(2)), Some(Err(ScoreError::Failed(_)))));
        assert_eq!(cache.get(&config(3)), None);
    }
}
