// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Score-guided key search.
//!
//! The controller combines three parts:
//!
//! - the [`KeySpace`], walked in index order and never reordered;
//! - an optional [`Scorer`], which ranks candidates into a max-heap;
//! - trial decryption plus a [`Plausibility`] check, which is the only thing
//!   that can accept a key.
//!
//! # State machine
//!
//! ```text
//! Idle -> Ranking <-> Verifying -> Accepted
//!                               -> Exhausted (budget spent or space drained)
//!                               -> Aborted   (caller cancelled)
//! ```
//!
//! Ranking scores batches of candidates and pushes them on the heap until it
//! holds `frontier` entries or the key space is drained. A space no larger
//! than the frontier is therefore ranked in full before the first trial
//! decryption, and the scorer's top candidate is always tried first. On
//! larger spaces the frontier is a bounded look-ahead: the best candidate
//! among the first `frontier` in index order goes first.
//!
//! Verifying pops up to `workers` candidates and decrypts them in parallel on
//! the blocking pool, while the next batch is scored. Within a wave the
//! highest-ranked passing candidate wins, whatever order the workers finish
//! in, so a run is reproducible for a given configuration.

pub mod budget;
pub mod candidate;
pub mod statistics;

pub use budget::{cancel_pair, CancelHandle, CancelSignal, SearchBudget};
pub use candidate::{Candidate, CandidateStatus};
pub use statistics::{Counters, Statistics};

use crate::alphabet::{letters_to_string, Letter};
use crate::config::SearchConfig;
use crate::error::{ScoreError, SearchError, SearchResult};
use crate::keyspace::KeySpace;
use crate::machine::{encipher, MachineConfig};
use crate::plausibility::{LanguageModel, Plausibility};
use crate::scorer::{check_finite, ScoreCache, ScoreOutcome, Scorer};
use budget::deadline_reached;
use candidate::Ranked;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum SearchState {
    Idle,
    Ranking,
    Verifying,
    Accepted,
    Exhausted,
    Aborted,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum SearchStatus {
    /// A candidate passed verification.
    Accepted,
    /// The budget ran out, or the key space was drained.
    Exhausted,
    /// The caller cancelled.
    Aborted,
}

/// Result of a run. Always carries the best candidate seen, if any.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// The accepted candidate, or the best candidate so far.
    pub best: Option<Candidate>,
    /// Decryption under `best` when accepted.
    pub plaintext: Option<String>,
    /// Every state visited, in order.
    pub states: Vec<SearchState>,
    pub statistics: Statistics,
    pub elapsed: Duration,
}

impl SearchOutcome {
    pub fn is_accepted(&self) -> bool {
        self.status == SearchStatus::Accepted
    }

    pub fn verified(&self) -> u64 {
        self.statistics.get(Counters::Verified)
    }
}

/// Why a ranking step stopped early.
enum Interrupt {
    Cancelled,
    Deadline,
}

/// A scored batch, applied to the run after the concurrent work completes.
#[derive(Default)]
struct RankedBatch {
    ranked: Vec<Ranked>,
    /// Candidates whose score failed; they are rejected without a trial.
    failed: u64,
    scored: u64,
    cache_hits: u64,
}

impl RankedBatch {
    fn width(&self) -> u128 {
        self.ranked.len() as u128 + self.failed as u128
    }
}

/// Verification result for one candidate in a wave.
struct Trial {
    candidate: Candidate,
    plaintext: Vec<Letter>,
}

/// Mutable state of one run.
struct Run {
    ciphertext: Arc<Vec<Letter>>,
    heap: BinaryHeap<Ranked>,
    cursor: u128,
    cache: ScoreCache,
    states: Vec<SearchState>,
    statistics: Statistics,
    best: Option<Candidate>,
    start: Instant,
    deadline: Option<Instant>,
}

impl Run {
    fn transition(&mut self, state: SearchState) {
        if self.states.last() == Some(&state) {
            return;
        }
        debug!(from = ?self.states.last(), to = %state, "transition");
        self.states.push(state);
    }

    fn consider(&mut self, candidate: &Candidate) {
        let better = match &self.best {
            Some(best) => candidate.outranks(best),
            None => true,
        };
        if better {
            self.best = Some(candidate.clone());
        }
    }

    fn apply(&mut self, batch: RankedBatch) {
        self.statistics.add(Counters::Enumerated, batch.width() as u64);
        self.statistics.add(Counters::Scored, batch.scored);
        self.statistics.add(Counters::CacheHits, batch.cache_hits);
        self.statistics.add(Counters::ScorerFailures, batch.failed);
        self.statistics.add(Counters::Rejected, batch.failed);
        self.heap.extend(batch.ranked);
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn finish(
        mut self,
        status: SearchStatus,
        best: Option<Candidate>,
        plaintext: Option<String>,
    ) -> SearchOutcome {
        self.transition(match status {
            SearchStatus::Accepted => SearchState::Accepted,
            SearchStatus::Exhausted => SearchState::Exhausted,
            SearchStatus::Aborted => SearchState::Aborted,
        });
        let elapsed = self.start.elapsed();
        info!(%status, statistics = %self.statistics, cached = self.cache.len(), ?elapsed,
            "search finished");
        SearchOutcome {
            status,
            best,
            plaintext,
            states: self.states,
            statistics: self.statistics,
            elapsed,
        }
    }

    /// Best rejected candidate, or the top of the heap when nothing has been
    /// verified yet.
    fn best_so_far(&mut self, space: &KeySpace) -> Option<Candidate> {
        self.best.take().or_else(|| {
            let top = self.heap.peek()?;
            Some(Candidate::new(top.index, space.get(top.index)?, top.score))
        })
    }
}

/// Drives a search over one key space.
pub struct SearchController {
    space: KeySpace,
    scorer: Option<Arc<dyn Scorer>>,
    plausibility: Arc<dyn Plausibility>,
    settings: SearchConfig,
}

impl SearchController {
    /// A controller with no scorer (lexicographic order) and the language
    /// model named in `settings`.
    pub fn new(space: KeySpace, settings: SearchConfig) -> SearchResult<Self> {
        settings.validate()?;
        Ok(Self {
            space,
            scorer: None,
            plausibility: Arc::new(LanguageModel::new(settings.language)),
            settings,
        })
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_plausibility(mut self, plausibility: Arc<dyn Plausibility>) -> Self {
        self.plausibility = plausibility;
        self
    }

    fn frontier(&self) -> usize {
        self.settings.frontier.max(1)
    }

    pub fn space(&self) -> &KeySpace {
        &self.space
    }

    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    /// Search for the key of `ciphertext`.
    ///
    /// Errors only for unusable input; budget exhaustion and cancellation are
    /// reported through [`SearchOutcome::status`].
    #[instrument(skip_all, fields(len = ciphertext.len(), space = %self.space.len()))]
    pub async fn run(
        &self,
        ciphertext: &[Letter],
        budget: SearchBudget,
        cancel: CancelSignal,
    ) -> SearchResult<SearchOutcome> {
        if ciphertext.is_empty() {
            return Err(SearchError::EmptyCiphertext);
        }
        let start = Instant::now();
        let mut run = Run {
            ciphertext: Arc::new(ciphertext.to_vec()),
            heap: BinaryHeap::new(),
            cursor: 0,
            cache: ScoreCache::new(),
            states: vec![SearchState::Idle],
            statistics: Statistics::new(),
            best: None,
            start,
            deadline: budget.deadline(start),
        };
        info!(
            scorer = self.scorer.as_ref().map_or("none", |s| s.name()),
            workers = self.settings.workers,
            threshold = self.settings.acceptance_threshold,
            "search started"
        );

        loop {
            // Ranking: keep the frontier topped up.
            while run.heap.len() < self.frontier() && run.cursor < self.space.len() {
                if cancel.is_cancelled() {
                    let best = run.best_so_far(&self.space);
                    return Ok(run.finish(SearchStatus::Aborted, best, None));
                }
                run.transition(SearchState::Ranking);
                match self.rank_next(&mut run, &cancel).await {
                    Ok(batch) => run.apply(batch),
                    Err(Interrupt::Cancelled) => {
                        let best = run.best_so_far(&self.space);
                        return Ok(run.finish(SearchStatus::Aborted, best, None));
                    }
                    Err(Interrupt::Deadline) => {
                        let best = run.best_so_far(&self.space);
                        return Ok(run.finish(SearchStatus::Exhausted, best, None));
                    }
                }
            }

            if cancel.is_cancelled() {
                let best = run.best_so_far(&self.space);
                return Ok(run.finish(SearchStatus::Aborted, best, None));
            }
            let remaining = budget.remaining(run.statistics.get(Counters::Verified));
            if run.heap.is_empty() || remaining == 0 || run.deadline_passed() {
                if run.heap.is_empty() {
                    info!("key space drained");
                }
                let best = run.best_so_far(&self.space);
                return Ok(run.finish(SearchStatus::Exhausted, best, None));
            }

            // Verifying: one wave, with the next batch scored alongside.
            run.transition(SearchState::Verifying);
            let size = (self.settings.workers as u64).min(remaining) as usize;
            let wave: Vec<Candidate> = std::iter::from_fn(|| run.heap.pop())
                .take(size)
                .filter_map(|r| Some(Candidate::new(r.index, self.space.get(r.index)?, r.score)))
                .collect();
            let prefetch = run.heap.len() < self.frontier() && run.cursor < self.space.len();

            let (trials, next) = {
                let verify = self.verify_wave(&run.ciphertext, wave);
                let rank = async {
                    if prefetch {
                        Some(self.rank_next_ref(&run, &cancel).await)
                    } else {
                        None
                    }
                };
                tokio::join!(verify, rank)
            };
            let trials = trials?;
            run.statistics.increment_counter(Counters::Waves);
            run.statistics.add(Counters::Verified, trials.len() as u64);

            let mut accepted = None;
            for mut trial in trials {
                let passed = trial.candidate.plausibility.unwrap_or(f64::NEG_INFINITY)
                    >= self.settings.acceptance_threshold;
                if passed && accepted.is_none() {
                    trial.candidate.status = CandidateStatus::Verified;
                    accepted = Some(trial);
                } else if !passed {
                    trial.candidate.status = CandidateStatus::Rejected;
                    run.statistics.increment_counter(Counters::Rejected);
                    debug!(index = %trial.candidate.index, config = %trial.candidate.config,
                        plausibility = ?trial.candidate.plausibility, "rejected");
                    run.consider(&trial.candidate);
                }
            }

            // An interrupted prefetch is picked up by the checks at the top of
            // the loop.
            if let Some(Ok(batch)) = next {
                run.cursor += batch.width();
                run.apply(batch);
            }

            if let Some(trial) = accepted {
                info!(index = %trial.candidate.index, config = %trial.candidate.config,
                    plausibility = ?trial.candidate.plausibility, "accepted");
                let plaintext = letters_to_string(&trial.plaintext);
                return Ok(run.finish(SearchStatus::Accepted, Some(trial.candidate), Some(plaintext)));
            }
        }
    }

    /// Score the next batch and advance the cursor past it.
    async fn rank_next(&self, run: &mut Run, cancel: &CancelSignal) -> Result<RankedBatch, Interrupt> {
        let batch = self.rank_next_ref(run, cancel).await?;
        run.cursor += batch.width();
        Ok(batch)
    }

    /// Score the batch at the cursor without advancing it, racing
    /// cancellation and the deadline.
    async fn rank_next_ref(&self, run: &Run, cancel: &CancelSignal) -> Result<RankedBatch, Interrupt> {
        let end = run
            .cursor
            .saturating_add(self.settings.batch_size as u128)
            .min(self.space.len());
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupt::Cancelled),
            _ = deadline_reached(run.deadline) => Err(Interrupt::Deadline),
            batch = self.score_range(&run.ciphertext, &run.cache, run.cursor, end) => Ok(batch),
        }
    }

    async fn score_range(
        &self,
        ciphertext: &[Letter],
        cache: &ScoreCache,
        start: u128,
        end: u128,
    ) -> RankedBatch {
        let mut batch = RankedBatch::default();
        let Some(scorer) = &self.scorer else {
            batch.ranked = (start..end)
                .map(|index| Ranked { score: None, index })
                .collect();
            return batch;
        };

        let configs: Vec<(u128, MachineConfig)> = (start..end)
            .filter_map(|i| self.space.get(i).map(|config| (i, config)))
            .collect();

        let mut known = Vec::with_capacity(configs.len());
        let mut unknown = Vec::new();
        for (i, config) in configs {
            match cache.get(&config) {
                Some(outcome) => {
                    batch.cache_hits += 1;
                    known.push((i, config, outcome));
                }
                None => unknown.push((i, config)),
            }
        }

        if !unknown.is_empty() {
            let requested: Vec<MachineConfig> = unknown.iter().map(|(_, c)| c.clone()).collect();
            let mut scores = scorer.score_batch(ciphertext, &requested).await;
            if scores.len() != requested.len() {
                let error = ScoreError::BatchShape {
                    expected: requested.len(),
                    got: scores.len(),
                };
                scores = vec![Err(error); requested.len()];
            }
            batch.scored += requested.len() as u64;
            for ((i, config), outcome) in unknown.into_iter().zip(scores) {
                let outcome: ScoreOutcome = outcome.and_then(check_finite);
                cache.insert(config.clone(), outcome.clone());
                known.push((i, config, outcome));
            }
        }

        for (index, config, outcome) in known {
            match outcome {
                Ok(score) => batch.ranked.push(Ranked {
                    score: Some(score),
                    index,
                }),
                Err(e) => {
                    warn!(%index, %config, error = %e, "scorer failure, candidate rejected");
                    batch.failed += 1;
                }
            }
        }
        batch
    }

    /// Trial-decrypt a wave on the blocking pool; results come back in pop
    /// order. A task that dies leaves its candidate without a plausibility,
    /// so it is rejected.
    async fn verify_wave(
        &self,
        ciphertext: &Arc<Vec<Letter>>,
        wave: Vec<Candidate>,
    ) -> SearchResult<Vec<Trial>> {
        let tasks = wave.iter().cloned().map(|candidate| {
            let ciphertext = Arc::clone(ciphertext);
            let plausibility = Arc::clone(&self.plausibility);
            tokio::task::spawn_blocking(move || {
                let plaintext = encipher(&ciphertext, &candidate.config)?;
                let mut candidate = candidate;
                candidate.plausibility = Some(plausibility.plausibility(&plaintext));
                Ok::<_, SearchError>(Trial {
                    candidate,
                    plaintext,
                })
            })
        }).collect::<Vec<_>>();

        let mut trials = Vec::with_capacity(wave.len());
        for (candidate, joined) in wave.into_iter().zip(join_all(tasks).await) {
            match joined {
                Ok(trial) => trials.push(trial?),
                Err(e) => {
                    warn!(index = %candidate.index, config = %candidate.config, error = %e,
                        "verification task failed");
                    trials.push(Trial {
                        candidate,
                        plaintext: Vec::new(),
                    });
                }
            }
        }
        Ok(trials)
    }
}
