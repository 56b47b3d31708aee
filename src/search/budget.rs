// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run limits and caller cancellation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Bounds on one search run. Either limit, when reached, ends the run as
/// exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Maximum number of candidates trial-decrypted.
    pub max_candidates: Option<u64>,
    /// Wall-clock limit measured from the start of the run.
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_candidates(mut self, max: u64) -> Self {
        self.max_candidates = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub(crate) fn deadline(&self, start: Instant) -> Option<Instant> {
        self.time_limit.map(|limit| start + limit)
    }

    /// Verifications still allowed after `verified`.
    pub(crate) fn remaining(&self, verified: u64) -> u64 {
        self.max_candidates
            .map_or(u64::MAX, |max| max.saturating_sub(verified))
    }
}

/// Create a linked cancellation pair.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

/// Held by the caller; cancels every run watching the paired signal.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // Fails only when no run is listening, which is fine.
        let _ = self.tx.send(true);
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Watched by a run.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested. Pending forever if the handle
    /// is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Resolves at `deadline`, or never.
pub(crate) async fn deadline_reached(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining() {
        let budget = SearchBudget::unlimited().with_max_candidates(5);
        assert_eq!(budget.remaining(2), 3);
        assert_eq!(budget.remaining(9), 0);
        assert_eq!(SearchBudget::unlimited().remaining(1_000), u64::MAX);
    }

    #[tokio::test]
    async fn test_cancel_wakes_waiter() {
        let (handle, signal) = cancel_pair();
        assert!(!signal.is_cancelled());
        let waiter = tokio::spawn({
            let signal = signal.clone();
            async move { signal.cancelled().await }
        });
        handle.cancel();
        waiter.await.unwrap();
        assert!(signal.is_cancelled());
        assert!(handle.signal().is_cancelled());
    }

    #[tokio::test]
    async fn test_never_stays_pending() {
        let signal = CancelSignal::never();
        let waited =
            tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;
        assert!(waited.is_err());
        assert!(!signal.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline() {
        let start = Instant::now();
        let budget = SearchBudget::unlimited().with_time_limit(Duration::from_secs(5));
        deadline_reached(budget.deadline(start)).await;
        assert!(Instant::now() >= start + Duration::from_secs(5));
    }
}
