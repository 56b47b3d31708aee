// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enigma simulator and score-guided key search.
//!
//! # Architecture
//!
//! The crate is built in two tiers.
//!
//! ## Tier 1: Simulator (immutable catalog, per-run state)
//!
//! - [`catalog`]: historical rotor and reflector wirings, built at compile
//!   time and shared read-only.
//! - [`machine`]: plugboard, rotor stack with the double-step anomaly, and the
//!   reflector. A [`Machine`] is built fresh for every encipherment, so rotor
//!   state is never shared.
//!
//! ## Tier 2: Search (async, parallel)
//!
//! - [`keyspace`]: a finite, indexable enumeration of configurations.
//! - [`scorer`]: the async seam for a learned model, plus adapters.
//! - [`plausibility`]: the language test that accepts a trial decryption.
//! - [`search`]: the controller that ranks with the scorer and verifies the
//!   top candidates in parallel within a budget.
//!
//! # Search Algorithm
//!
//! The scorer decides the order in which keys are tried; trial decryption
//! decides which key is right. A scorer that ranks the true key first makes
//! the search finish after one verification. A useless scorer only costs
//! time: the run degrades to a lexicographic walk of the key space.
//!
//! # References
//!
//! - Hamer, D. H. (1997). "Enigma: Actions involved in the 'double stepping'
//!   of the middle rotor." Cryptologia 21(1).

pub mod alphabet;
pub mod catalog;
pub mod config;
pub mod error;
pub mod keyspace;
pub mod machine;
pub mod plausibility;
pub mod scorer;
pub mod search;

// Re-export commonly used types
pub use alphabet::{parse_letters, Letter};
pub use config::SearchConfig;
pub use error::{EnigmaError, ScoreError, SearchError};
pub use keyspace::KeySpace;
pub use machine::{encipher, encipher_str, Machine, MachineConfig, MachineModel, Plugboard};
pub use scorer::{FnScorer, Scorer, TrialDecryptionScorer};
pub use search::{SearchBudget, SearchController, SearchOutcome, SearchStatus};
