// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the simulator, scorer and search controller.
//!
//! Budget exhaustion and cancellation are not errors: they are terminal
//! statuses of a search run, see [`crate::search::SearchStatus`].

use thiserror::Error;

/// Errors raised by the simulator for malformed text or keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Text contained a character outside A-Z/a-z.
    #[error("invalid input: {character:?} at position {position} is not a letter")]
    InvalidInput { character: char, position: usize },

    /// A machine configuration violated the model's rules.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EnigmaError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        EnigmaError::InvalidConfig(message.into())
    }
}

/// Failure of the external scoring function for one candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// The scorer reported an error (model serving failure, timeout, ...).
    #[error("scorer failed: {0}")]
    Failed(String),

    /// The scorer returned NaN or an infinity.
    #[error("scorer returned out-of-range value {0}")]
    OutOfRange(f64),

    /// A batch call returned the wrong number of scores.
    #[error("scorer returned {got} scores for a batch of {expected}")]
    BatchShape { expected: usize, got: usize },
}

/// Errors that stop a search before it starts.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Enigma(#[from] EnigmaError),

    #[error("empty ciphertext")]
    EmptyCiphertext,

    #[error("invalid search settings: {0}")]
    Settings(String),
}

pub type EnigmaResult<T> = Result<T, EnigmaError>;
pub type SearchResult<T> = Result<T, SearchError>;
