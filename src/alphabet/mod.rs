// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Letters of the 26-letter Enigma alphabet.
//!
//! # Examples
//!
//! ```
//! use enigma_search::alphabet::{parse_letters, letters_to_string, Letter};
//!
//! let text = parse_letters("Hello").unwrap();
//! assert_eq!(text[0], Letter::new(7));
//! assert_eq!(letters_to_string(&text), "HELLO");
//! assert!(parse_letters("HI THERE").is_err());
//! ```

use crate::error::{EnigmaError, EnigmaResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of letters on the keyboard and around each rotor.
pub const ALPHABET_SIZE: usize = 26;

/// A letter in the range 0..26 (A = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Letter(u8);

impl Letter {
    /// Create a new letter, panicking if out of range.
    ///
    /// # Panics
    ///
    /// Panics if `value >= 26`.
    pub const fn new(value: u8) -> Self {
        assert!((value as usize) < ALPHABET_SIZE, "Letter out of range");
        Self(value)
    }

    /// Try to create a new letter, returning None if out of range.
    pub const fn try_new(value: u8) -> Option<Self> {
        if (value as usize) < ALPHABET_SIZE {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Convert an ASCII letter of either case.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Self(c.to_ascii_uppercase() as u8 - b'A'))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// All 26 letters in order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET_SIZE as u8).map(Letter)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse text into letters, case-insensitively.
///
/// Anything other than A-Z/a-z (including whitespace) is rejected: stripping
/// punctuation is the caller's job.
pub fn parse_letters(text: &str) -> EnigmaResult<Vec<Letter>> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            Letter::from_char(character)
                .ok_or(EnigmaError::InvalidInput { character, position })
        })
        .collect()
}

pub fn letters_to_string(letters: &[Letter]) -> String {
    letters.iter().map(|l| l.to_char()).collect()
}
