// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Plugboard (Steckerbrett): disjoint letter pairs swapped on the way in and out.

use crate::alphabet::{Letter, ALPHABET_SIZE};
use crate::error::{EnigmaError, EnigmaResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// At most 13 pairs fit on 26 letters.
pub const MAX_PAIRS: usize = ALPHABET_SIZE / 2;

/// A set of disjoint letter pairs.
///
/// Pairs are stored normalized (lower letter first, sorted), so two plugboards
/// with the same wiring compare and hash equal however they were written.
/// Serialized as the conventional space-separated string, e.g. `"AB CD"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plugboard {
    pairs: Vec<(Letter, Letter)>,
}

impl Plugboard {
    /// The empty plugboard: every letter maps to itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a plugboard from letter pairs.
    ///
    /// Fails with `InvalidConfig` for a letter paired with itself, a letter
    /// used in two pairs, or more than 13 pairs.
    pub fn new(pairs: &[(Letter, Letter)]) -> EnigmaResult<Self> {
        if pairs.len() > MAX_PAIRS {
            return Err(EnigmaError::config(format!(
                "plugboard has {} pairs (max {})",
                pairs.len(),
                MAX_PAIRS
            )));
        }

        let mut used = [false; ALPHABET_SIZE];
        let mut normalized = Vec::with_capacity(pairs.len());
        for &(a, b) in pairs {
            if a == b {
                return Err(EnigmaError::config(format!("plugboard pairs {} with itself", a)));
            }
            for letter in [a, b] {
                if used[letter.as_usize()] {
                    return Err(EnigmaError::config(format!(
                        "plugboard uses {} more than once",
                        letter
                    )));
                }
                used[letter.as_usize()] = true;
            }
            normalized.push((a.min(b), a.max(b)));
        }
        normalized.sort();

        Ok(Self { pairs: normalized })
    }

    /// Parse the conventional notation: whitespace-separated two-letter pairs.
    ///
    /// ```
    /// use enigma_search::machine::Plugboard;
    ///
    /// let board = Plugboard::parse("ab ZY").unwrap();
    /// assert_eq!(board.to_string(), "AB YZ");
    /// assert!(Plugboard::parse("AB BC").is_err());
    /// ```
    pub fn parse(text: &str) -> EnigmaResult<Self> {
        let mut pairs = Vec::new();
        for token in text.split_whitespace() {
            let letters: Vec<char> = token.chars().collect();
            let [a, b] = letters[..] else {
                return Err(EnigmaError::config(format!(
                    "plugboard pair {:?} is not two letters",
                    token
                )));
            };
            let a = Letter::from_char(a)
                .ok_or_else(|| EnigmaError::config(format!("plugboard pair {:?}", token)))?;
            let b = Letter::from_char(b)
                .ok_or_else(|| EnigmaError::config(format!("plugboard pair {:?}", token)))?;
            pairs.push((a, b));
        }
        Self::new(&pairs)
    }

    pub fn pairs(&self) -> &[(Letter, Letter)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Full substitution table; an involution by construction.
    pub fn table(&self) -> [u8; ALPHABET_SIZE] {
        let mut table = [0u8; ALPHABET_SIZE];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for &(a, b) in &self.pairs {
            table[a.as_usize()] = b.value();
            table[b.as_usize()] = a.value();
        }
        table
    }
}

impl fmt::Display for Plugboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (a, b)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{}", a, b)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Plugboard {
    type Error = EnigmaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Plugboard> for String {
    fn from(board: Plugboard) -> Self {
        board.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_empty_is_identity() {
        let board = Plugboard::empty();
        for (i, &mapped) in board.table().iter().enumerate() {
            assert_eq!(mapped as usize, i);
        }
    }

    #[test]
    fn test_table_is_involution() {
        let board = Plugboard::parse("AZ BY CX").unwrap();
        let table = board.table();
        assert_eq!(table[letter('A').as_usize()], letter('Z').value());
        assert_eq!(table[letter('Z').as_usize()], letter('A').value());
        assert_eq!(table[letter('M').as_usize()], letter('M').value());
        for i in 0..ALPHABET_SIZE {
            assert_eq!(table[table[i] as usize] as usize, i);
        }
    }

    #[test]
    fn test_normalized_equality() {
        let a = Plugboard::parse("BA DC").unwrap();
        let b = Plugboard::parse("CD AB").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_self_pair() {
        assert!(Plugboard::parse("AA").is_err());
    }

    #[test]
    fn test_rejects_reused_letter() {
        assert!(Plugboard::parse("AB CA").is_err());
    }

    #[test]
    fn test_rejects_malformed_token() {
        assert!(Plugboard::parse("ABC").is_err());
        assert!(Plugboard::parse("A1").is_err());
    }

    #[test]
    fn test_full_board() {
        let board = Plugboard::parse("AB CD EF GH IJ KL MN OP QR ST UV WX YZ").unwrap();
        assert_eq!(board.pairs().len(), MAX_PAIRS);
    }

    #[test]
    fn test_serde_as_string() {
        let board = Plugboard::parse("QW ER").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"ER QW\"");
        let back: Plugboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Plugboard>("\"AA\"").is_err());
    }
}
