// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Historical rotor and reflector catalog.
//!
//! All wiring tables are built at compile time into `static` arrays, so the
//! catalog is shared read-only by every thread without initialization.
//! A malformed wiring string (not a permutation, or a reflector with a fixed
//! point) fails const evaluation and therefore the build.
//!
//! # Examples
//!
//! ```
//! use enigma_search::catalog::{ReflectorId, RotorId};
//!
//! let rotor = RotorId::I.spec();
//! assert_eq!(rotor.forward(0), 4);   // A -> E
//! assert!(rotor.is_notch(16));       // turnover at Q
//! assert_eq!(ReflectorId::B.spec().reflect(0), 24); // A <-> Y
//! ```

mod wiring;

use crate::alphabet::ALPHABET_SIZE;
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

/// Identity of a rotor from the catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCountMacro,
)]
#[strum(ascii_case_insensitive)]
pub enum RotorId {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    /// Thin rotor for the M4 leftmost slot.
    Beta,
    /// Thin rotor for the M4 leftmost slot.
    Gamma,
}

impl RotorId {
    pub fn spec(self) -> &'static RotorSpec {
        &ROTORS[self as usize]
    }
}

/// Identity of a reflector (Umkehrwalze) from the catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCountMacro,
)]
#[strum(ascii_case_insensitive)]
pub enum ReflectorId {
    A,
    B,
    C,
    #[strum(to_string = "B-thin", serialize = "BThin")]
    BThin,
    #[strum(to_string = "C-thin", serialize = "CThin")]
    CThin,
}

impl ReflectorId {
    pub fn spec(self) -> &'static ReflectorSpec {
        &REFLECTORS[self as usize]
    }
}

/// Immutable description of one rotor: wiring, its inverse, and notches.
#[derive(Debug)]
pub struct RotorSpec {
    id: RotorId,
    forward: [u8; ALPHABET_SIZE],
    backward: [u8; ALPHABET_SIZE],
    /// Bit `i` is set when the rotor carries a turnover notch at window letter `i`.
    notches: u32,
}

impl RotorSpec {
    const fn new(id: RotorId, wiring: &[u8; ALPHABET_SIZE], notch_letters: &[u8]) -> Self {
        let mut forward = [0u8; ALPHABET_SIZE];
        let mut backward = [0u8; ALPHABET_SIZE];
        let mut seen = 0u32;
        let mut i = 0;
        while i < ALPHABET_SIZE {
            let out = wiring[i] - b'A';
            assert!((out as usize) < ALPHABET_SIZE, "wiring letter out of range");
            assert!(seen & (1 << out) == 0, "rotor wiring is not a permutation");
            seen |= 1 << out;
            forward[i] = out;
            backward[out as usize] = i as u8;
            i += 1;
        }

        let mut notches = 0u32;
        let mut n = 0;
        while n < notch_letters.len() {
            notches |= 1 << (notch_letters[n] - b'A');
            n += 1;
        }

        Self {
            id,
            forward,
            backward,
            notches,
        }
    }

    pub fn id(&self) -> RotorId {
        self.id
    }

    /// Wiring from the entry side towards the reflector, at zero alignment.
    pub fn forward(&self, contact: u8) -> u8 {
        self.forward[contact as usize]
    }

    /// Wiring from the reflector side back towards the entry.
    pub fn backward(&self, contact: u8) -> u8 {
        self.backward[contact as usize]
    }

    /// Whether the rotor, showing `position` in its window, is on a turnover notch.
    pub fn is_notch(&self, position: u8) -> bool {
        (self.notches >> position) & 1 != 0
    }

    pub fn has_notches(&self) -> bool {
        self.notches != 0
    }
}

/// Immutable description of a reflector: an involution with no fixed points.
#[derive(Debug)]
pub struct ReflectorSpec {
    id: ReflectorId,
    wiring: [u8; ALPHABET_SIZE],
}

impl ReflectorSpec {
    const fn new(id: ReflectorId, wiring: &[u8; ALPHABET_SIZE]) -> Self {
        let mut table = [0u8; ALPHABET_SIZE];
        let mut i = 0;
        while i < ALPHABET_SIZE {
            table[i] = wiring[i] - b'A';
            i += 1;
        }
        let mut i = 0;
        while i < ALPHABET_SIZE {
            assert!(table[i] as usize != i, "reflector has a fixed point");
            assert!(table[table[i] as usize] as usize == i, "reflector is not an involution");
            i += 1;
        }
        Self { id, wiring: table }
    }

    pub fn id(&self) -> ReflectorId {
        self.id
    }

    pub fn reflect(&self, contact: u8) -> u8 {
        self.wiring[contact as usize]
    }
}

static ROTORS: [RotorSpec; RotorId::COUNT] = [
    RotorSpec::new(RotorId::I, wiring::ROTOR_I, b"Q"),
    RotorSpec::new(RotorId::II, wiring::ROTOR_II, b"E"),
    RotorSpec::new(RotorId::III, wiring::ROTOR_III, b"V"),
    RotorSpec::new(RotorId::IV, wiring::ROTOR_IV, b"J"),
    RotorSpec::new(RotorId::V, wiring::ROTOR_V, b"Z"),
    RotorSpec::new(RotorId::VI, wiring::ROTOR_VI, b"ZM"),
    RotorSpec::new(RotorId::VII, wiring::ROTOR_VII, b"ZM"),
    RotorSpec::new(RotorId::VIII, wiring::ROTOR_VIII, b"ZM"),
    RotorSpec::new(RotorId::Beta, wiring::ROTOR_BETA, b""),
    RotorSpec::new(RotorId::Gamma, wiring::ROTOR_GAMMA, b""),
];

static REFLECTORS: [ReflectorSpec; ReflectorId::COUNT] = [
    ReflectorSpec::new(ReflectorId::A, wiring::REFLECTOR_A),
    ReflectorSpec::new(ReflectorId::B, wiring::REFLECTOR_B),
    ReflectorSpec::new(ReflectorId::C, wiring::REFLECTOR_C),
    ReflectorSpec::new(ReflectorId::BThin, wiring::REFLECTOR_B_THIN),
    ReflectorSpec::new(ReflectorId::CThin, wiring::REFLECTOR_C_THIN),
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_catalog_indexed_by_id() {
        for id in RotorId::iter() {
            assert_eq!(id.spec().id(), id);
        }
        for id in ReflectorId::iter() {
            assert_eq!(id.spec().id(), id);
        }
    }

    #[test]
    fn test_forward_backward_inverse() {
        for id in RotorId::iter() {
            let spec = id.spec();
            for c in 0..ALPHABET_SIZE as u8 {
                assert_eq!(spec.backward(spec.forward(c)), c, "{}", id);
            }
        }
    }

    #[test]
    fn test_notches() {
        assert!(RotorId::II.spec().is_notch(4)); // E
        assert!(RotorId::III.spec().is_notch(21)); // V
        let six = RotorId::VI.spec();
        assert!(six.is_notch(25) && six.is_notch(12));
        assert!(!six.is_notch(0));
        assert!(!RotorId::Beta.spec().has_notches());
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("iii".parse::<RotorId>().unwrap(), RotorId::III);
        assert_eq!("beta".parse::<RotorId>().unwrap(), RotorId::Beta);
        assert_eq!("B-thin".parse::<ReflectorId>().unwrap(), ReflectorId::BThin);
        assert!("IX".parse::<RotorId>().is_err());
    }
}
