// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-exact Enigma simulator.
//!
//! A [`Machine`] is built from a [`MachineConfig`] and owns its rotor states.
//! Every candidate evaluation builds a fresh machine, so rotor offsets are
//! never shared between runs or threads.
//!
//! # Signal path
//!
//! ```text
//! key -> plugboard -> rightmost rotor ... leftmost rotor -> reflector
//!                                                             |
//! lamp <- plugboard <- rightmost rotor ... leftmost rotor <----+
//! ```
//!
//! Every stage is an involution when traversed symmetrically, so the machine
//! is self-reciprocal and no letter ever enciphers to itself.
//!
//! # Examples
//!
//! ```
//! use enigma_search::catalog::RotorId;
//! use enigma_search::machine::{encipher_str, MachineConfig, MachineModel};
//!
//! let config = MachineConfig::new(
//!     MachineModel::EnigmaI,
//!     vec![RotorId::I, RotorId::II, RotorId::III],
//! );
//! let ciphertext = encipher_str("AAAAA", &config).unwrap();
//! assert_eq!(ciphertext, "BDZGO");
//! assert_eq!(encipher_str(&ciphertext, &config).unwrap(), "AAAAA");
//! ```

pub mod config;
pub mod plugboard;
pub mod rotor;

pub use config::{window_setting, MachineConfig, MachineModel};
pub use plugboard::Plugboard;
pub use rotor::RotorState;

use crate::alphabet::{letters_to_string, parse_letters, Letter, ALPHABET_SIZE};
use crate::catalog::ReflectorSpec;
use crate::error::EnigmaResult;

/// A running machine: plugboard table, rotor stack and reflector.
#[derive(Debug, Clone)]
pub struct Machine {
    plugboard: [u8; ALPHABET_SIZE],
    /// Left to right, as in the config.
    rotors: Vec<RotorState>,
    reflector: &'static ReflectorSpec,
}

impl Machine {
    /// Validate `config` and set the machine to its starting positions.
    pub fn new(config: &MachineConfig) -> EnigmaResult<Self> {
        config.validate()?;
        let rotors = config
            .rotors
            .iter()
            .zip(config.rings.iter().zip(&config.positions))
            .map(|(id, (&ring, &offset))| RotorState::new(id.spec(), ring, offset))
            .collect();

        Ok(Self {
            plugboard: config.plugboard.table(),
            rotors,
            reflector: config.reflector.spec(),
        })
    }

    /// Advance the rotors before a key press.
    ///
    /// Only the three rightmost rotors step; the M4 thin rotor stays put.
    /// When the middle rotor sits on its own notch it steps together with the
    /// left rotor (the double-step anomaly), so it moves on two consecutive
    /// key presses.
    fn step(&mut self) {
        let n = self.rotors.len();
        let (left, middle, right) = (n - 3, n - 2, n - 1);

        if self.rotors[middle].at_notch() {
            self.rotors[middle].step();
            self.rotors[left].step();
        } else if self.rotors[right].at_notch() {
            self.rotors[middle].step();
        }
        self.rotors[right].step();
    }

    /// Press one key: step, then route the signal to the lamp.
    pub fn press(&mut self, letter: Letter) -> Letter {
        self.step();

        let mut contact = self.plugboard[letter.as_usize()];
        for rotor in self.rotors.iter().rev() {
            contact = rotor.forward(contact);
        }
        contact = self.reflector.reflect(contact);
        for rotor in &self.rotors {
            contact = rotor.backward(contact);
        }
        Letter::new(self.plugboard[contact as usize])
    }

    pub fn encipher_letters(&mut self, text: &[Letter]) -> Vec<Letter> {
        text.iter().map(|&letter| self.press(letter)).collect()
    }

    /// Letters currently showing in the windows, left to right.
    pub fn positions(&self) -> Vec<Letter> {
        self.rotors.iter().map(RotorState::window).collect()
    }
}

/// Encipher (or decipher) `text` from the starting state of `config`.
///
/// Stateless per call: a new machine is built each time, so the same config
/// always starts from the same positions.
pub fn encipher(text: &[Letter], config: &MachineConfig) -> EnigmaResult<Vec<Letter>> {
    let mut machine = Machine::new(config)?;
    Ok(machine.encipher_letters(text))
}

/// Like [`encipher`], for text given as a string of letters.
///
/// Rejects any non-letter character with `InvalidInput`.
pub fn encipher_str(text: &str, config: &MachineConfig) -> EnigmaResult<String> {
    let letters = parse_letters(text)?;
    encipher(&letters, config).map(|out| letters_to_string(&out))
}
