// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Machine models and machine configurations (the key).

use crate::alphabet::{Letter, ALPHABET_SIZE};
use crate::catalog::{ReflectorId, RotorId};
use crate::error::{EnigmaError, EnigmaResult};
use crate::machine::Plugboard;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// A historical machine model, which fixes the rotor count and the legal
/// rotors and reflectors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum MachineModel {
    /// Army and air force Enigma I: three of rotors I-V, reflector A, B or C.
    #[default]
    #[strum(to_string = "EnigmaI", serialize = "I")]
    EnigmaI,
    /// Naval M3: three of rotors I-VIII, reflector B or C.
    M3,
    /// Naval M4: thin rotor Beta/Gamma plus three of I-VIII, thin reflector.
    M4,
}

const ENIGMA_I_ROTORS: [RotorId; 5] = [RotorId::I, RotorId::II, RotorId::III, RotorId::IV, RotorId::V];
const NAVAL_ROTORS: [RotorId; 8] = [
    RotorId::I,
    RotorId::II,
    RotorId::III,
    RotorId::IV,
    RotorId::V,
    RotorId::VI,
    RotorId::VII,
    RotorId::VIII,
];
const THIN_ROTORS: [RotorId; 2] = [RotorId::Beta, RotorId::Gamma];

impl MachineModel {
    /// Number of rotor slots.
    pub fn rotor_count(self) -> usize {
        match self {
            MachineModel::EnigmaI | MachineModel::M3 => 3,
            MachineModel::M4 => 4,
        }
    }

    /// Rotors that fit the three stepping slots.
    pub fn stepping_rotors(self) -> &'static [RotorId] {
        match self {
            MachineModel::EnigmaI => &ENIGMA_I_ROTORS,
            MachineModel::M3 | MachineModel::M4 => &NAVAL_ROTORS,
        }
    }

    /// Rotors that fit the non-stepping leftmost slot (M4 only).
    pub fn thin_rotors(self) -> &'static [RotorId] {
        match self {
            MachineModel::M4 => &THIN_ROTORS,
            _ => &[],
        }
    }

    pub fn reflectors(self) -> &'static [ReflectorId] {
        match self {
            MachineModel::EnigmaI => &[ReflectorId::A, ReflectorId::B, ReflectorId::C],
            MachineModel::M3 => &[ReflectorId::B, ReflectorId::C],
            MachineModel::M4 => &[ReflectorId::BThin, ReflectorId::CThin],
        }
    }

    pub fn default_reflector(self) -> ReflectorId {
        match self {
            MachineModel::M4 => ReflectorId::BThin,
            _ => ReflectorId::B,
        }
    }

    /// Rotors legal in slot `slot` (0 = leftmost).
    pub fn rotors_for_slot(self, slot: usize) -> &'static [RotorId] {
        if self == MachineModel::M4 && slot == 0 {
            self.thin_rotors()
        } else {
            self.stepping_rotors()
        }
    }
}

/// A complete key: everything needed to reproduce a message's encipherment.
///
/// Rotors, rings and positions are listed left to right as they appear in the
/// machine's windows. The signal enters at the rightmost rotor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MachineConfig {
    pub model: MachineModel,
    pub reflector: ReflectorId,
    pub rotors: Vec<RotorId>,
    /// Ring settings (Ringstellung), 0 = A.
    pub rings: Vec<u8>,
    /// Starting window letters (Grundstellung), 0 = A.
    pub positions: Vec<u8>,
    pub plugboard: Plugboard,
}

impl MachineConfig {
    /// A config with the model's default reflector, rings and positions at A,
    /// and an empty plugboard. Not validated until [`validate`](Self::validate)
    /// or [`Machine::new`](crate::machine::Machine::new).
    pub fn new(model: MachineModel, rotors: Vec<RotorId>) -> Self {
        let n = rotors.len();
        Self {
            model,
            reflector: model.default_reflector(),
            rotors,
            rings: vec![0; n],
            positions: vec![0; n],
            plugboard: Plugboard::empty(),
        }
    }

    pub fn with_reflector(mut self, reflector: ReflectorId) -> Self {
        self.reflector = reflector;
        self
    }

    pub fn with_rings(mut self, rings: Vec<u8>) -> Self {
        self.rings = rings;
        self
    }

    pub fn with_positions(mut self, positions: Vec<u8>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_plugboard(mut self, plugboard: Plugboard) -> Self {
        self.plugboard = plugboard;
        self
    }

    /// Check every invariant of the model.
    pub fn validate(&self) -> EnigmaResult<()> {
        let count = self.model.rotor_count();
        if self.rotors.len() != count {
            return Err(EnigmaError::config(format!(
                "{} takes {} rotors, got {}",
                self.model,
                count,
                self.rotors.len()
            )));
        }
        if self.rings.len() != count || self.positions.len() != count {
            return Err(EnigmaError::config(format!(
                "expected {} ring settings and positions, got {} and {}",
                count,
                self.rings.len(),
                self.positions.len()
            )));
        }
        for (slot, rotor) in self.rotors.iter().enumerate() {
            if !self.model.rotors_for_slot(slot).contains(rotor) {
                return Err(EnigmaError::config(format!(
                    "rotor {} does not fit slot {} of {}",
                    rotor, slot, self.model
                )));
            }
            if self.rotors[..slot].contains(rotor) {
                return Err(EnigmaError::config(format!("rotor {} used twice", rotor)));
            }
        }
        if !self.model.reflectors().contains(&self.reflector) {
            return Err(EnigmaError::config(format!(
                "reflector {} does not fit {}",
                self.reflector, self.model
            )));
        }
        if let Some(bad) = self
            .rings
            .iter()
            .chain(&self.positions)
            .find(|&&v| v as usize >= ALPHABET_SIZE)
        {
            return Err(EnigmaError::config(format!("setting {} out of range", bad)));
        }
        Ok(())
    }
}

/// Parse a window or ring setting written as letters, e.g. `"ADU"`.
pub fn window_setting(text: &str) -> EnigmaResult<Vec<u8>> {
    text.chars()
        .map(|c| {
            Letter::from_char(c)
                .map(Letter::value)
                .ok_or_else(|| EnigmaError::config(format!("setting {:?} is not letters", text)))
        })
        .collect()
}

fn write_letters(f: &mut fmt::Formatter<'_>, values: &[u8]) -> fmt::Result {
    for &v in values {
        match Letter::try_new(v) {
            Some(letter) => write!(f, "{}", letter)?,
            None => write!(f, "?")?,
        }
    }
    Ok(())
}

impl fmt::Display for MachineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} UKW-{} ", self.model, self.reflector)?;
        for (i, rotor) in self.rotors.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", rotor)?;
        }
        write!(f, " rings ")?;
        write_letters(f, &self.rings)?;
        write!(f, " pos ")?;
        write_letters(f, &self.positions)?;
        if !self.plugboard.is_empty() {
            write!(f, " plugs {}", self.plugboard)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enigma_i() -> MachineConfig {
        MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::I, RotorId::II, RotorId::III])
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(enigma_i().validate().is_ok());
    }

    #[test]
    fn test_wrong_rotor_count() {
        let config = MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::I, RotorId::II]);
        assert!(matches!(config.validate(), Err(EnigmaError::InvalidConfig(_))));
    }

    #[test]
    fn test_repeated_rotor() {
        let config =
            MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::I, RotorId::I, RotorId::III]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rotor_not_in_model() {
        let config =
            MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::VI, RotorId::I, RotorId::III]);
        assert!(config.validate().is_err());
        let config = MachineConfig::new(
            MachineModel::M4,
            vec![RotorId::I, RotorId::II, RotorId::III, RotorId::IV],
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reflector_not_in_model() {
        assert!(enigma_i().with_reflector(ReflectorId::BThin).validate().is_err());
        let m4 = MachineConfig::new(
            MachineModel::M4,
            vec![RotorId::Beta, RotorId::II, RotorId::IV, RotorId::I],
        );
        assert!(m4.clone().validate().is_ok());
        assert!(m4.with_reflector(ReflectorId::B).validate().is_err());
    }

    #[test]
    fn test_setting_out_of_range() {
        assert!(enigma_i().with_positions(vec![0, 26, 0]).validate().is_err());
        assert!(enigma_i().with_rings(vec![0, 0]).validate().is_err());
    }

    #[test]
    fn test_window_setting() {
        assert_eq!(window_setting("adu").unwrap(), vec![0, 3, 20]);
        assert!(window_setting("A-B").is_err());
    }

    #[test]
    fn test_display() {
        let config = enigma_i()
            .with_positions(window_setting("ADU").unwrap())
            .with_plugboard(Plugboard::parse("AB").unwrap());
        assert_eq!(config.to_string(), "EnigmaI UKW-B I-II-III rings AAA pos ADU plugs AB");
    }
}
