// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Simulator tests: published messages and algebraic properties.

use enigma_search::alphabet::letters_to_string;
use enigma_search::catalog::{ReflectorId, RotorId};
use enigma_search::machine::window_setting;
use enigma_search::{
    encipher, encipher_str, EnigmaError, Letter, MachineConfig, MachineModel, Plugboard,
};
use proptest::prelude::*;

/// Operation Barbarossa, 1941, first part.
#[test]
fn test_barbarossa_message() {
    let config = MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::II, RotorId::IV, RotorId::V])
        .with_reflector(ReflectorId::B)
        .with_rings(window_setting("BUL").unwrap())
        .with_positions(window_setting("BLA").unwrap())
        .with_plugboard(Plugboard::parse("AV BS CG DL FU HZ IN KM OW RX").unwrap());

    let ciphertext = "EDPUDNRGYSZRCXNUYTPOMRMBOFKTBZREZKMLXLVEFGUEYSIOZVEQMIKUBPMMYLKLTTDEISMDICAGYKUACTCDOMOHWXMUUIAUBSTSLRNBZSZWNRFXWFYSSXJZVIJHIDISHPRKLKAYUPADTXQSPINQMATLPIFSVKDASCTACDPBOPVHJK";
    let plaintext = encipher_str(ciphertext, &config).unwrap();
    assert_eq!(
        plaintext,
        "AUFKLXABTEILUNGXVONXKURTINOWAXKURTINOWAXNORDWESTLXSEBEZXSEBEZXUAFFLIEGERSTRASZERIQTUNGXDUBROWKIXDUBROWKIXOPOTSCHKAXOPOTSCHKAXUMXEINSAQTDREINULLXUHRANGETRETENXANGRIFFXINFXRGTX"
    );
}

#[test]
fn test_lowercase_input() {
    let config = MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::I, RotorId::II, RotorId::III]);
    assert_eq!(encipher_str("aaaaa", &config).unwrap(), "BDZGO");
}

#[test]
fn test_malformed_plugboards() {
    assert!(matches!(Plugboard::parse("AA"), Err(EnigmaError::InvalidConfig(_))));
    assert!(Plugboard::parse("AB AC").is_err());
    assert!(Plugboard::parse("AB CD EF GH IJ KL MN OP QR ST UV WX YZ").is_ok());
}

fn model_strategy() -> impl Strategy<Value = MachineModel> {
    prop_oneof![
        Just(MachineModel::EnigmaI),
        Just(MachineModel::M3),
        Just(MachineModel::M4),
    ]
}

/// Any valid configuration: rotors drawn without repetition, any rings,
/// positions, reflector and up to 13 plugboard pairs.
fn config_strategy() -> impl Strategy<Value = MachineConfig> {
    model_strategy().prop_flat_map(|model| {
        let stepping = model.stepping_rotors().to_vec();
        let thin = model.thin_rotors().to_vec();
        let reflectors = model.reflectors().to_vec();
        let slots = model.rotor_count();
        (
            Just(model),
            Just(stepping.clone()).prop_shuffle(),
            0..thin.len().max(1),
            prop::sample::select(reflectors),
            prop::collection::vec(0u8..26, slots),
            prop::collection::vec(0u8..26, slots),
            Just((0u8..26).collect::<Vec<_>>()).prop_shuffle(),
            0usize..=13,
        )
            .prop_map(move |(model, shuffled, t, reflector, rings, positions, letters, pairs)| {
                let mut rotors = Vec::new();
                if !thin.is_empty() {
                    rotors.push(thin[t]);
                }
                rotors.extend_from_slice(&shuffled[..3]);
                let pairs: Vec<(Letter, Letter)> = letters
                    .chunks(2)
                    .take(pairs)
                    .map(|p| (Letter::new(p[0]), Letter::new(p[1])))
                    .collect();
                MachineConfig::new(model, rotors)
                    .with_reflector(reflector)
                    .with_rings(rings)
                    .with_positions(positions)
                    .with_plugboard(Plugboard::new(&pairs).unwrap())
            })
    })
}

fn text_strategy() -> impl Strategy<Value = Vec<Letter>> {
    prop::collection::vec((0u8..26).prop_map(Letter::new), 0..200)
}

proptest! {
    #[test]
    fn prop_self_reciprocal(config in config_strategy(), text in text_strategy()) {
        let ciphertext = encipher(&text, &config).unwrap();
        prop_assert_eq!(encipher(&ciphertext, &config).unwrap(), text);
    }

    #[test]
    fn prop_no_letter_maps_to_itself(config in config_strategy(), text in text_strategy()) {
        let ciphertext = encipher(&text, &config).unwrap();
        prop_assert_eq!(ciphertext.len(), text.len());
        for (p, c) in text.iter().zip(&ciphertext) {
            prop_assert_ne!(p, c);
        }
    }

    #[test]
    fn prop_deterministic(config in config_strategy(), text in text_strategy()) {
        let first = letters_to_string(&encipher(&text, &config).unwrap());
        let second = letters_to_string(&encipher(&text, &config).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_config_serde_round_trip(config in config_strategy()) {
        let json = serde_json::to_string(&config).unwrap();
        let back: MachineConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, config);
    }
}
