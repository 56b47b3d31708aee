// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Key-space completeness, uniqueness and indexing.

use enigma_search::catalog::{ReflectorId, RotorId};
use enigma_search::{KeySpace, MachineModel, Plugboard};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn test_enigma_i_count() {
    let space = KeySpace::new(MachineModel::EnigmaI);
    assert_eq!(space.len(), 60 * 26u128.pow(3) * 26u128.pow(3));
}

#[test]
fn test_m3_count_with_all_reflectors() {
    let space = KeySpace::builder(MachineModel::M3)
        .all_reflectors()
        .build()
        .unwrap();
    assert_eq!(space.len(), 2 * 336 * 26u128.pow(6));
}

#[test]
fn test_reduced_space_complete_and_unique() {
    let space = KeySpace::builder(MachineModel::EnigmaI)
        .rotor_orders(vec![vec![RotorId::V, RotorId::I, RotorId::III]])
        .reflectors(vec![ReflectorId::B, ReflectorId::C])
        .plugboards(vec![Plugboard::empty(), Plugboard::parse("AZ").unwrap()])
        .fixed_rings(vec![0, 0, 0])
        .build()
        .unwrap();
    assert_eq!(space.len(), 2 * 2 * 26u128.pow(3));

    let mut seen = HashSet::new();
    for (i, config) in space.iter().enumerate() {
        assert!(config.validate().is_ok());
        assert_eq!(space.index_of(&config), Some(i as u128));
        assert!(seen.insert(config));
    }
    assert_eq!(seen.len() as u128, space.len());

    // Every window setting appears under each plugboard and reflector.
    let windows: HashSet<Vec<u8>> = seen.iter().map(|c| c.positions.clone()).collect();
    assert_eq!(windows.len(), 26usize.pow(3));
}

#[test]
fn test_all_rotor_orders_once() {
    let space = KeySpace::builder(MachineModel::M4)
        .fixed_rings(vec![0, 0, 0, 0])
        .build()
        .unwrap();
    let per_order = 26u128.pow(4);
    let orders: HashSet<Vec<RotorId>> = (0..space.rotor_orders())
        .map(|o| space.get(o * per_order).unwrap().rotors)
        .collect();
    assert_eq!(orders.len(), 2 * 336);
}

#[test]
fn test_ordering_plugboard_outermost() {
    let space = KeySpace::builder(MachineModel::EnigmaI)
        .plugboards(vec![Plugboard::empty(), Plugboard::parse("QW").unwrap()])
        .all_reflectors()
        .build()
        .unwrap();
    let half = space.len() / 2;
    assert!(space.get(half - 1).unwrap().plugboard.is_empty());
    let second = space.get(half).unwrap();
    assert_eq!(second.plugboard.to_string(), "QW");
    assert_eq!(second.reflector, ReflectorId::A);
    assert_eq!(second.rotors, vec![RotorId::I, RotorId::II, RotorId::III]);
}

proptest! {
    #[test]
    fn prop_index_round_trip_enigma_i(index in 0u128..(60 * 26u128.pow(6))) {
        let space = KeySpace::new(MachineModel::EnigmaI);
        let config = space.get(index).unwrap();
        prop_assert!(config.validate().is_ok());
        prop_assert_eq!(space.index_of(&config), Some(index));
    }

    #[test]
    fn prop_index_round_trip_m4(index in 0u128..(2 * 336 * 26u128.pow(8))) {
        let space = KeySpace::new(MachineModel::M4);
        let config = space.get(index).unwrap();
        prop_assert!(config.validate().is_ok());
        prop_assert_eq!(space.index_of(&config), Some(index));
    }
}
