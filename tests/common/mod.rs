// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use enigma_search::catalog::RotorId;
use enigma_search::machine::window_setting;
use enigma_search::plausibility::Plausibility;
use enigma_search::scorer::{ScoreOutcome, Scorer};
use enigma_search::{
    encipher, parse_letters, KeySpace, Letter, MachineConfig, MachineModel, SearchConfig,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// A 40-letter German message; long enough that no wrong key in
/// [`small_space`] passes the default language check.
pub const WEATHER: &str = "WETTERBERICHTFUERDIENORDSEEHEUTEKEINREGEN";

/// The key used by the search scenarios: Enigma I, II-IV-I, rings AAA, QMC.
pub fn known_key() -> MachineConfig {
    MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::II, RotorId::IV, RotorId::I])
        .with_positions(window_setting("QMC").unwrap())
}

pub fn encrypt(plaintext: &str, key: &MachineConfig) -> Vec<Letter> {
    encipher(&parse_letters(plaintext).unwrap(), key).unwrap()
}

/// Two wheel orders (a decoy first, then the key's), rings fixed at AAA.
pub fn small_space() -> KeySpace {
    KeySpace::builder(MachineModel::EnigmaI)
        .rotor_orders(vec![
            vec![RotorId::I, RotorId::II, RotorId::III],
            known_key().rotors,
        ])
        .fixed_rings(vec![0, 0, 0])
        .build()
        .unwrap()
}

/// Default settings: the frontier covers all of [`small_space`].
pub fn default_settings(workers: usize) -> SearchConfig {
    SearchConfig {
        workers,
        ..SearchConfig::default()
    }
}

/// Settings with a frontier smaller than [`small_space`].
pub fn settings(workers: usize) -> SearchConfig {
    SearchConfig {
        workers,
        batch_size: 512,
        frontier: 4096,
        ..SearchConfig::default()
    }
}

/// Deterministic pseudo-random score in [0, 1) from the window letters.
pub fn noise(config: &MachineConfig) -> f64 {
    let p = &config.positions;
    let mix = p[0] as u64 * 31 + p[1] as u64 * 17 + p[2] as u64 * 7
        + config.rotors[0] as u64 * 3;
    (mix % 101) as f64 / 101.0
}

/// Wraps a scoring function and records how often each config was scored.
pub struct CountingScorer<F> {
    function: F,
    calls: Mutex<HashMap<MachineConfig, usize>>,
}

impl<F> CountingScorer<F>
where
    F: Fn(&MachineConfig) -> ScoreOutcome + Send + Sync,
{
    pub fn new(function: F) -> Self {
        Self {
            function,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self) -> HashMap<MachineConfig, usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> Scorer for CountingScorer<F>
where
    F: Fn(&MachineConfig) -> ScoreOutcome + Send + Sync,
{
    async fn score(&self, _ciphertext: &[Letter], config: &MachineConfig) -> ScoreOutcome {
        *self.calls.lock().unwrap().entry(config.clone()).or_insert(0) += 1;
        (self.function)(config)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// A scorer that never answers in time.
pub struct StalledScorer;

#[async_trait]
impl Scorer for StalledScorer {
    async fn score(&self, _ciphertext: &[Letter], _config: &MachineConfig) -> ScoreOutcome {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(0.0)
    }
}

/// Plausibility that rejects everything.
pub struct RejectAll;

impl Plausibility for RejectAll {
    fn plausibility(&self, _text: &[Letter]) -> f64 {
        -1.0
    }
}

/// Plausibility whose verification task dies.
pub struct Crashing;

impl Plausibility for Crashing {
    fn plausibility(&self, _text: &[Letter]) -> f64 {
        panic!("language model crashed");
    }
}
