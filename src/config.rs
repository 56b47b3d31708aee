// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search settings.
//!
//! Loaded from built-in defaults, then an optional file (any format the
//! `config` crate understands), then `ENIGMA_*` environment variables, e.g.
//! `ENIGMA_WORKERS=8` or `ENIGMA_ACCEPTANCE_THRESHOLD=0.7`.

use crate::error::{SearchError, SearchResult};
use crate::plausibility::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidates verified in parallel per wave.
    pub workers: usize,
    /// Candidates per scorer call.
    pub batch_size: usize,
    /// Scored candidates kept ranked ahead of verification. A key space of
    /// at most this many configurations is ranked in full before the first
    /// trial decryption.
    pub frontier: usize,
    /// Minimum plausibility for a trial decryption to be accepted.
    pub acceptance_threshold: f64,
    pub language: Language,
    /// Ciphertext letters the built-in scorer decrypts per candidate.
    pub scorer_prefix: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map_or(4, |n| n.get()),
            batch_size: 256,
            // Covers an Enigma I space with fixed rings (60 x 26^3 keys).
            frontier: 1 << 21,
            acceptance_threshold: 0.6,
            language: Language::German,
            scorer_prefix: 40,
        }
    }
}

impl SearchConfig {
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&SearchConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(config::Environment::with_prefix("ENIGMA").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.workers == 0 {
            return Err(SearchError::Settings("workers must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(SearchError::Settings("batch_size must be at least 1".into()));
        }
        if !self.acceptance_threshold.is_finite() {
            return Err(SearchError::Settings(format!(
                "acceptance_threshold {} is not a number",
                self.acceptance_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.workers >= 1);
        assert_eq!(config.acceptance_threshold, 0.6);
    }

    #[test]
    fn test_default_frontier_ranks_fixed_ring_space_in_full() {
        use crate::keyspace::KeySpace;
        use crate::machine::MachineModel;

        let space = KeySpace::builder(MachineModel::EnigmaI)
            .fixed_rings(vec![0, 0, 0])
            .build()
            .unwrap();
        assert!(space.len() <= SearchConfig::default().frontier as u128);
    }

    #[test]
    fn test_validate() {
        let config = SearchConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SearchError::Settings(_))));
        let config = SearchConfig {
            acceptance_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("enigma-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("search.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "batch_size = 32\nlanguage = \"english\"").unwrap();

        let config = SearchConfig::load(path.to_str()).unwrap();
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.frontier, SearchConfig::default().frontier);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = SearchConfig::load(Some("/nonexistent/enigma-search")).unwrap();
        assert_eq!(config.scorer_prefix, 40);
    }
}
