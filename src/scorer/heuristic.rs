// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A model-free scorer: decrypt a prefix and measure its language fit.

use super::{ScoreOutcome, Scorer};
use crate::alphabet::Letter;
use crate::error::ScoreError;
use crate::machine::{encipher, MachineConfig};
use crate::plausibility::{Language, LanguageModel, Plausibility};
use async_trait::async_trait;
use std::sync::Arc;

/// Scores a candidate by the plausibility of its decryption of the first
/// `prefix` ciphertext letters.
///
/// This stands in for a learned model. It is much weaker on short prefixes
/// (the search still verifies on the full text).
#[derive(Debug, Clone)]
pub struct TrialDecryptionScorer {
    model: Arc<LanguageModel>,
    prefix: usize,
}

impl TrialDecryptionScorer {
    pub fn new(language: Language, prefix: usize) -> Self {
        Self {
            model: Arc::new(LanguageModel::new(language)),
            prefix: prefix.max(1),
        }
    }

    fn score_one(model: &LanguageModel, prefix: &[Letter], config: &MachineConfig) -> ScoreOutcome {
        let plaintext = encipher(prefix, config).map_err(|e| ScoreError::Failed(e.to_string()))?;
        Ok(model.plausibility(&plaintext))
    }

    fn prefix<'a>(&self, ciphertext: &'a [Letter]) -> &'a [Letter] {
        &ciphertext[..ciphertext.len().min(self.prefix)]
    }
}

#[async_trait]
impl Scorer for TrialDecryptionScorer {
    async fn score(&self, ciphertext: &[Letter], config: &MachineConfig) -> ScoreOutcome {
        Self::score_one(&self.model, self.prefix(ciphertext), config)
    }

    /// Runs the whole batch on the blocking pool.
    async fn score_batch(
        &self,
        ciphertext: &[Letter],
        configs: &[MachineConfig],
    ) -> Vec<ScoreOutcome> {
        let model = Arc::clone(&self.model);
        let prefix = self.prefix(ciphertext).to_vec();
        let configs = configs.to_vec();
        let count = configs.len();

        let work = tokio::task::spawn_blocking(move || {
            configs
                .iter()
                .map(|config| Self::score_one(&model, &prefix, config))
                .collect::<Vec<_>>()
        });
        match work.await {
            Ok(scores) => scores,
            Err(e) => vec![Err(ScoreError::Failed(e.to_string())); count],
        }
    }

    fn name(&self) -> &str {
        "trial-decryption"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::parse_letters;
    use crate::catalog::RotorId;
    use crate::machine::{window_setting, MachineModel};

    #[tokio::test]
    async fn test_true_key_outscores_neighbours() {
        let key = MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::II, RotorId::IV, RotorId::I])
            .with_positions(window_setting("QMB").unwrap());
        let plaintext = parse_letters("WETTERBERICHTFUERDIENORDSEEHEUTEKEINREGEN").unwrap();
        let ciphertext = encipher(&plaintext, &key).unwrap();

        let scorer = TrialDecryptionScorer::new(Language::German, 40);
        let wrong = key.clone().with_positions(window_setting("QMC").unwrap());
        let scores = scorer.score_batch(&ciphertext, &[key.clone(), wrong]).await;

        let right = scores[0].clone().unwrap();
        assert!(right > 0.6);
        assert!(right > scores[1].clone().unwrap());
        assert_eq!(scorer.score(&ciphertext, &key).await, Ok(right));
    }

    #[tokio::test]
    async fn test_invalid_config_is_a_failure() {
        let bad = MachineConfig::new(MachineModel::EnigmaI, vec![RotorId::I]);
        let scorer = TrialDecryptionScorer::new(Language::German, 10);
        let letters = parse_letters("ABC").unwrap();
        assert!(matches!(
            scorer.score(&letters, &bad).await,
            Err(ScoreError::Failed(_))
        ));
    }
}
