use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Behavioral parameters of a CPU player.
///
/// Thresholds are compared against a hand-strength score in `[0, 1]`;
/// frequencies are probabilities in `[0, 1]`. The profile is fixed for the
/// lifetime of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub name: String,
    /// Minimum strength to continue when facing a bet
    pub play_hand_threshold: f64,
    /// Minimum strength to bet or raise for value
    pub raise_hand_threshold: f64,
    /// Chance of betting or raising with a hand below the play threshold
    pub bluffing_frequency: f64,
    /// Chance of betting or raising regardless of strength
    pub aggression_factor: f64,
    /// Lower bound of the fraction of the maximum raise to use
    pub min_raise_multiplier: f64,
    /// Upper bound of the fraction of the maximum raise to use
    pub max_raise_multiplier: f64,
}

impl AiProfile {
    pub fn validate(&self) -> Result<(), GameError> {
        let unit = [
            ("play_hand_threshold", self.play_hand_threshold),
            ("raise_hand_threshold", self.raise_hand_threshold),
            ("bluffing_frequency", self.bluffing_frequency),
            ("aggression_factor", self.aggression_factor),
        ];
        for (field, v) in unit {
            if !(0.0..=1.0).contains(&v) {
                return Err(GameError::Configuration(format!(
                    "profile '{}': {} must be within [0, 1], got {}",
                    self.name, field, v
                )));
            }
        }
        if self.min_raise_multiplier < 0.0 || self.min_raise_multiplier > self.max_raise_multiplier
        {
            return Err(GameError::Configuration(format!(
                "profile '{}': raise multipliers must satisfy 0 <= min <= max, got {}..{}",
                self.name, self.min_raise_multiplier, self.max_raise_multiplier
            )));
        }
        Ok(())
    }
}
