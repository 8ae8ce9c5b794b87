//! Difficulty presets and the named CPU profiles behind them.

use std::fmt;
use std::str::FromStr;

use pls7_engine::profile::AiProfile;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Profiles handed out to CPU seats, in seat order.
    pub fn profiles(self) -> Vec<AiProfile> {
        match self {
            Difficulty::Easy => vec![
                profile("Calling Station", 0.10, 0.85, 0.01, 0.05, 0.2, 0.4),
                profile("Loose-Passive", 0.20, 0.80, 0.03, 0.10, 0.2, 0.5),
                profile("Timid", 0.35, 0.90, 0.00, 0.02, 0.1, 0.3),
            ],
            Difficulty::Medium => vec![
                profile("Tight-Passive", 0.40, 0.80, 0.03, 0.10, 0.3, 0.5),
                profile("Loose-Aggressive", 0.25, 0.60, 0.12, 0.30, 0.4, 0.8),
                profile("Tight-Aggressive", 0.45, 0.65, 0.06, 0.25, 0.4, 0.7),
                profile("Loose-Passive", 0.20, 0.75, 0.04, 0.12, 0.2, 0.5),
            ],
            Difficulty::Hard => vec![
                profile("Tight-Aggressive", 0.50, 0.62, 0.08, 0.30, 0.5, 0.8),
                profile("Loose-Aggressive", 0.30, 0.55, 0.15, 0.35, 0.5, 0.9),
                profile("Rock", 0.60, 0.70, 0.02, 0.20, 0.6, 0.9),
            ],
        }
    }

    /// Profile for a seat; seats cycle through the preset list.
    pub fn profile_for_seat(self, seat: usize) -> AiProfile {
        let profiles = self.profiles();
        profiles[seat % profiles.len()].clone()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

fn profile(
    name: &str,
    play_hand_threshold: f64,
    raise_hand_threshold: f64,
    bluffing_frequency: f64,
    aggression_factor: f64,
    min_raise_multiplier: f64,
    max_raise_multiplier: f64,
) -> AiProfile {
    AiProfile {
        name: name.to_string(),
        play_hand_threshold,
        raise_hand_threshold,
        bluffing_frequency,
        aggression_factor,
        min_raise_multiplier,
        max_raise_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_profile_is_valid() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for p in d.profiles() {
                assert!(p.validate().is_ok(), "{} / {}", d, p.name);
            }
        }
    }

    #[test]
    fn seats_get_profiles_deterministically() {
        let a = Difficulty::Medium.profile_for_seat(1);
        let b = Difficulty::Medium.profile_for_seat(1);
        assert_eq!(a, b);
        assert_eq!(a.name, "Loose-Aggressive");
        assert_eq!(Difficulty::Medium.profile_for_seat(4).name, "Tight-Passive");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
