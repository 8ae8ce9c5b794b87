//! Variant descriptors.
//!
//! A [`GameRules`] value describes one poker variant: how many hole cards are
//! dealt and how many of them must play, how many community cards come out,
//! the betting limit and whether a qualifying low hand takes half the pot.
//! Rules are validated once when a game is built and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::betting::BettingLimit;
use crate::errors::GameError;

/// Low hands qualify with five distinct ranks at or below this value by default.
pub const DEFAULT_LOW_MAX_RANK: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    pub betting_limit: BettingLimit,
    pub hole_cards: HoleCardRules,
    pub community_cards: CommunityCardRules,
    #[serde(default)]
    pub low_hand: LowHandRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleCardRules {
    /// Hole cards dealt to each player
    pub count: usize,
    /// Exact number of hole cards a made hand must use; `None` lets any number play
    #[serde(default)]
    pub must_use: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityCardRules {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowHandRules {
    pub enabled: bool,
    /// Highest rank (Ace = 1) a qualifying low may contain
    #[serde(default = "default_low_max_rank")]
    pub max_rank: u8,
}

fn default_low_max_rank() -> u8 {
    DEFAULT_LOW_MAX_RANK
}

impl Default for LowHandRules {
    fn default() -> Self {
        Self {
            enabled: false,
            max_rank: DEFAULT_LOW_MAX_RANK,
        }
    }
}

impl GameRules {
    /// No-Limit Texas Hold'em.
    pub fn no_limit_holdem() -> Self {
        Self {
            name: "No-Limit Hold'em".into(),
            abbreviation: "NLH".into(),
            betting_limit: BettingLimit::NoLimit,
            hole_cards: HoleCardRules {
                count: 2,
                must_use: None,
            },
            community_cards: CommunityCardRules { count: 5 },
            low_hand: LowHandRules::default(),
        }
    }

    /// Pot-Limit Sampo: three hole cards, any of which may play.
    pub fn pot_limit_sampo() -> Self {
        Self {
            name: "Pot-Limit Sampo".into(),
            abbreviation: "PLS".into(),
            betting_limit: BettingLimit::PotLimit,
            hole_cards: HoleCardRules {
                count: 3,
                must_use: None,
            },
            community_cards: CommunityCardRules { count: 5 },
            low_hand: LowHandRules::default(),
        }
    }

    /// Pot-Limit Sampo Hi-Lo with a seven-or-better low.
    pub fn pot_limit_sampo_hi_lo() -> Self {
        Self {
            name: "Pot-Limit Sampo Hi-Lo 7 or Better".into(),
            abbreviation: "PLS7".into(),
            low_hand: LowHandRules {
                enabled: true,
                max_rank: 7,
            },
            ..Self::pot_limit_sampo()
        }
    }

    /// Looks up a built-in preset by its short name (`nlh`, `pls`, `pls7`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nlh" => Some(Self::no_limit_holdem()),
            "pls" => Some(Self::pot_limit_sampo()),
            "pls7" => Some(Self::pot_limit_sampo_hi_lo()),
            _ => None,
        }
    }

    pub fn preset_names() -> [&'static str; 3] {
        ["pls7", "pls", "nlh"]
    }

    /// Checks that the descriptor describes a dealable, evaluable game.
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::Configuration(msg));
        if self.name.trim().is_empty() {
            return invalid("rules must have a name".into());
        }
        if self.hole_cards.count == 0 {
            return invalid("hole card count must be at least 1".into());
        }
        if self.community_cards.count > 5 {
            return invalid(format!(
                "community card count {} exceeds 5",
                self.community_cards.count
            ));
        }
        if self.hole_cards.count + self.community_cards.count < 5 {
            return invalid(format!(
                "{} hole + {} community cards cannot form a five-card hand",
                self.hole_cards.count, self.community_cards.count
            ));
        }
        if let Some(n) = self.hole_cards.must_use {
            if n > self.hole_cards.count || n > 5 {
                return invalid(format!(
                    "must use {} hole cards but only {} are dealt",
                    n, self.hole_cards.count
                ));
            }
            if 5 - n > self.community_cards.count {
                return invalid(format!(
                    "must use {} hole cards but only {} community cards exist",
                    n, self.community_cards.count
                ));
            }
        }
        if self.low_hand.enabled && !(5..=13).contains(&self.low_hand.max_rank) {
            return invalid(format!(
                "low hand qualifier {} must be between 5 and 13",
                self.low_hand.max_rank
            ));
        }
        Ok(())
    }

    /// Most players the deck can serve with the full board dealt.
    pub fn max_players(&self) -> usize {
        (52 - self.community_cards.count) / self.hole_cards.count
    }
}
