use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::profile::AiProfile;

/// Where a player stands in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still able to act
    Playing,
    /// Out of the current hand
    Folded,
    /// Whole stack committed, no further decisions this hand
    AllIn,
    /// Out of chips, no longer dealt in
    Eliminated,
}

/// Represents a player action during a betting round.
///
/// `Bet` and `Raise` carry the player's total bet for the street after the
/// action ("raise to"), not the increment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting to the given total
    Bet(u32),
    /// Raise the current bet to the given total
    Raise(u32),
}

/// Represents a seat at the table: chips, hand state and, for CPUs, the
/// behavioral profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub chips: u32,
    pub is_cpu: bool,
    /// Seat index, fixed for the session
    pub position: usize,
    pub status: PlayerStatus,
    /// Chips put in on the current street
    pub current_bet: u32,
    /// Chips put in over the whole hand
    pub total_bet_in_hand: u32,
    pub hand: Vec<Card>,
    pub last_action: String,
    pub profile: Option<AiProfile>,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u32, position: usize) -> Self {
        Self {
            name: name.into(),
            chips,
            is_cpu: false,
            position,
            status: PlayerStatus::Playing,
            current_bet: 0,
            total_bet_in_hand: 0,
            hand: Vec::new(),
            last_action: String::new(),
            profile: None,
        }
    }

    pub fn cpu(name: impl Into<String>, chips: u32, position: usize, profile: AiProfile) -> Self {
        Self {
            is_cpu: true,
            profile: Some(profile),
            ..Self::new(name, chips, position)
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Playing
    }

    /// Still holding cards in the current hand (playing or all-in).
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Playing | PlayerStatus::AllIn)
    }

    pub fn is_eliminated(&self) -> bool {
        self.status == PlayerStatus::Eliminated
    }

    /// Moves up to `amount` chips from the stack into this street's bet and
    /// returns what was actually committed. Emptying the stack makes the
    /// player all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.current_bet += paid;
        self.total_bet_in_hand += paid;
        if self.chips == 0 && self.status == PlayerStatus::Playing {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.current_bet = 0;
        self.total_bet_in_hand = 0;
        self.hand.clear();
        self.last_action.clear();
        if self.status != PlayerStatus::Eliminated {
            self.status = PlayerStatus::Playing;
        }
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.current_bet = 0;
        if self.status == PlayerStatus::Playing {
            self.last_action.clear();
        }
    }
}
