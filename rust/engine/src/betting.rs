//! Legal bet and raise bounds for each betting limit.
//!
//! Amounts here are "raise-to" totals: the size of the player's whole bet on
//! the current street after the action, not the increment.

use serde::{Deserialize, Serialize};

/// Betting structure selected once from the variant descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BettingLimit {
    PotLimit,
    NoLimit,
}

/// Table state needed to bound a bet or raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RaiseContext {
    /// Chips already in the middle, excluding the bet being faced and the
    /// acting player's own bet on this street
    pub pot: u32,
    /// Highest bet on the current street
    pub bet_to_call: u32,
    /// Chips behind (not yet committed)
    pub player_stack: u32,
    /// Chips the acting player already put in on this street
    pub player_current_bet: u32,
    /// Size of the last full raise increment this street (0 if none)
    pub last_raise_amount: u32,
    pub big_blind: u32,
}

impl RaiseContext {
    /// Raise-to total that puts the whole stack in.
    pub fn all_in_total(&self) -> u32 {
        self.player_stack.saturating_add(self.player_current_bet)
    }
}

impl BettingLimit {
    /// Largest legal raise-to total, capped by the player's stack.
    ///
    /// Pot limit allows calling and then raising by the size of the pot after
    /// the call: `bet_to_call + (pot + bet_to_call * 2)`.
    pub fn max_raise(&self, ctx: &RaiseContext) -> u32 {
        let all_in = ctx.all_in_total();
        match self {
            BettingLimit::PotLimit => {
                let pot_raise = ctx
                    .bet_to_call
                    .saturating_add(ctx.pot)
                    .saturating_add(ctx.bet_to_call.saturating_mul(2));
                pot_raise.min(all_in)
            }
            BettingLimit::NoLimit => all_in,
        }
    }

    /// Smallest legal raise-to total. A short stack may still go all-in for less.
    pub fn min_raise(&self, ctx: &RaiseContext) -> u32 {
        let target = ctx.bet_to_call.saturating_add(min_raise_increment(ctx));
        target.min(self.max_raise(ctx))
    }
}

/// The last raise increment on this street, or the big blind when nobody has raised.
pub fn min_raise_increment(ctx: &RaiseContext) -> u32 {
    if ctx.last_raise_amount == 0 {
        ctx.big_blind
    } else {
        ctx.last_raise_amount.max(ctx.big_blind)
    }
}
