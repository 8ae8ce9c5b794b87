//! # pls7-ai: CPU opponents for PLS7 poker
//!
//! Provides the decision-making side of CPU seats. A CPU decides from a
//! [`DecisionContext`] snapshot of the table and draws its randomness from
//! the game's seeded generator, so a seed replays whole games.
//!
//! ## Core Components
//!
//! - [`ActionProvider`] - Trait implemented by every CPU strategy
//! - [`cpu`] - Profile-driven CPU player
//! - [`profiles`] - Difficulty presets and their named profiles
//! - [`strength`] - Hand-strength scoring used by the CPU
//! - [`create_ai`] - Factory for strategies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use pls7_ai::{create_ai, decide_current};
//! use pls7_engine::game::{Game, GameSetup};
//! use pls7_engine::rules::GameRules;
//!
//! let ai = create_ai("cpu").expect("known strategy");
//! let mut game = Game::new(GameSetup::humans(&["A", "B"], 10_000, 50, 100, GameRules::pot_limit_sampo(), 42)).unwrap();
//! game.start_new_hand();
//! game.prepare_new_betting_round();
//!
//! let action = decide_current(&mut game, ai.as_ref());
//! let seat = game.current_turn_pos();
//! game.process_action(seat, action).unwrap();
//! ```

use pls7_engine::game::{DecisionContext, Game, GameRng};
use pls7_engine::player::PlayerAction;

pub mod cpu;
pub mod profiles;
pub mod strength;

pub use cpu::CpuPlayer;
pub use profiles::{Difficulty, UnknownDifficulty};

/// Interface for CPU strategies.
///
/// # Example Implementation
///
/// ```rust
/// use pls7_ai::ActionProvider;
/// use pls7_engine::game::{DecisionContext, GameRng};
/// use pls7_engine::player::PlayerAction;
///
/// struct AlwaysCall;
///
/// impl ActionProvider for AlwaysCall {
///     fn decide(&self, ctx: &DecisionContext, _rng: &mut GameRng) -> PlayerAction {
///         if ctx.to_call() > 0 { PlayerAction::Call } else { PlayerAction::Check }
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysCall"
///     }
/// }
/// ```
pub trait ActionProvider: Send + Sync {
    /// Choose an action for the seat described by `ctx`.
    ///
    /// Any randomness must come from `rng`. The returned action is a
    /// proposal; the game still validates it.
    fn decide(&self, ctx: &DecisionContext, rng: &mut GameRng) -> PlayerAction;

    /// Identifier of the strategy.
    fn name(&self) -> &str;
}

/// Asks `provider` for the action of the seat whose turn it is.
pub fn decide_current(game: &mut Game, provider: &dyn ActionProvider) -> PlayerAction {
    let ctx = game.decision_context(game.current_turn_pos());
    provider.decide(&ctx, game.rng_mut())
}

/// Creates a strategy by name. Returns `None` for unknown names.
///
/// Supported names: `"cpu"`.
///
/// ```rust
/// use pls7_ai::create_ai;
///
/// assert_eq!(create_ai("cpu").map(|ai| ai.name().to_string()), Some("CpuPlayer".into()));
/// assert!(create_ai("oracle").is_none());
/// ```
pub fn create_ai(kind: &str) -> Option<Box<dyn ActionProvider>> {
    match kind {
        "cpu" => Some(Box::new(CpuPlayer::default())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pls7_engine::game::GameSetup;
    use pls7_engine::rules::GameRules;

    #[test]
    fn cpu_only_game_conserves_chips() {
        let mut setup = GameSetup::humans(
            &["CPU 1", "CPU 2", "CPU 3", "CPU 4"],
            10_000,
            50,
            100,
            GameRules::pot_limit_sampo_hi_lo(),
            2024,
        );
        for (seat, s) in setup.players.iter_mut().enumerate() {
            s.is_cpu = true;
            s.profile = Some(Difficulty::Hard.profile_for_seat(seat));
        }
        let mut game = Game::new(setup).unwrap();
        let ai = CpuPlayer::default();

        for _ in 0..50 {
            if game.start_new_hand().is_none() && game.is_game_over() {
                break;
            }
            loop {
                game.prepare_new_betting_round();
                let mut guard = 0;
                while !game.is_betting_round_over() {
                    guard += 1;
                    assert!(guard < 200, "betting round did not terminate");
                    if !game.current_player().is_active() {
                        game.advance_turn();
                        continue;
                    }
                    let seat = game.current_turn_pos();
                    let action = decide_current(&mut game, &ai);
                    if game.process_action(seat, action).is_err() {
                        let fallback = if game.to_call(seat) > 0 { PlayerAction::Call } else { PlayerAction::Check };
                        game.process_action(seat, fallback).unwrap();
                    }
                    game.advance_turn();
                }
                if game.count_non_folded_players() <= 1 {
                    game.award_pot_to_last_player();
                    break;
                }
                if game.advance().unwrap().is_some() {
                    break;
                }
            }
            game.cleanup_hand();
            assert_eq!(game.total_chips_in_play(), 40_000);
        }
    }
}
