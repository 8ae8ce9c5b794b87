//! Profile-driven CPU opponent.
//!
//! Each CPU seat carries an [`AiProfile`]; the decision compares the hand's
//! strength score against the profile thresholds and draws every random roll
//! from the game's own generator, so a seed replays the CPU's choices.

use pls7_engine::game::{DecisionContext, GameRng};
use pls7_engine::player::PlayerAction;
use pls7_engine::profile::AiProfile;
use rand::Rng;
use tracing::debug;

use crate::ActionProvider;
use crate::profiles::Difficulty;
use crate::strength::hand_strength;

/// CPU opponent. Uses the seat's own profile when the context carries one and
/// `fallback` otherwise.
#[derive(Debug, Clone)]
pub struct CpuPlayer {
    fallback: AiProfile,
}

impl CpuPlayer {
    pub fn new(fallback: AiProfile) -> Self {
        Self { fallback }
    }

    fn raise_to(ctx: &DecisionContext, profile: &AiProfile, rng: &mut GameRng) -> u32 {
        let span = profile.max_raise_multiplier - profile.min_raise_multiplier;
        let fraction = profile.min_raise_multiplier + span * rng.random::<f64>();
        let target = (f64::from(ctx.max_raise_to) * fraction).round() as u32;
        target.clamp(ctx.min_raise_to, ctx.max_raise_to)
    }

    fn aggressive(ctx: &DecisionContext, profile: &AiProfile, rng: &mut GameRng) -> PlayerAction {
        let amount = Self::raise_to(ctx, profile, rng);
        if ctx.bet_to_call == 0 {
            PlayerAction::Bet(amount)
        } else {
            PlayerAction::Raise(amount)
        }
    }
}

impl Default for CpuPlayer {
    fn default() -> Self {
        Self::new(Difficulty::Medium.profile_for_seat(0))
    }
}

impl ActionProvider for CpuPlayer {
    fn decide(&self, ctx: &DecisionContext, rng: &mut GameRng) -> PlayerAction {
        let profile = ctx.profile.as_ref().unwrap_or(&self.fallback);
        let strength = hand_strength(ctx);
        let roll: f64 = rng.random();

        let action = if ctx.to_call() > 0 {
            if strength < profile.play_hand_threshold {
                if roll < profile.bluffing_frequency && ctx.can_raise() {
                    Self::aggressive(ctx, profile, rng)
                } else {
                    PlayerAction::Fold
                }
            } else if (strength >= profile.raise_hand_threshold || roll < profile.aggression_factor)
                && ctx.can_raise()
            {
                Self::aggressive(ctx, profile, rng)
            } else {
                PlayerAction::Call
            }
        } else if (strength >= profile.raise_hand_threshold || roll < profile.aggression_factor)
            && ctx.can_raise()
        {
            Self::aggressive(ctx, profile, rng)
        } else {
            PlayerAction::Check
        };

        debug!(
            seat = ctx.seat,
            profile = %profile.name,
            strength,
            roll,
            ?action,
            "cpu decision"
        );
        action
    }

    fn name(&self) -> &str {
        "CpuPlayer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pls7_engine::cards::{Card, Rank as R, Suit as S};
    use pls7_engine::game::Phase;
    use pls7_engine::rules::GameRules;
    use rand::SeedableRng;

    fn profile(play: f64, raise: f64, bluff: f64, aggression: f64) -> AiProfile {
        AiProfile {
            name: "Test".into(),
            play_hand_threshold: play,
            raise_hand_threshold: raise,
            bluffing_frequency: bluff,
            aggression_factor: aggression,
            min_raise_multiplier: 0.3,
            max_raise_multiplier: 0.6,
        }
    }

    fn ctx(hole: [Card; 2], bet_to_call: u32, profile: AiProfile) -> DecisionContext {
        DecisionContext {
            seat: 2,
            phase: Phase::PreFlop,
            hole_cards: hole.to_vec(),
            community_cards: vec![],
            pot: 150,
            bet_to_call,
            current_bet: 0,
            chips: 10_000,
            min_raise_to: if bet_to_call == 0 { 100 } else { bet_to_call * 2 },
            max_raise_to: 10_000,
            big_blind: 100,
            active_opponents: 3,
            rules: GameRules::no_limit_holdem(),
            profile: Some(profile),
        }
    }

    fn aces() -> [Card; 2] {
        [Card::new(R::Ace, S::Hearts), Card::new(R::Ace, S::Spades)]
    }

    fn seven_deuce() -> [Card; 2] {
        [Card::new(R::Seven, S::Hearts), Card::new(R::Two, S::Spades)]
    }

    #[test]
    fn strong_hand_raises_within_bounds() {
        let mut rng = GameRng::seed_from_u64(1);
        let c = ctx(aces(), 100, profile(0.3, 0.7, 0.0, 0.0));
        match CpuPlayer::default().decide(&c, &mut rng) {
            PlayerAction::Raise(amount) => {
                assert!((c.min_raise_to..=c.max_raise_to).contains(&amount));
                assert!((3_000..=6_000).contains(&amount));
            }
            other => panic!("expected a raise, got {:?}", other),
        }
    }

    #[test]
    fn weak_hand_folds_to_a_bet_without_bluffing() {
        let mut rng = GameRng::seed_from_u64(2);
        let c = ctx(seven_deuce(), 100, profile(0.3, 0.7, 0.0, 0.0));
        assert_eq!(CpuPlayer::default().decide(&c, &mut rng), PlayerAction::Fold);
    }

    #[test]
    fn weak_hand_checks_when_free() {
        let mut rng = GameRng::seed_from_u64(3);
        let c = ctx(seven_deuce(), 0, profile(0.3, 0.7, 0.0, 0.0));
        assert_eq!(CpuPlayer::default().decide(&c, &mut rng), PlayerAction::Check);
    }

    #[test]
    fn strong_hand_bets_when_checked_to() {
        let mut rng = GameRng::seed_from_u64(4);
        let c = ctx(aces(), 0, profile(0.3, 0.7, 0.0, 0.0));
        assert!(matches!(CpuPlayer::default().decide(&c, &mut rng), PlayerAction::Bet(_)));
    }

    #[test]
    fn certain_bluff_raises_with_trash() {
        let mut rng = GameRng::seed_from_u64(5);
        let c = ctx(seven_deuce(), 100, profile(0.3, 0.7, 1.0, 0.0));
        assert!(matches!(CpuPlayer::default().decide(&c, &mut rng), PlayerAction::Raise(_)));
    }

    #[test]
    fn medium_hand_calls() {
        let mut rng = GameRng::seed_from_u64(6);
        let hole = [Card::new(R::Ace, S::Hearts), Card::new(R::Jack, S::Spades)];
        let c = ctx(hole, 100, profile(0.3, 0.9, 0.0, 0.0));
        assert_eq!(CpuPlayer::default().decide(&c, &mut rng), PlayerAction::Call);
    }

    #[test]
    fn short_stack_calls_instead_of_raising() {
        let mut rng = GameRng::seed_from_u64(7);
        let mut c = ctx(aces(), 500, profile(0.3, 0.7, 0.0, 0.0));
        c.chips = 400;
        c.min_raise_to = 400;
        c.max_raise_to = 400;
        assert_eq!(CpuPlayer::default().decide(&c, &mut rng), PlayerAction::Call);
    }

    #[test]
    fn same_seed_same_decisions() {
        let c = ctx(seven_deuce(), 100, profile(0.3, 0.7, 0.5, 0.5));
        let ai = CpuPlayer::default();
        let run = |seed| {
            let mut rng = GameRng::seed_from_u64(seed);
            (0..20).map(|_| ai.decide(&c, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }
}
