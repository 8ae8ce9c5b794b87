//! Game orchestration: seating, blinds, dealing and the betting-round state
//! machine.
//!
//! A front end drives one hand like this:
//!
//! ```
//! use pls7_engine::game::{Game, GameSetup, Phase};
//! use pls7_engine::player::PlayerAction;
//! use pls7_engine::rules::GameRules;
//!
//! let mut game = Game::new(GameSetup::humans(&["A", "B", "C"], 10_000, 50, 100, GameRules::no_limit_holdem(), 7)).unwrap();
//! game.start_new_hand();
//! while !matches!(game.phase(), Phase::Showdown | Phase::HandOver) {
//!     if game.count_non_folded_players() <= 1 {
//!         break;
//!     }
//!     game.prepare_new_betting_round();
//!     while !game.is_betting_round_over() {
//!         let seat = game.current_turn_pos();
//!         if !game.current_player().is_active() {
//!             game.advance_turn();
//!             continue;
//!         }
//!         let action = if game.to_call(seat) > 0 { PlayerAction::Call } else { PlayerAction::Check };
//!         game.process_action(seat, action).unwrap();
//!         game.advance_turn();
//!     }
//!     game.advance().unwrap();
//! }
//! game.cleanup_hand();
//! assert_eq!(game.total_chips_in_play(), 30_000);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::betting::{min_raise_increment, RaiseContext};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{self, HandEvaluation};
use crate::player::{Player, PlayerAction, PlayerStatus};
use crate::pot::{build_pots, split_evenly, Contribution};
use crate::profile::AiProfile;
use crate::rules::GameRules;

/// The single seeded random source of a game.
pub type GameRng = ChaCha20Rng;

/// Stage of the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandOver,
}

impl Phase {
    /// Transition table. Streets the variant has no community cards for are
    /// skipped.
    pub fn next(self, community_count: usize) -> Phase {
        match self {
            Phase::PreFlop if community_count >= 1 => Phase::Flop,
            Phase::Flop if community_count >= 4 => Phase::Turn,
            Phase::Turn if community_count >= 5 => Phase::River,
            Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River => Phase::Showdown,
            Phase::Showdown | Phase::HandOver => Phase::HandOver,
        }
    }

    /// Community cards dealt when a street starts.
    pub fn cards_to_deal(self, community_count: usize) -> usize {
        match self {
            Phase::Flop => community_count.min(3),
            Phase::Turn => usize::from(community_count >= 4),
            Phase::River => usize::from(community_count >= 5),
            _ => 0,
        }
    }

    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::PreFlop => "Pre-Flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
            Phase::HandOver => "Hand Over",
        }
    }
}

/// One seat of a new game.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatSetup {
    pub name: String,
    pub is_cpu: bool,
    pub profile: Option<AiProfile>,
}

/// Everything needed to build a [`Game`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameSetup {
    pub players: Vec<SeatSetup>,
    pub initial_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Blinds double every this many hands; 0 disables
    pub blind_up_interval: u32,
    pub rules: GameRules,
    pub seed: u64,
}

impl GameSetup {
    /// A table of human seats, handy for tests and tools.
    pub fn humans(
        names: &[&str],
        initial_chips: u32,
        small_blind: u32,
        big_blind: u32,
        rules: GameRules,
        seed: u64,
    ) -> Self {
        Self {
            players: names
                .iter()
                .map(|n| SeatSetup {
                    name: (*n).to_string(),
                    is_cpu: false,
                    profile: None,
                })
                .collect(),
            initial_chips,
            small_blind,
            big_blind,
            blind_up_interval: 0,
            rules,
            seed,
        }
    }
}

/// Returned by [`Game::start_new_hand`] when the blinds went up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindEvent {
    pub small_blind: u32,
    pub big_blind: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

/// What a processed action did, for the front end to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub seat: usize,
    pub player_name: String,
    pub action: ActionKind,
    /// Chips paid for a call; the new street total for a bet or raise
    pub amount: u32,
    pub all_in: bool,
}

/// One award of chips at the end of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub seat: usize,
    pub player_name: String,
    pub amount_won: u32,
    pub hand_desc: String,
}

/// Read-only view of the table handed to an action provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionContext {
    pub seat: usize,
    pub phase: Phase,
    pub hole_cards: Vec<Card>,
    pub community_cards: Vec<Card>,
    pub pot: u32,
    pub bet_to_call: u32,
    pub current_bet: u32,
    pub chips: u32,
    pub min_raise_to: u32,
    pub max_raise_to: u32,
    pub big_blind: u32,
    pub active_opponents: usize,
    pub rules: GameRules,
    pub profile: Option<AiProfile>,
}

impl DecisionContext {
    pub fn to_call(&self) -> u32 {
        self.bet_to_call.saturating_sub(self.current_bet)
    }

    /// True when the player has chips left after covering the call.
    pub fn can_raise(&self) -> bool {
        self.max_raise_to > self.bet_to_call
    }
}

enum Plan {
    Fold,
    Check,
    Call(u32),
    Wager { total: u32, kind: ActionKind },
}

/// The orchestrator. Owns every player, the deck, the pot and the random
/// source; exactly one action is processed at a time.
#[derive(Debug)]
pub struct Game {
    pub(crate) players: Vec<Player>,
    pub(crate) deck: Deck,
    pub(crate) community_cards: Vec<Card>,
    pub(crate) pot: u32,
    pub(crate) dealer_pos: usize,
    pub(crate) big_blind_pos: usize,
    pub(crate) current_turn_pos: usize,
    pub(crate) phase: Phase,
    pub(crate) bet_to_call: u32,
    pub(crate) last_raise_amount: u32,
    pub(crate) hand_count: u32,
    pub(crate) small_blind: u32,
    pub(crate) big_blind: u32,
    pub(crate) blind_up_interval: u32,
    pub(crate) actions_taken_this_round: u32,
    pub(crate) action_closer_pos: usize,
    pub(crate) round_closed: bool,
    pub(crate) total_initial_chips: u32,
    pub(crate) rules: GameRules,
    pub(crate) rng: GameRng,
}

impl Game {
    /// Seats the players and validates the setup. No game is built when any
    /// part of the configuration is invalid.
    pub fn new(setup: GameSetup) -> Result<Self, GameError> {
        setup.rules.validate()?;
        let n = setup.players.len();
        if n < 2 {
            return Err(GameError::Configuration(format!(
                "at least 2 players are required, got {}",
                n
            )));
        }
        if n > setup.rules.max_players() {
            return Err(GameError::Configuration(format!(
                "{} deals at most {} players, got {}",
                setup.rules.name,
                setup.rules.max_players(),
                n
            )));
        }
        if setup.initial_chips == 0 {
            return Err(GameError::Configuration(
                "initial chips must be greater than 0".into(),
            ));
        }
        if setup.small_blind == 0 || setup.big_blind < setup.small_blind {
            return Err(GameError::Configuration(format!(
                "blinds {}/{} are invalid",
                setup.small_blind, setup.big_blind
            )));
        }
        let total_initial_chips = setup
            .initial_chips
            .checked_mul(n as u32)
            .ok_or_else(|| GameError::Configuration("total chips overflow".into()))?;

        let mut players = Vec::with_capacity(n);
        for (position, seat) in setup.players.into_iter().enumerate() {
            let player = match (seat.is_cpu, seat.profile) {
                (true, Some(profile)) => {
                    profile.validate()?;
                    Player::cpu(seat.name, setup.initial_chips, position, profile)
                }
                (true, None) => {
                    return Err(GameError::Configuration(format!(
                        "CPU player '{}' has no AI profile",
                        seat.name
                    )))
                }
                (false, _) => Player::new(seat.name, setup.initial_chips, position),
            };
            players.push(player);
        }

        info!(
            rules = %setup.rules.name,
            players = n,
            seed = setup.seed,
            "new game"
        );
        Ok(Self {
            players,
            deck: Deck::new(),
            community_cards: Vec::with_capacity(5),
            pot: 0,
            // the first hand rotates the button onto seat 0
            dealer_pos: n - 1,
            big_blind_pos: 0,
            current_turn_pos: 0,
            phase: Phase::HandOver,
            bet_to_call: 0,
            last_raise_amount: 0,
            hand_count: 0,
            small_blind: setup.small_blind,
            big_blind: setup.big_blind,
            blind_up_interval: setup.blind_up_interval,
            actions_taken_this_round: 0,
            action_closer_pos: 0,
            round_closed: false,
            total_initial_chips,
            rules: setup.rules,
            rng: ChaCha20Rng::seed_from_u64(setup.seed),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Direct access to the seats, for staging scenarios.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }

    /// Replaces the board, for staging scenarios.
    pub fn set_community_cards(&mut self, cards: Vec<Card>) {
        self.community_cards = cards;
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn dealer_pos(&self) -> usize {
        self.dealer_pos
    }
    pub fn current_turn_pos(&self) -> usize {
        self.current_turn_pos
    }
    pub fn action_closer_pos(&self) -> usize {
        self.action_closer_pos
    }
    pub fn actions_taken_this_round(&self) -> u32 {
        self.actions_taken_this_round
    }
    pub fn bet_to_call(&self) -> u32 {
        self.bet_to_call
    }
    pub fn last_raise_amount(&self) -> u32 {
        self.last_raise_amount
    }
    pub fn hand_count(&self) -> u32 {
        self.hand_count
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn blind_up_interval(&self) -> u32 {
        self.blind_up_interval
    }
    pub fn total_initial_chips(&self) -> u32 {
        self.total_initial_chips
    }
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// The game's random source. Everything random in a session draws from
    /// it, in call order, so a seed replays the session.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Chips behind plus chips in the pot; constant for the whole session.
    pub fn total_chips_in_play(&self) -> u32 {
        self.players.iter().map(|p| p.chips).sum::<u32>() + self.pot
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn_pos]
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map(|p| self.bet_to_call.saturating_sub(p.current_bet))
            .unwrap_or(0)
    }

    pub fn count_non_folded_players(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    pub fn count_remaining_players(&self) -> usize {
        self.players.iter().filter(|p| !p.is_eliminated()).count()
    }

    pub fn is_game_over(&self) -> bool {
        self.count_remaining_players() <= 1
    }

    /// Rotates the button, posts blinds, shuffles and deals hole cards.
    ///
    /// Blinds double before the hand when `hand_count` is a positive multiple
    /// of the blind-up interval; the new levels are returned in that case.
    pub fn start_new_hand(&mut self) -> Option<BlindEvent> {
        if self.count_remaining_players() < 2 {
            warn!("cannot start a hand with fewer than two players");
            return None;
        }

        let mut event = None;
        if self.blind_up_interval > 0
            && self.hand_count > 0
            && self.hand_count % self.blind_up_interval == 0
        {
            self.small_blind = self.small_blind.saturating_mul(2);
            self.big_blind = self.big_blind.saturating_mul(2);
            info!(
                small_blind = self.small_blind,
                big_blind = self.big_blind,
                "blinds up"
            );
            event = Some(BlindEvent {
                small_blind: self.small_blind,
                big_blind: self.big_blind,
            });
        }

        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.community_cards.clear();
        self.pot = 0;
        self.bet_to_call = 0;
        self.last_raise_amount = 0;
        self.actions_taken_this_round = 0;
        self.round_closed = false;
        self.deck.shuffle(&mut self.rng);

        self.dealer_pos = self
            .next_seat(self.dealer_pos, |p| !p.is_eliminated())
            .unwrap_or(self.dealer_pos);
        let sb_pos = self
            .next_seat(self.dealer_pos, |p| !p.is_eliminated())
            .unwrap_or(self.dealer_pos);
        let bb_pos = self
            .next_seat(sb_pos, |p| !p.is_eliminated())
            .unwrap_or(sb_pos);
        self.big_blind_pos = bb_pos;

        let (sb, bb) = (self.small_blind, self.big_blind);
        self.post_blind(sb_pos, sb, "Small Blind");
        self.post_blind(bb_pos, bb, "Big Blind");
        self.bet_to_call = bb;
        self.last_raise_amount = bb;

        let n = self.players.len();
        for _ in 0..self.rules.hole_cards.count {
            for offset in 1..=n {
                let seat = (self.dealer_pos + offset) % n;
                if self.players[seat].is_eliminated() {
                    continue;
                }
                if let Some(card) = self.deck.deal_card() {
                    self.players[seat].hand.push(card);
                }
            }
        }

        self.phase = Phase::PreFlop;
        self.current_turn_pos = bb_pos;
        debug!(
            hand = self.hand_count + 1,
            dealer = self.dealer_pos,
            small_blind_seat = sb_pos,
            big_blind_seat = bb_pos,
            "hand started"
        );
        event
    }

    fn post_blind(&mut self, seat: usize, amount: u32, label: &str) {
        let paid = self.players[seat].commit(amount);
        self.pot += paid;
        self.players[seat].last_action = format!("{} {}", label, paid);
    }

    /// Deals the community cards of the street and decides who acts first and
    /// who closes the action. Pre-flop bets (the blinds) are kept.
    pub fn prepare_new_betting_round(&mut self) {
        self.actions_taken_this_round = 0;
        self.round_closed = false;

        let first = match self.phase {
            Phase::PreFlop => self.next_seat(self.big_blind_pos, Player::is_active),
            Phase::Flop | Phase::Turn | Phase::River => {
                let n = self.phase.cards_to_deal(self.rules.community_cards.count);
                let dealt = self.deck.deal_n(n);
                self.community_cards.extend(dealt);
                for p in &mut self.players {
                    p.reset_for_street();
                }
                self.bet_to_call = 0;
                self.last_raise_amount = 0;
                self.next_seat(self.dealer_pos, Player::is_active)
            }
            Phase::Showdown | Phase::HandOver => return,
        };

        if let Some(first) = first {
            self.current_turn_pos = first;
            self.action_closer_pos = self.prev_seat(first, Player::is_active).unwrap_or(first);
        }
        debug!(
            phase = self.phase.name(),
            board = ?self.community_cards,
            first_to_act = self.current_turn_pos,
            closer = self.action_closer_pos,
            "betting round prepared"
        );
    }

    /// Legal bounds for the given seat's next bet or raise.
    pub fn raise_context(&self, seat: usize) -> RaiseContext {
        let p = &self.players[seat];
        RaiseContext {
            pot: self
                .pot
                .saturating_sub(self.bet_to_call)
                .saturating_sub(p.current_bet),
            bet_to_call: self.bet_to_call,
            player_stack: p.chips,
            player_current_bet: p.current_bet,
            last_raise_amount: self.last_raise_amount,
            big_blind: self.big_blind,
        }
    }

    /// `(min, max)` raise-to totals for the seat.
    pub fn raise_bounds(&self, seat: usize) -> (u32, u32) {
        let ctx = self.raise_context(seat);
        let limit = self.rules.betting_limit;
        (limit.min_raise(&ctx), limit.max_raise(&ctx))
    }

    pub fn decision_context(&self, seat: usize) -> DecisionContext {
        let p = &self.players[seat];
        let (min_raise_to, max_raise_to) = self.raise_bounds(seat);
        DecisionContext {
            seat,
            phase: self.phase,
            hole_cards: p.hand.clone(),
            community_cards: self.community_cards.clone(),
            pot: self.pot,
            bet_to_call: self.bet_to_call,
            current_bet: p.current_bet,
            chips: p.chips,
            min_raise_to,
            max_raise_to,
            big_blind: self.big_blind,
            active_opponents: self
                .players
                .iter()
                .filter(|o| o.position != seat && o.in_hand())
                .count(),
            rules: self.rules.clone(),
            profile: p.profile.clone(),
        }
    }

    /// Validates and applies one action for `seat`.
    ///
    /// # Errors
    ///
    /// Rejects out-of-turn actions, checks facing a bet, bets into an
    /// existing bet and raises below the minimum (unless all-in). Nothing is
    /// mutated when an error is returned. Amounts above the stack or above
    /// the pot limit are clamped instead.
    pub fn process_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<ActionEvent, GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        if self.is_betting_round_over() {
            return Err(GameError::RoundClosed);
        }
        if seat != self.current_turn_pos {
            return Err(GameError::NotPlayersTurn {
                expected: self.current_turn_pos,
                actual: seat,
            });
        }
        let player = self.players.get(seat).ok_or(GameError::PlayerCannotAct(seat))?;
        if !player.is_active() {
            return Err(GameError::PlayerCannotAct(seat));
        }

        let ctx = self.raise_context(seat);
        let to_call = self.bet_to_call.saturating_sub(player.current_bet);
        let plan = match action {
            PlayerAction::Fold => Plan::Fold,
            PlayerAction::Check if to_call > 0 => return Err(GameError::CannotCheck { to_call }),
            PlayerAction::Check => Plan::Check,
            PlayerAction::Call if to_call == 0 => Plan::Check,
            PlayerAction::Call => Plan::Call(to_call.min(player.chips)),
            PlayerAction::Bet(_) if self.bet_to_call > 0 => {
                return Err(GameError::CannotBet {
                    bet_to_call: self.bet_to_call,
                })
            }
            PlayerAction::Bet(amount) => self.plan_wager(&ctx, amount, ActionKind::Bet)?,
            PlayerAction::Raise(amount) if self.bet_to_call == 0 => {
                self.plan_wager(&ctx, amount, ActionKind::Bet)?
            }
            PlayerAction::Raise(amount) => self.plan_wager(&ctx, amount, ActionKind::Raise)?,
        };

        let mut reopened = false;
        let event = match plan {
            Plan::Fold => {
                let p = &mut self.players[seat];
                p.status = PlayerStatus::Folded;
                p.last_action = "Fold".into();
                self.event(seat, ActionKind::Fold, 0)
            }
            Plan::Check => {
                self.players[seat].last_action = "Check".into();
                self.event(seat, ActionKind::Check, 0)
            }
            Plan::Call(amount) => {
                let paid = self.players[seat].commit(amount);
                self.pot += paid;
                self.players[seat].last_action = format!("Call {}", paid);
                self.event(seat, ActionKind::Call, paid)
            }
            Plan::Wager { total, kind } => {
                let owed = total.saturating_sub(self.players[seat].current_bet);
                let paid = self.players[seat].commit(owed);
                self.pot += paid;
                let new_total = self.players[seat].current_bet;
                let increment = new_total.saturating_sub(self.bet_to_call);
                if increment >= min_raise_increment(&ctx) {
                    self.last_raise_amount = increment;
                }
                self.bet_to_call = new_total;
                self.action_closer_pos = self.prev_seat(seat, Player::is_active).unwrap_or(seat);
                reopened = true;
                let label = if kind == ActionKind::Bet { "Bet" } else { "Raise" };
                self.players[seat].last_action = format!("{} {}", label, new_total);
                self.event(seat, kind, new_total)
            }
        };

        self.actions_taken_this_round += 1;
        if seat == self.action_closer_pos && !reopened {
            self.round_closed = true;
        }
        debug!(
            seat,
            player = %event.player_name,
            action = ?event.action,
            amount = event.amount,
            pot = self.pot,
            bet_to_call = self.bet_to_call,
            "action processed"
        );
        Ok(event)
    }

    fn plan_wager(&self, ctx: &RaiseContext, amount: u32, kind: ActionKind) -> Result<Plan, GameError> {
        let limit = self.rules.betting_limit;
        let max = limit.max_raise(ctx);
        let total = amount.min(max);
        let all_in = total == ctx.all_in_total();
        let minimum = limit.min_raise(ctx);
        let too_small = |amount| match kind {
            ActionKind::Bet => GameError::BetTooSmall { amount, minimum },
            _ => GameError::RaiseTooSmall { amount, minimum },
        };

        if total <= ctx.bet_to_call {
            // cannot put in more than the current bet: only an all-in call remains
            return if all_in && total > ctx.player_current_bet {
                Ok(Plan::Call(total - ctx.player_current_bet))
            } else {
                Err(too_small(amount))
            };
        }
        if total < minimum && !all_in {
            return Err(too_small(amount));
        }
        Ok(Plan::Wager { total, kind })
    }

    fn event(&self, seat: usize, action: ActionKind, amount: u32) -> ActionEvent {
        let p = &self.players[seat];
        ActionEvent {
            seat,
            player_name: p.name.clone(),
            action,
            amount,
            all_in: p.status == PlayerStatus::AllIn,
        }
    }

    /// Moves the turn to the next seat that can still act.
    pub fn advance_turn(&mut self) {
        if let Some(next) = self.next_seat(self.current_turn_pos, Player::is_active) {
            self.current_turn_pos = next;
        }
    }

    /// True when no further action is possible or needed on this street.
    ///
    /// Either at most one player can still act and owes nothing, or every
    /// player who can act has matched the bet and the action closer has acted.
    pub fn is_betting_round_over(&self) -> bool {
        if self.count_non_folded_players() <= 1 {
            return true;
        }
        let active: Vec<&Player> = self.players.iter().filter(|p| p.is_active()).collect();
        let all_matched = active.iter().all(|p| p.current_bet >= self.bet_to_call);
        if active.len() <= 1 {
            return all_matched;
        }
        all_matched && self.round_closed
    }

    /// Moves to the next phase. Reaching the showdown ranks every remaining
    /// hand and pays out the pots; the awards are returned.
    ///
    /// # Errors
    ///
    /// [`GameError::InvariantViolation`] when a remaining hand cannot be
    /// evaluated (the board was never dealt).
    pub fn advance(&mut self) -> Result<Option<Vec<HandResult>>, GameError> {
        let next = self.phase.next(self.rules.community_cards.count);
        debug!(from = self.phase.name(), to = next.name(), "phase change");
        self.phase = next;
        if next == Phase::Showdown {
            return self.showdown().map(Some);
        }
        Ok(None)
    }

    /// Best hand(s) of a seat with the current board.
    pub fn evaluate_player(&self, seat: usize) -> Result<HandEvaluation, GameError> {
        let p = self
            .players
            .get(seat)
            .ok_or_else(|| GameError::InvariantViolation(format!("no seat {}", seat)))?;
        hand::evaluate(&p.hand, &self.community_cards, &self.rules)
    }

    /// Outs for `seat` on the current board; empty outside the flop and turn.
    pub fn outs(&self, seat: usize) -> Result<Vec<Card>, GameError> {
        let p = self
            .players
            .get(seat)
            .ok_or_else(|| GameError::InvariantViolation(format!("no seat {}", seat)))?;
        if !p.in_hand() {
            return Ok(Vec::new());
        }
        hand::find_outs(&p.hand, &self.community_cards, &self.rules)
    }

    fn showdown(&mut self) -> Result<Vec<HandResult>, GameError> {
        let mut evals: Vec<Option<HandEvaluation>> = vec![None; self.players.len()];
        for (seat, p) in self.players.iter().enumerate() {
            if p.in_hand() {
                evals[seat] = Some(hand::evaluate(&p.hand, &self.community_cards, &self.rules)?);
            }
        }

        let contributions: Vec<Contribution> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| Contribution {
                seat,
                amount: p.total_bet_in_hand,
                in_hand: p.in_hand(),
            })
            .collect();
        let pots = build_pots(&contributions);
        let pot_total: u32 = pots.iter().map(|p| p.amount).sum();
        if pot_total != self.pot {
            warn!(pot = self.pot, tiers = pot_total, "pot tiers do not add up to the pot");
        }

        let mut results = Vec::new();
        // highest tier first
        for pot in pots.iter().rev() {
            let mut high_winners: Vec<usize> = Vec::new();
            let mut best_high = None;
            for &seat in &pot.eligible {
                let Some(eval) = evals[seat] else { continue };
                match best_high {
                    Some(best) if eval.high < best => {}
                    Some(best) if eval.high == best => high_winners.push(seat),
                    _ => {
                        best_high = Some(eval.high);
                        high_winners = vec![seat];
                    }
                }
            }

            let mut low_winners: Vec<usize> = Vec::new();
            if self.rules.low_hand.enabled {
                let mut best_low: Option<hand::LowHand> = None;
                for &seat in &pot.eligible {
                    let Some(low) = evals[seat].and_then(|e| e.low) else { continue };
                    match best_low {
                        Some(best) if best.beats(&low) => {}
                        Some(best) if best == low => low_winners.push(seat),
                        _ => {
                            best_low = Some(low);
                            low_winners = vec![seat];
                        }
                    }
                }
            }

            if low_winners.is_empty() {
                self.pay(pot.amount, &high_winners, &evals, false, &mut results);
            } else {
                let low_half = pot.amount / 2;
                let high_half = pot.amount - low_half;
                self.pay(high_half, &high_winners, &evals, false, &mut results);
                self.pay(low_half, &low_winners, &evals, true, &mut results);
            }
        }
        self.pot = 0;
        for r in &results {
            info!(player = %r.player_name, amount = r.amount_won, hand = %r.hand_desc, "pot awarded");
        }
        Ok(results)
    }

    fn pay(
        &mut self,
        amount: u32,
        winners: &[usize],
        evals: &[Option<HandEvaluation>],
        low: bool,
        results: &mut Vec<HandResult>,
    ) {
        let mut ordered = winners.to_vec();
        let n = self.players.len();
        let dealer = self.dealer_pos;
        ordered.sort_by_key(|&seat| (seat + n - dealer - 1) % n);
        for (seat, share) in ordered.iter().zip(split_evenly(amount, ordered.len())) {
            let hand_desc = match (evals[*seat], low) {
                (Some(e), true) => e.low.map(|l| l.describe()).unwrap_or_default(),
                (Some(e), false) => e.high.describe(),
                (None, _) => String::new(),
            };
            let p = &mut self.players[*seat];
            p.add_chips(share);
            results.push(HandResult {
                seat: *seat,
                player_name: p.name.clone(),
                amount_won: share,
                hand_desc,
            });
        }
    }

    /// Gives the whole pot to the only player who has not folded. Returns no
    /// awards when more than one player is still in the hand.
    pub fn award_pot_to_last_player(&mut self) -> Vec<HandResult> {
        if self.count_non_folded_players() != 1 {
            return Vec::new();
        }
        let Some(seat) = self.players.iter().position(Player::in_hand) else {
            return Vec::new();
        };
        let amount = std::mem::take(&mut self.pot);
        let p = &mut self.players[seat];
        p.add_chips(amount);
        info!(player = %p.name, amount, "pot awarded uncontested");
        vec![HandResult {
            seat,
            player_name: p.name.clone(),
            amount_won: amount,
            hand_desc: "the last player standing".into(),
        }]
    }

    /// Ends the hand: eliminates busted players and counts the hand.
    pub fn cleanup_hand(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        for p in &mut self.players {
            if p.chips == 0 && !p.is_eliminated() {
                p.status = PlayerStatus::Eliminated;
                info!(player = %p.name, "eliminated");
                messages.push(format!("{} has been eliminated.", p.name));
            }
        }
        self.hand_count += 1;
        self.phase = Phase::HandOver;
        if self.total_chips_in_play() != self.total_initial_chips {
            warn!(
                in_play = self.total_chips_in_play(),
                expected = self.total_initial_chips,
                "chip count mismatch after hand"
            );
        }
        messages
    }

    /// Next seat after `from` (cyclic, may wrap to `from` itself) matching `pred`.
    fn next_seat(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&seat| pred(&self.players[seat]))
    }

    /// Nearest seat before `from` (cyclic, excluding `from`) matching `pred`.
    fn prev_seat(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (1..n)
            .map(|i| (from + n - i) % n)
            .find(|&seat| pred(&self.players[seat]))
    }
}
