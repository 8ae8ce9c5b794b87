//! # pls7-engine: Poker Game Engine Core
//!
//! A rule-driven engine for multi-player community-card poker. One engine
//! plays No-Limit Hold'em, Pot-Limit Sampo (three hole cards) and Pot-Limit
//! Sampo Hi-Lo; the variant is data ([`rules::GameRules`]), not code.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - 52-card deck shuffled from the game's seeded RNG
//! - [`rules`] - Variant descriptors and the built-in presets
//! - [`hand`] - High and low hand evaluation under the variant's hole-card rules
//! - [`betting`] - Pot-limit and no-limit raise bounds
//! - [`player`] - Player state, actions and stack management
//! - [`profile`] - Behavioral parameters of CPU players
//! - [`pot`] - Main pot and side pot construction
//! - [`game`] - The hand state machine: blinds, turns, streets, showdown
//! - [`save`] - Snapshots between hands and the save-file directory
//! - [`errors`] - Error types for game and save operations
//!
//! ## Quick Start
//!
//! ```rust
//! use pls7_engine::cards::{Card, Rank, Suit};
//! use pls7_engine::hand::evaluate;
//! use pls7_engine::rules::GameRules;
//!
//! let rules = GameRules::no_limit_holdem();
//! let hole = [Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::King, Suit::Hearts)];
//! let board = [
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let eval = evaluate(&hole, &board, &rules).unwrap();
//! assert_eq!(eval.high.describe(), "Royal Flush");
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Every random draw comes from the game's single ChaCha20 stream, so a seed
//! replays a whole session:
//!
//! ```rust
//! use pls7_engine::game::{Game, GameSetup};
//! use pls7_engine::rules::GameRules;
//!
//! let setup = GameSetup::humans(&["A", "B"], 1_000, 5, 10, GameRules::pot_limit_sampo(), 42);
//! let mut g1 = Game::new(setup.clone()).unwrap();
//! let mut g2 = Game::new(setup).unwrap();
//! g1.start_new_hand();
//! g2.start_new_hand();
//! assert_eq!(g1.players()[0].hand, g2.players()[0].hand);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod player;
pub mod pot;
pub mod profile;
pub mod rules;
pub mod save;
