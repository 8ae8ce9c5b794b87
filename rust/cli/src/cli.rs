//! Command-line surface: the root command plays a game, subcommands manage
//! save files and show the resolved configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::FlagOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "pls7",
    version,
    about = "Play Pot-Limit Sampo (PLS7, PLS, NLH) against five CPU opponents"
)]
pub struct Pls7Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// Game rule: pls7, pls, nlh, or a path to a rules .toml file
    #[arg(short = 'r', long)]
    pub rule: Option<String>,

    /// CPU difficulty: easy, medium or hard
    #[arg(short = 'd', long)]
    pub difficulty: Option<String>,

    /// Verbose diagnostic logging on stderr and face-up CPU cards
    #[arg(long)]
    pub dev: bool,

    /// Show the cards that would improve your hand on the flop and turn
    #[arg(long = "outs")]
    pub outs: bool,

    /// Hands between blind doublings (0 disables)
    #[arg(long = "blind-up")]
    pub blind_up: Option<u32>,

    /// Starting chips for every player
    #[arg(long)]
    pub initial_chips: Option<u32>,

    /// Small blind; the big blind is twice this
    #[arg(long)]
    pub small_blind: Option<u32>,

    /// Resume the most recent saved game
    #[arg(short = 'l', long)]
    pub load: bool,

    /// Resume a specific save (name in the save directory, or a path)
    #[arg(long, value_name = "FILE")]
    pub load_file: Option<String>,

    /// Directory holding save files
    #[arg(long, global = true, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Seed for the deck and the CPUs; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before each CPU action, in milliseconds
    #[arg(long, value_name = "MS")]
    pub cpu_think_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage saved games
    Saves {
        #[command(subcommand)]
        action: SavesAction,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

#[derive(Subcommand, Debug)]
pub enum SavesAction {
    /// List saved games, newest first
    List,
    /// Check that a save file can be loaded
    Validate { file: String },
    /// Delete a save file
    Delete {
        file: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

impl Pls7Cli {
    pub fn overrides(&self) -> FlagOverrides {
        FlagOverrides {
            rule: self.rule.clone(),
            difficulty: self.difficulty.clone(),
            initial_chips: self.initial_chips,
            small_blind: self.small_blind,
            blind_up_interval: self.blind_up,
            seed: self.seed,
            save_dir: self.save_dir.clone(),
            cpu_think_ms: self.cpu_think_ms,
            dev: self.dev,
            show_outs: self.outs,
        }
    }
}
