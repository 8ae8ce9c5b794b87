//! Shared fixtures for the CLI integration tests.
//!
//! `run_cli` drives `pls7_cli::run` in process with a scripted stdin and
//! captures both output streams. `saved_game` writes a real save file through
//! the engine so the load and `saves` paths have something to read.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use pls7_ai::Difficulty;
use pls7_engine::game::{Game, GameSetup, SeatSetup};
use pls7_engine::rules::GameRules;
use pls7_engine::save::SaveManager;

#[derive(Debug)]
pub struct CliOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str], input: &str) -> CliOutput {
    let mut argv = vec!["pls7"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let exit_code = pls7_cli::run(argv, &mut out, &mut err, &mut stdin);
    CliOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// A fresh six-seat table with the human in seat 0.
pub fn table(seed: u64) -> Game {
    let mut setup = GameSetup::humans(
        &pls7_cli::PLAYER_NAMES,
        10_000,
        50,
        100,
        GameRules::pot_limit_sampo_hi_lo(),
        seed,
    );
    for (i, seat) in setup.players.iter_mut().enumerate().skip(1) {
        *seat = SeatSetup {
            name: seat.name.clone(),
            is_cpu: true,
            profile: Some(Difficulty::Easy.profile_for_seat(i - 1)),
        };
    }
    Game::new(setup).expect("valid table")
}

pub fn saved_game(dir: &Path, name: &str) -> PathBuf {
    let manager = SaveManager::new(dir).expect("save dir");
    manager.save_game(&table(99), name).expect("save game")
}
