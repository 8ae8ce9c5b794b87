//! # pls7 CLI Library
//!
//! Command-line front end for the PLS7 poker engine: a terminal game of
//! Pot-Limit Sampo (or any variant described by a rules file) against five
//! CPU opponents, with save files to resume later.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves the configuration and dispatches.
//! Streams are injected so the whole program can be driven from tests.
//!
//! ```no_run
//! use std::io;
//! let stdin = io::stdin();
//! let code = pls7_cli::run(
//!     ["pls7", "--rule", "nlh", "--seed", "42"],
//!     &mut io::stdout(),
//!     &mut io::stderr(),
//!     &mut stdin.lock(),
//! );
//! assert_eq!(code, 0);
//! ```
//!
//! ## Commands
//!
//! - *(none)*: play a new game, or resume one with `--load` / `--load-file`
//! - `saves list|validate <file>|delete <file>`: manage save files
//! - `cfg`: show the resolved configuration and where each value came from

use std::io::{BufRead, Write};

use clap::Parser;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, Pls7Cli};
use commands::{LoadRequest, handle_cfg_command, handle_play_command, handle_saves_command};

pub use commands::PLAYER_NAMES;
pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when the input closed
/// while the game was waiting for a decision.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write, stdin: &mut dyn BufRead) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match Pls7Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write!(err, "{}", e);
                    exit_code::ERROR
                }
            };
        }
    };

    let resolved = match config::load_with_sources(&cli.overrides()) {
        Ok(resolved) => resolved,
        Err(e) => return report(CliError::from(e), err),
    };
    logging::init_logging(resolved.config.dev);

    let result = match cli.cmd {
        Some(Commands::Cfg) => handle_cfg_command(&resolved, out),
        Some(Commands::Saves { action }) => {
            handle_saves_command(action, &resolved.config, out, stdin)
        }
        None => {
            let load = match (cli.load_file, cli.load) {
                (Some(file), _) => Some(LoadRequest::File(file)),
                (None, true) => Some(LoadRequest::Latest),
                (None, false) => None,
            };
            handle_play_command(&resolved.config, load, out, err, stdin)
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => report(e, err),
    }
}

fn report(e: CliError, err: &mut dyn Write) -> i32 {
    let _ = ui::write_error(err, &e.to_string());
    match e {
        CliError::Interrupted(_) => exit_code::INTERRUPTED,
        _ => exit_code::ERROR,
    }
}
