//! Command handler modules for the pls7 CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output and input streams passed in as `&mut dyn Write` / `&mut dyn BufRead`
//! - Errors propagated as `CliError`

mod cfg;
mod play;
mod saves;

pub use cfg::handle_cfg_command;
pub use play::{LoadRequest, PLAYER_NAMES, handle_play_command};
pub use saves::handle_saves_command;
