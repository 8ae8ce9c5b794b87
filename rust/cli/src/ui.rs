//! UI helper functions for terminal output formatting.
//!
//! Consistent error, warning and prompt output across CLI commands.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Writes a prompt without a trailing newline and flushes it.
pub fn prompt(out: &mut dyn Write, text: &str) -> std::io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

/// Section divider, e.g. `--- SHOWDOWN ---`.
pub fn banner(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "--- {} ---", title)
}
