//! File and input helpers shared by the commands.
//!
//! - Reading trimmed lines from stdin (interactive input)
//! - Reading text files with a UTF-8 BOM stripped (variant TOML files)

use std::io::BufRead;
use std::path::Path;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Trims surrounding whitespace. Returns `None` on EOF or a read error.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use pls7_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, dropping a leading UTF-8 BOM if present.
pub fn read_text(path: &Path) -> Result<String, std::io::Error> {
    let mut content = std::fs::read_to_string(path)?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
