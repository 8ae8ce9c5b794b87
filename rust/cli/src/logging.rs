//! Diagnostic logging setup.
//!
//! Game text goes to stdout; tracing output goes to stderr so the two never
//! interleave on the same stream.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(dev: bool) -> &'static str {
    if dev {
        "warn,pls7_engine=debug,pls7_ai=debug,pls7_cli=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Later calls are no-ops, so embedding
/// `run` several times in one process (as the tests do) is fine.
pub fn init_logging(dev: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(dev)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(dev)
        .with_line_number(dev)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_mode_enables_debug_for_the_game_crates() {
        assert_eq!(default_filter(false), "warn");
        let dev = default_filter(true);
        for krate in ["pls7_engine", "pls7_ai", "pls7_cli"] {
            assert!(dev.contains(&format!("{}=debug", krate)));
        }
    }

    #[test]
    fn filters_parse() {
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
        assert!(EnvFilter::try_new(default_filter(false)).is_ok());
    }
}
