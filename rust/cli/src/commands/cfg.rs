//! `pls7 cfg`: the resolved configuration as JSON, one `{value, source}`
//! pair per field.

use std::io::Write;

use serde_json::json;

use crate::config::ConfigResolved;
use crate::error::CliError;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let c = &resolved.config;
    let s = &resolved.sources;
    let doc = json!({
        "rule": { "value": c.rule, "source": s.rule },
        "difficulty": { "value": c.difficulty, "source": s.difficulty },
        "initial_chips": { "value": c.initial_chips, "source": s.initial_chips },
        "small_blind": { "value": c.small_blind, "source": s.small_blind },
        "blind_up_interval": { "value": c.blind_up_interval, "source": s.blind_up_interval },
        "seed": { "value": c.seed, "source": s.seed },
        "save_dir": { "value": c.save_dir, "source": s.save_dir },
        "cpu_think_ms": { "value": c.cpu_think_ms, "source": s.cpu_think_ms },
        "dev": { "value": c.dev, "source": s.dev },
        "show_outs": { "value": c.show_outs, "source": s.show_outs },
    });
    let text = serde_json::to_string_pretty(&doc)
        .map_err(|e| CliError::Config(format!("cannot render configuration: {}", e)))?;
    writeln!(out, "{}", text)?;
    Ok(())
}
