//! `pls7 saves list|validate|delete`: save-file management.

use std::io::{BufRead, Write};

use pls7_engine::save::SaveManager;

use crate::cli::SavesAction;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_number;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::is_confirmed;

pub fn handle_saves_command(
    action: SavesAction,
    cfg: &Config,
    out: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let manager = SaveManager::new(&cfg.save_dir)?;
    match action {
        SavesAction::List => list_saves(&manager, out),
        SavesAction::Validate { file } => validate_save(&manager, &file, out),
        SavesAction::Delete { file, yes } => delete_save(&manager, &file, yes, out, stdin),
    }
}

fn list_saves(manager: &SaveManager, out: &mut dyn Write) -> Result<(), CliError> {
    let saves = manager.list_saves()?;
    let dir = manager.save_dir().display();
    if saves.is_empty() {
        writeln!(out, "No saved games found in directory: {}", dir)?;
        return Ok(());
    }

    writeln!(out, "Saved games in {}:", dir)?;
    writeln!(out, "==========================================")?;
    for (i, save) in saves.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, save.filename)?;
        writeln!(
            out,
            "   Modified: {}",
            save.modified.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "   Size: {} bytes", save.size)?;
        match &save.metadata {
            Some(meta) => {
                writeln!(out, "   Hand: #{}", meta.hand_count)?;
                writeln!(
                    out,
                    "   Blinds: {}/{}",
                    format_number(meta.small_blind),
                    format_number(meta.big_blind)
                )?;
            }
            None => writeln!(out, "   (unreadable)")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

fn validate_save(manager: &SaveManager, file: &str, out: &mut dyn Write) -> Result<(), CliError> {
    match manager.validate_save_file(file) {
        Ok(()) => {
            writeln!(out, "Save file '{}' is valid and can be loaded.", file)?;
            Ok(())
        }
        Err(e) => Err(CliError::InvalidInput(format!(
            "save file '{}' is invalid: {}",
            file, e
        ))),
    }
}

fn delete_save(
    manager: &SaveManager,
    file: &str,
    yes: bool,
    out: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if !yes {
        ui::prompt(out, &format!("Are you sure you want to delete '{}'? (y/N): ", file))?;
        let answer = read_stdin_line(stdin).unwrap_or_default();
        if !is_confirmed(&answer) {
            writeln!(out, "Deletion cancelled.")?;
            return Ok(());
        }
    }
    manager.delete_save(file)?;
    writeln!(out, "Save file '{}' deleted successfully.", file)?;
    Ok(())
}
