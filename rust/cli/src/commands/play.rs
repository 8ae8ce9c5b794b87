//! # Play Command
//!
//! The interactive game: one human ("YOU") against five CPU seats.
//!
//! Each hand runs the engine's driving loop: deal, betting rounds street by
//! street, then a showdown or an uncontested award, then cleanup. Between
//! hands the player can continue, save the game, or quit. A saved game
//! resumes at the start of the next hand.

use std::io::{BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use pls7_ai::{ActionProvider, CpuPlayer, Difficulty, decide_current};
use pls7_engine::game::{ActionEvent, Game, GameSetup, HandResult, Phase, SeatSetup};
use pls7_engine::player::PlayerAction;
use pls7_engine::save::{SaveManager, load_game_file};
use tracing::{info, warn};

use crate::config::{Config, load_rules};
use crate::error::CliError;
use crate::formatters::{
    format_action_event, format_cards, format_hand_result, format_hidden, format_number,
};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

/// Seats of a new game, human first.
pub const PLAYER_NAMES: [&str; 6] = ["YOU", "CPU 1", "CPU 2", "CPU 3", "CPU 4", "CPU 5"];

const NEXT_HAND_PROMPT: &str =
    "Press ENTER to start the next hand, type 's' to save, or type 'q' to exit > ";
const ACTION_PROMPT: &str = "Action (fold/check/call/bet N/raise N/allin/q) > ";

/// Where a resumed game comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    /// Newest file in the save directory
    Latest,
    /// A file name in the save directory, or a path
    File(String),
}

enum HandOutcome {
    Completed,
    Quit,
}

/// Handle the root command: build or load a game and play until it ends or
/// the player quits.
///
/// # Errors
///
/// Configuration problems (unknown rule, bad rules file), load failures and
/// I/O errors are returned. Closing the input while a decision is pending
/// yields [`CliError::Interrupted`].
pub fn handle_play_command(
    cfg: &Config,
    load: Option<LoadRequest>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut game = match load {
        Some(request) => load_saved_game(cfg, request, out)?,
        None => new_game(cfg, out, err)?,
    };
    let ai = CpuPlayer::default();

    loop {
        if let HandOutcome::Quit = play_hand(&mut game, &ai, cfg, out, err, stdin)? {
            writeln!(out, "Thanks for playing!")?;
            return Ok(());
        }

        for msg in game.cleanup_hand() {
            writeln!(out, "{}", msg)?;
        }

        if human_seat(&game).is_some_and(|seat| game.players()[seat].is_eliminated()) {
            writeln!(out, "You have been eliminated. GAME OVER.")?;
            return Ok(());
        }
        if game.is_game_over() {
            ui::banner(out, "GAME OVER")?;
            return Ok(());
        }

        if !between_hands(&game, cfg, out, err, stdin)? {
            writeln!(out, "Thanks for playing!")?;
            return Ok(());
        }
    }
}

fn new_game(cfg: &Config, out: &mut dyn Write, err: &mut dyn Write) -> Result<Game, CliError> {
    let rules = load_rules(&cfg.rule)?;
    let difficulty = match cfg.difficulty.parse::<Difficulty>() {
        Ok(d) => d,
        Err(e) => {
            warn!(difficulty = %cfg.difficulty, "unknown difficulty, using medium");
            ui::display_warning(err, &format!("{}; defaulting to medium", e))?;
            Difficulty::Medium
        }
    };
    let seed = cfg.seed.unwrap_or_else(rand::random);

    let players = PLAYER_NAMES
        .iter()
        .enumerate()
        .map(|(seat, name)| SeatSetup {
            name: (*name).to_string(),
            is_cpu: seat > 0,
            profile: (seat > 0).then(|| difficulty.profile_for_seat(seat - 1)),
        })
        .collect();
    let setup = GameSetup {
        players,
        initial_chips: cfg.initial_chips,
        small_blind: cfg.small_blind,
        big_blind: cfg.big_blind()?,
        blind_up_interval: cfg.blind_up_interval,
        rules: rules.clone(),
        seed,
    };
    let game = Game::new(setup)?;

    writeln!(out, "======== {} ========", rules.name)?;
    writeln!(out, "Difficulty: {} | Seed: {}", difficulty, seed)?;
    info!(rules = %rules.abbreviation, %difficulty, seed, "new game");
    Ok(game)
}

fn load_saved_game(
    cfg: &Config,
    request: LoadRequest,
    out: &mut dyn Write,
) -> Result<Game, CliError> {
    let loaded = match &request {
        LoadRequest::Latest => {
            writeln!(out, "Loading most recent saved game...")?;
            SaveManager::new(&cfg.save_dir).and_then(|m| m.load_game(""))
        }
        LoadRequest::File(name) => {
            writeln!(out, "Loading saved game from {}...", name)?;
            let path = Path::new(name);
            if path.is_file() {
                load_game_file(path)
            } else {
                SaveManager::new(&cfg.save_dir).and_then(|m| m.load_game(name))
            }
        }
    };
    let game = loaded.map_err(|e| {
        CliError::Engine(format!(
            "failed to load saved game: {} (saves are read from '{}')",
            e,
            cfg.save_dir.display()
        ))
    })?;

    writeln!(
        out,
        "Game loaded successfully! Starting new hand with Hand #{}",
        game.hand_count() + 1
    )?;
    writeln!(
        out,
        "Players: {}, Total chips in play: {}",
        game.players().len(),
        format_number(game.total_initial_chips())
    )?;
    Ok(game)
}

fn human_seat(game: &Game) -> Option<usize> {
    game.players().iter().position(|p| !p.is_cpu)
}

/// Plays one hand up to, but not including, cleanup.
fn play_hand(
    game: &mut Game,
    ai: &dyn ActionProvider,
    cfg: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HandOutcome, CliError> {
    if game.is_game_over() {
        return Ok(HandOutcome::Completed);
    }
    if let Some(blinds) = game.start_new_hand() {
        writeln!(
            out,
            "\n*** Blinds are now {}/{} ***",
            format_number(blinds.small_blind),
            format_number(blinds.big_blind)
        )?;
    }
    display_game_state(game, cfg.dev, out)?;

    let mut showdown = None;
    while !matches!(game.phase(), Phase::Showdown | Phase::HandOver) {
        if game.count_non_folded_players() <= 1 {
            break;
        }
        game.prepare_new_betting_round();
        if game.phase() != Phase::PreFlop && !game.community_cards().is_empty() {
            writeln!(
                out,
                "\n** {} ** {}",
                game.phase().name(),
                format_cards(game.community_cards())
            )?;
        }

        while !game.is_betting_round_over() {
            if !game.current_player().is_active() {
                game.advance_turn();
                continue;
            }
            let seat = game.current_turn_pos();
            let event = if game.current_player().is_cpu {
                cpu_turn(game, ai, seat, cfg.cpu_think_ms)?
            } else {
                let show_outs = cfg.show_outs || cfg.dev;
                match human_turn(game, seat, show_outs, out, err, stdin)? {
                    Some(event) => event,
                    None => return Ok(HandOutcome::Quit),
                }
            };
            writeln!(out, "{}", format_action_event(&event))?;
            game.advance_turn();
        }

        if game.count_non_folded_players() <= 1 {
            break;
        }
        if let Some(results) = game.advance()? {
            showdown = Some(results);
        }
    }

    match showdown {
        Some(results) => display_showdown(game, &results, out)?,
        None => {
            let results = game.award_pot_to_last_player();
            ui::banner(out, "POT AWARDED")?;
            for result in &results {
                writeln!(out, "{}", format_hand_result(result))?;
            }
            writeln!(out, "------------------------")?;
        }
    }
    Ok(HandOutcome::Completed)
}

fn cpu_turn(
    game: &mut Game,
    ai: &dyn ActionProvider,
    seat: usize,
    think_ms: u64,
) -> Result<ActionEvent, CliError> {
    if think_ms > 0 {
        thread::sleep(Duration::from_millis(think_ms));
    }
    let action = decide_current(game, ai);
    match game.process_action(seat, action) {
        Ok(event) => Ok(event),
        Err(e) => {
            warn!(seat, ?action, error = %e, "cpu action rejected, checking or calling instead");
            let fallback = if game.to_call(seat) > 0 {
                PlayerAction::Call
            } else {
                PlayerAction::Check
            };
            Ok(game.process_action(seat, fallback)?)
        }
    }
}

/// Prompts until the engine accepts an action. `None` means the player quit.
fn human_turn(
    game: &mut Game,
    seat: usize,
    show_outs: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<ActionEvent>, CliError> {
    loop {
        display_turn(game, seat, show_outs, out)?;
        ui::prompt(out, ACTION_PROMPT)?;
        let Some(line) = read_stdin_line(stdin) else {
            return Err(CliError::Interrupted("input closed while waiting for an action".into()));
        };
        let action = match parse_player_action(&line) {
            ParseResult::Action(action) => action,
            ParseResult::AllIn => all_in_action(game, seat),
            ParseResult::Quit => return Ok(None),
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };
        match game.process_action(seat, action) {
            Ok(event) => return Ok(Some(event)),
            Err(e) => ui::write_error(err, &e.to_string())?,
        }
    }
}

/// The whole stack as a bet or raise; the engine turns it into a call when
/// it cannot cover the current bet and caps it at the pot limit.
fn all_in_action(game: &Game, seat: usize) -> PlayerAction {
    let p = &game.players()[seat];
    let total = p.current_bet + p.chips;
    if game.bet_to_call() == 0 {
        PlayerAction::Bet(total)
    } else {
        PlayerAction::Raise(total)
    }
}

/// Returns `false` when the player asked to quit or closed the input.
fn between_hands(
    game: &Game,
    cfg: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<bool, CliError> {
    loop {
        ui::prompt(out, NEXT_HAND_PROMPT)?;
        let Some(input) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(false);
        };
        match input.to_lowercase().as_str() {
            "q" | "quit" => return Ok(false),
            "s" | "save" => {
                match SaveManager::new(&cfg.save_dir).and_then(|m| m.save_game(game, "")) {
                    Ok(path) => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        writeln!(out, "Game saved successfully as {}", name)?;
                        writeln!(out, "You can resume it later with: pls7 --load")?;
                    }
                    Err(e) => ui::write_error(err, &format!("Failed to save game: {}", e))?,
                }
            }
            _ => return Ok(true),
        }
    }
}

fn display_game_state(game: &Game, dev: bool, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "=== Hand #{} | Blinds {}/{} | Pot {} ===",
        game.hand_count() + 1,
        format_number(game.small_blind()),
        format_number(game.big_blind()),
        format_number(game.pot())
    )?;
    for p in game.players().iter().filter(|p| !p.is_eliminated()) {
        let button = if p.position == game.dealer_pos() { "D" } else { " " };
        let cards = if !p.is_cpu || dev {
            format_cards(&p.hand)
        } else {
            format_hidden(p.hand.len())
        };
        writeln!(
            out,
            "{} {:<6} {:>12}  {}  {}",
            button,
            p.name,
            format_number(p.chips),
            cards,
            p.last_action
        )?;
    }
    Ok(())
}

fn display_turn(
    game: &Game,
    seat: usize,
    show_outs: bool,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let p = &game.players()[seat];
    writeln!(out)?;
    writeln!(
        out,
        "{} | Pot: {} | Board: {}",
        game.phase().name(),
        format_number(game.pot()),
        format_cards(game.community_cards())
    )?;
    writeln!(
        out,
        "Your hand: {} | Chips: {}",
        format_cards(&p.hand),
        format_number(p.chips)
    )?;
    if show_outs {
        match game.outs(seat) {
            Ok(outs) if !outs.is_empty() => {
                writeln!(out, "Outs ({}): {}", outs.len(), format_cards(&outs))?;
            }
            Ok(_) => {}
            Err(e) => warn!(seat, error = %e, "cannot compute outs"),
        }
    }
    let to_call = game.to_call(seat);
    if to_call > 0 {
        writeln!(out, "To call: {}", format_number(to_call.min(p.chips)))?;
    }
    let (min, max) = game.raise_bounds(seat);
    if max > game.bet_to_call() {
        let verb = if game.bet_to_call() == 0 { "Bet" } else { "Raise to" };
        writeln!(
            out,
            "{}: {} - {}",
            verb,
            format_number(min.min(max)),
            format_number(max)
        )?;
    }
    Ok(())
}

fn display_showdown(game: &Game, results: &[HandResult], out: &mut dyn Write) -> std::io::Result<()> {
    ui::banner(out, "SHOWDOWN")?;
    writeln!(out, "Board: {}", format_cards(game.community_cards()))?;
    for p in game.players().iter().filter(|p| p.in_hand()) {
        let desc = match game.evaluate_player(p.position) {
            Ok(eval) => match eval.low {
                Some(low) => format!("{} / {}", eval.high.describe(), low.describe()),
                None => eval.high.describe(),
            },
            Err(_) => String::new(),
        };
        writeln!(out, "{}: {} {}", p.name, format_cards(&p.hand), desc)?;
    }
    for result in results {
        writeln!(out, "{}", format_hand_result(result))?;
    }
    writeln!(out, "------------------------")
}
