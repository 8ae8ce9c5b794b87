//! Input parsing and validation for the interactive game loop.
//!
//! Parsing only checks syntax. Whether an action is legal at the table is
//! decided by the engine, which rejects illegal actions without changing
//! state so the loop can simply prompt again.

use pls7_engine::player::PlayerAction;

/// Result of parsing one line of player input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// Commit the whole stack; resolved against the table by the caller
    AllIn,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepts the following input formats (case-insensitive):
/// - "f" or "fold" → Fold
/// - "k" or "check" → Check
/// - "c" or "call" → Call
/// - "bet X" / "b X" → Bet to a street total of X
/// - "raise X" / "r X" → Raise to a street total of X
/// - "allin" or "all-in" → All-in
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// # use pls7_cli::validation::{parse_player_action, ParseResult};
/// use pls7_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("k"), ParseResult::Action(PlayerAction::Check));
/// assert_eq!(parse_player_action("raise 1,600"), ParseResult::Action(PlayerAction::Raise(1600)));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("invalid") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "k" => ParseResult::Action(PlayerAction::Check),
        "call" | "c" => ParseResult::Action(PlayerAction::Call),
        "allin" | "all-in" => ParseResult::AllIn,
        "bet" | "b" => match parse_amount(parts.get(1).copied(), "Bet", "bet 1000") {
            Ok(amount) => ParseResult::Action(PlayerAction::Bet(amount)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        "raise" | "r" => match parse_amount(parts.get(1).copied(), "Raise", "raise 2000") {
            Ok(amount) => ParseResult::Action(PlayerAction::Raise(amount)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, bet <amount>, raise <amount>, allin, q",
            verb
        )),
    }
}

/// Parses a positive chip amount; thousands separators are accepted.
fn parse_amount(raw: Option<&str>, what: &str, example: &str) -> Result<u32, String> {
    let raw = raw.ok_or_else(|| format!("{} requires an amount (e.g., '{}')", what, example))?;
    match raw.replace(',', "").parse::<u32>() {
        Ok(amount) if amount > 0 => Ok(amount),
        Ok(_) => Err(format!("{} amount must be positive", what)),
        Err(_) => Err(format!("Invalid {} amount '{}'", what.to_lowercase(), raw)),
    }
}

/// Answer to a y/N confirmation; anything but `y`/`yes` is a no.
pub fn is_confirmed(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
