//! Card, number, and event formatters for terminal display.
//!
//! Pure functions that turn engine values into the text the game loop
//! prints. Card suits use Unicode symbols with an ASCII fallback for
//! terminals that cannot render them.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use pls7_engine::cards::{Card, Rank, Suit};
//! use pls7_cli::formatters::{format_cards, format_number};
//!
//! let hand = vec![Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ten, Suit::Hearts)];
//! assert!(format_cards(&hand) == "[A♠ T♥]" || format_cards(&hand) == "[As Th]");
//! assert_eq!(format_number(1_234_567), "1,234,567");
//! ```

use pls7_engine::cards::{Card, Rank, Suit};
use pls7_engine::game::{ActionEvent, ActionKind, HandResult};

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Single-character rank (2-9, T, J, Q, K, A).
pub fn format_rank(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(card.rank), format_suit(card.suit))
}

/// Cards in bracket notation, e.g. `[A♠ K♥ Q♦]`; `[]` when empty.
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// `count` face-down cards, e.g. `[? ? ?]`.
pub fn format_hidden(count: usize) -> String {
    format!("[{}]", vec!["?"; count].join(" "))
}

/// Formats a chip amount with thousands separators.
///
/// ```rust
/// # use pls7_cli::formatters::format_number;
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(999), "999");
/// assert_eq!(format_number(300_000), "300,000");
/// ```
pub fn format_number(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Announcement line for a processed action, e.g. `CPU 2 raises to 1,600.`
pub fn format_action_event(event: &ActionEvent) -> String {
    let name = &event.player_name;
    let amount = format_number(event.amount);
    let line = match event.action {
        ActionKind::Fold => format!("{} folds.", name),
        ActionKind::Check => format!("{} checks.", name),
        ActionKind::Call => format!("{} calls {}.", name, amount),
        ActionKind::Bet => format!("{} bets {}.", name, amount),
        ActionKind::Raise => format!("{} raises to {}.", name, amount),
    };
    if event.all_in && event.action != ActionKind::Fold {
        format!("{} (all-in)", line)
    } else {
        line
    }
}

/// `YOU wins 12,000 chips with Two Pair, Kings and Sevens`
pub fn format_hand_result(result: &HandResult) -> String {
    format!(
        "{} wins {} chips with {}",
        result.player_name,
        format_number(result.amount_won),
        result.hand_desc
    )
}
