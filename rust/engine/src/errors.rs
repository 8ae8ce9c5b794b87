use thiserror::Error;

/// Errors raised by the game engine.
///
/// The action variants are recoverable: the engine rejects the action before
/// touching any state and the caller may prompt again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Player {0} cannot act in this hand")]
    PlayerCannotAct(usize),
    #[error("Cannot check: {to_call} to call")]
    CannotCheck { to_call: u32 },
    #[error("Cannot bet into an existing bet of {bet_to_call}, raise instead")]
    CannotBet { bet_to_call: u32 },
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    BetTooSmall { amount: u32, minimum: u32 },
    #[error("Invalid raise amount: {amount}, minimum: {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("The betting round is already closed")]
    RoundClosed,
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Game can only be saved between hands")]
    SnapshotMidHand,
}

impl GameError {
    /// True for errors caused by an illegal player action.
    pub fn is_invalid_action(&self) -> bool {
        matches!(
            self,
            GameError::NotPlayersTurn { .. }
                | GameError::PlayerCannotAct(_)
                | GameError::CannotCheck { .. }
                | GameError::CannotBet { .. }
                | GameError::BetTooSmall { .. }
                | GameError::RaiseTooSmall { .. }
                | GameError::NoHandInProgress
                | GameError::RoundClosed
        )
    }
}

/// Errors raised while writing, reading or restoring save files.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse save file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save file {0} does not exist")]
    NotFound(String),
    #[error("invalid save file: {0}")]
    Invalid(String),
    #[error("unsupported save file version: {0}")]
    UnsupportedVersion(String),
    #[error(transparent)]
    Game(#[from] GameError),
}
