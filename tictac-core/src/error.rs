//! Error types for board handling

/// Errors raised by board construction and transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid action: cell ({row}, {col}) is already occupied")]
    InvalidAction { row: u8, col: u8 },

    #[error("Action ({row}, {col}) is outside the 3x3 board")]
    OutOfBounds { row: u8, col: u8 },

    #[error("Failed to parse board: {0}")]
    ParseBoard(String),

    #[error("Malformed board: {0}")]
    MalformedBoard(String),
}
