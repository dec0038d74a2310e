//! Error types for the tic-tac-toe learner crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position already taken: ({row}, {col})")]
    PositionTaken { row: usize, col: usize },

    #[error("game already ended")]
    GameEnded,

    #[error("position ({row}, {col}) is out of bounds (row and column must be 0-2)")]
    InvalidPosition { row: usize, col: usize },

    #[error("cell index {index} is out of bounds (must be 0-8)")]
    InvalidCellIndex { index: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("cannot read a move from '{input}' (expected 'row col' with values 0-2)")]
    InvalidMoveInput { input: String },

    #[error("board string must have exactly {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid player '{player}' in '{context}' (expected 'X' or 'O')")]
    InvalidPlayerString { player: String, context: String },

    #[error("invalid agent '{input}'. Expected one of: {expected}")]
    ParseAgentKind { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Whether the error is one of the recoverable move-application failures.
    ///
    /// Interactive callers display these and ask for another move.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            Error::PositionTaken { .. }
                | Error::GameEnded
                | Error::InvalidPosition { .. }
                | Error::InvalidCellIndex { .. }
                | Error::InvalidMoveInput { .. }
        )
    }
}
