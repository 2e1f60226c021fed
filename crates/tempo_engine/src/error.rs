//! Error types for the engine
//!
//! Running out of time is not an error: an interrupted search still produces
//! a move. The variants below cover the remaining failure cases: positions
//! without a move to return, bad position input handed to the board adapter,
//! and invalid configuration.

use thiserror::Error;

/// Errors that can occur in the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The side to move has no legal move (checkmate or stalemate)
    #[error("No legal moves available in this position")]
    NoLegalMoves,

    /// FEN string could not be parsed or describes an illegal setup
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Coordinate move is not legal in the current position
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: String },

    /// Configuration values out of range
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file I/O error
    #[error("Configuration I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration deserialization error
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
