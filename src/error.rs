//! Error type shared by the engine, the board parser and the tile comparison.
use thiserror::Error;

/// Errors surfaced by the public operations of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A direction name other than `up`, `down`, `left` or `right`.
    #[error("invalid direction '{0}': expected one of up, down, left, right")]
    InvalidDirection(String),

    /// A tile was compared against a value that is neither a tile nor an integer.
    #[error("cannot compare Tile with {0}")]
    TypeMismatch(&'static str),

    /// A textual board layout could not be turned into a `Board`.
    #[error("invalid board: {0}")]
    InvalidBoard(String),
}
