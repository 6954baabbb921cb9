use thiserror::Error;

use crate::board::{Move, Square};

/// Errors raised by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A coordinate fell outside the 8x8 grid. Move generation filters these
    /// before anything reaches a caller.
    #[error("square ({x}, {y}) is off the board")]
    OutOfBounds { x: i8, y: i8 },

    /// An externally proposed grid is not the result of exactly one legal move.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// A move reached the transition engine without being a legal move for
    /// the piece on its origin square.
    #[error("invalid transition: {mv} from {from}")]
    InvalidTransition { from: Square, mv: Move },

    #[error("game is already over")]
    GameOver,

    #[error("invalid cell value {0:#04x}")]
    InvalidCell(u8),

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Unknown, consumed, expired, or issued for another position.
    #[error("unknown cursor {0}")]
    UnknownCursor(String),
}
