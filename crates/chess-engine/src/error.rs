//! Engine error types.

use chess_core::{Color, FenError};
use thiserror::Error;

/// Why a move submitted as text or as a [`Move`](chess_core::Move) was rejected.
///
/// All variants are user-correctable: the board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The text is not well-formed algebraic notation.
    #[error("could not parse '{text}': {reason}")]
    Parse { text: String, reason: String },

    /// More than one legal move matches the notation.
    #[error("ambiguous move '{text}', could be {}", .candidates.join(" or "))]
    Ambiguous {
        text: String,
        candidates: Vec<String>,
    },

    /// The move is well-formed but not legal in the current position.
    #[error("illegal move '{0}'")]
    Illegal(String),
}

impl MoveError {
    pub(crate) fn parse(text: &str, reason: impl Into<String>) -> Self {
        MoveError::Parse {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors building a [`Board`](crate::Board) from FEN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },

    #[error("pawn on {0}, pawns cannot stand on the first or last rank")]
    PawnOnBackRank(String),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}
