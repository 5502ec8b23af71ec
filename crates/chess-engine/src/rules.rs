//! Game outcome detection.

use crate::movegen::legal_moves;
use crate::{Board, PositionHistory};
use chess_core::Color;
use std::fmt;

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position after which the game is drawn.
pub const REPETITION_LIMIT: usize = 3;

/// State of a game as seen from the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    /// The side to move is mated.
    Checkmate { winner: Color },
    /// The side to move has no legal move but is not in check.
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true if the game has ended.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// 100 half-moves without pawn move or capture.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMoveRule => write!(f, "fifty-move rule"),
            DrawReason::ThreefoldRepetition => write!(f, "threefold repetition"),
        }
    }
}

/// Classifies the board. Checkmate and stalemate take precedence over the
/// draw rules, which apply automatically.
pub fn game_status(board: &Board, history: &PositionHistory) -> GameStatus {
    if legal_moves(board).is_empty() {
        return if board.is_check() {
            GameStatus::Checkmate {
                winner: board.side_to_move().opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if board.halfmove_clock() >= FIFTY_MOVE_HALFMOVES {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }
    if history.count(board) >= REPETITION_LIMIT {
        return GameStatus::Draw(DrawReason::ThreefoldRepetition);
    }
    GameStatus::InProgress
}
