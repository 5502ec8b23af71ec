//! Session error types.

use chess_engine::{Color, MoveError};
use thiserror::Error;

/// Why a session operation was refused.
///
/// A refused operation never changes the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no game '{0}'")]
    NoSuchGame(String),

    #[error("a game '{0}' already exists")]
    GameAlreadyExists(String),

    #[error("game '{0}' already has two players")]
    GameFull(String),

    #[error("game '{0}' is over")]
    GameFinished(String),

    #[error("{0} is not playing in this game")]
    NotAParticipant(String),

    #[error("it is {to_move}'s turn")]
    NotYourTurn { participant: String, to_move: Color },

    #[error("playing against yourself is disabled")]
    SelfPlayDisabled,

    #[error("game '{0}' is waiting for an opponent")]
    WaitingForOpponent(String),

    #[error(transparent)]
    Move(#[from] MoveError),
}
