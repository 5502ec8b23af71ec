//! A single game between participants.
//!
//! [`GameSession`] owns one [`Game`] plus the seat assignment and enforces
//! who may move. The board's side to move is the only record of whose turn
//! it is.

use crate::{SessionConfig, SessionError};
use chess_engine::{Board, Color, DrawReason, Game, GameStatus, Move};
use std::fmt;

/// How seats are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Two distinct participants, one per color.
    Standard,
    /// One participant holds both colors.
    SelfPlay,
}

/// Lifecycle of a session.
///
/// Every state after `InProgress` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    WaitingForOpponent,
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
    Abandoned,
}

impl SessionStatus {
    /// Returns true once no further joins or moves are accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            SessionStatus::WaitingForOpponent | SessionStatus::InProgress
        )
    }
}

impl From<GameStatus> for SessionStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::InProgress => SessionStatus::InProgress,
            GameStatus::Checkmate { winner } => SessionStatus::Checkmate { winner },
            GameStatus::Stalemate => SessionStatus::Stalemate,
            GameStatus::Draw(reason) => SessionStatus::Draw(reason),
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::WaitingForOpponent => write!(f, "waiting for an opponent"),
            SessionStatus::InProgress => write!(f, "in progress"),
            SessionStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            SessionStatus::Stalemate => write!(f, "stalemate"),
            SessionStatus::Draw(reason) => write!(f, "draw by {}", reason),
            SessionStatus::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Seat assignment. White is always taken; Black is empty until someone
/// joins, and equals White in self-play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    white: String,
    black: Option<String>,
}

impl Players {
    pub fn white(&self) -> &str {
        &self.white
    }

    pub fn black(&self) -> Option<&str> {
        self.black.as_deref()
    }

    /// The participant seated at `color`, if any.
    pub fn seat(&self, color: Color) -> Option<&str> {
        match color {
            Color::White => Some(self.white()),
            Color::Black => self.black(),
        }
    }

    /// Returns true if the participant holds at least one color.
    pub fn holds(&self, participant: &str) -> bool {
        self.white == participant || self.black() == Some(participant)
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub san: String,
    pub board: Board,
    pub status: SessionStatus,
}

/// Read-only copy of a session, safe to hand out after the lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: String,
    pub players: Players,
    pub mode: SessionMode,
    pub status: SessionStatus,
    pub board: Board,
    /// SAN of every move played, oldest first.
    pub moves: Vec<String>,
}

impl SessionSnapshot {
    /// The participant expected to move next, while the game is running.
    pub fn to_move(&self) -> Option<&str> {
        if self.status != SessionStatus::InProgress {
            return None;
        }
        self.players.seat(self.board.side_to_move())
    }
}

/// One game, its seats and its lifecycle state.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: String,
    game: Game,
    players: Players,
    mode: SessionMode,
    status: SessionStatus,
}

impl GameSession {
    /// Opens a session with `starter` as White, waiting for an opponent.
    pub fn new(id: &str, starter: &str) -> Self {
        GameSession {
            id: id.to_string(),
            game: Game::new(),
            players: Players {
                white: starter.to_string(),
                black: None,
            },
            mode: SessionMode::Standard,
            status: SessionStatus::WaitingForOpponent,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            players: self.players.clone(),
            mode: self.mode,
            status: self.status,
            board: self.game.board().clone(),
            moves: self.game.moves().iter().map(|m| m.san.clone()).collect(),
        }
    }

    fn start_self_play(&mut self) {
        self.players.black = Some(self.players.white.clone());
        self.mode = SessionMode::SelfPlay;
        self.status = SessionStatus::InProgress;
    }

    /// Seats `participant` as Black.
    ///
    /// White joining their own game switches to self-play when allowed.
    pub fn join(&mut self, participant: &str, config: &SessionConfig) -> Result<(), SessionError> {
        if self.status.is_terminal() {
            return Err(SessionError::GameFinished(self.id.clone()));
        }
        if self.players.black.is_some() {
            return Err(SessionError::GameFull(self.id.clone()));
        }
        if participant == self.players.white {
            if !config.allow_self_play {
                return Err(SessionError::SelfPlayDisabled);
            }
            self.start_self_play();
        } else {
            self.players.black = Some(participant.to_string());
            self.status = SessionStatus::InProgress;
        }
        Ok(())
    }

    /// Plays `text` (SAN) for `participant`.
    ///
    /// A move by the starter before anyone joined turns the session into
    /// self-play when allowed. Nothing changes unless the move is accepted.
    pub fn submit_move(
        &mut self,
        participant: &str,
        text: &str,
        config: &SessionConfig,
    ) -> Result<MoveOutcome, SessionError> {
        if !self.players.holds(participant) {
            return Err(SessionError::NotAParticipant(participant.to_string()));
        }
        if self.status.is_terminal() {
            return Err(SessionError::GameFinished(self.id.clone()));
        }

        let waiting = self.status == SessionStatus::WaitingForOpponent;
        if waiting && !config.allow_self_play {
            return Err(SessionError::WaitingForOpponent(self.id.clone()));
        }
        if !waiting && self.mode == SessionMode::Standard {
            let to_move = self.game.board().side_to_move();
            if self.players.seat(to_move) != Some(participant) {
                return Err(SessionError::NotYourTurn {
                    participant: participant.to_string(),
                    to_move,
                });
            }
        }

        let played = self.game.play_san(text)?;
        if waiting {
            self.start_self_play();
        }
        self.status = self.game.status().into();

        Ok(MoveOutcome {
            mv: played.mv,
            san: played.san,
            board: self.game.board().clone(),
            status: self.status,
        })
    }

    /// Ends the game at a participant's request.
    pub fn abandon(&mut self, participant: &str) -> Result<(), SessionError> {
        if !self.players.holds(participant) {
            return Err(SessionError::NotAParticipant(participant.to_string()));
        }
        if self.status.is_terminal() {
            return Err(SessionError::GameFinished(self.id.clone()));
        }
        self.status = SessionStatus::Abandoned;
        Ok(())
    }
}
