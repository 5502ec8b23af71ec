//! Game management with history tracking.
//!
//! A [`Game`] couples the current [`Board`] with the position history the
//! repetition rule needs and a SAN log of the moves played. It does not
//! refuse moves after the game has ended; callers that care check
//! [`Game::status`] first.

use crate::movegen::{find_legal, legal_moves, make_move};
use crate::rules::{game_status, GameStatus};
use crate::san::{format_san, parse_san};
use crate::{Board, BoardError, MoveError, MoveList, PositionHistory};
use chess_core::Move;

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    /// The move as generated, flags included.
    pub mv: Move,
    /// SAN notation for the move, from the board it was played on.
    pub san: String,
}

/// A chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: PositionHistory,
    moves: Vec<PlayedMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Creates a game from a custom starting position.
    pub fn from_board(board: Board) -> Self {
        Game {
            history: PositionHistory::new(&board),
            board,
            moves: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        Board::from_fen(fen).map(Self::from_board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Moves played so far, oldest first.
    pub fn moves(&self) -> &[PlayedMove] {
        &self.moves
    }

    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.board)
    }

    pub fn status(&self) -> GameStatus {
        game_status(&self.board, &self.history)
    }

    /// Plays a move given in SAN.
    pub fn play_san(&mut self, text: &str) -> Result<PlayedMove, MoveError> {
        let m = parse_san(&self.board, text)?;
        Ok(self.commit(m))
    }

    /// Plays a move given by squares and promotion; flags are taken from the
    /// matching legal move.
    pub fn play(&mut self, m: Move) -> Result<PlayedMove, MoveError> {
        let legal = find_legal(&self.board, m).ok_or_else(|| MoveError::Illegal(m.to_uci()))?;
        Ok(self.commit(legal))
    }

    fn commit(&mut self, m: Move) -> PlayedMove {
        let played = PlayedMove {
            mv: m,
            san: format_san(&self.board, m),
        };
        self.board = make_move(&self.board, m);
        self.history.push(&self.board);
        self.moves.push(played.clone());
        played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DrawReason;
    use chess_core::{Color, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert!(game.moves().is_empty());
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn play_records_san() {
        let mut game = Game::new();
        let played = game.play(Move::quiet(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(played.san, "e4");
        assert!(played.mv.is_double_push());
        game.play_san("e5").unwrap();
        game.play_san("Nf3").unwrap();

        let log: Vec<&str> = game.moves().iter().map(|m| m.san.as_str()).collect();
        assert_eq!(log, ["e4", "e5", "Nf3"]);
        assert_eq!(game.board().side_to_move(), Color::Black);
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn rejected_move_leaves_game_untouched() {
        let mut game = Game::new();
        game.play_san("e4").unwrap();
        let before = game.board().clone();

        assert_eq!(
            game.play(Move::quiet(sq("e7"), sq("e4"))),
            Err(MoveError::Illegal("e7e4".to_string()))
        );
        assert!(matches!(game.play_san("Qz9"), Err(MoveError::Parse { .. })));
        assert_eq!(game.board(), &before);
        assert_eq!(game.moves().len(), 1);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        for san in ["f3", "e5", "g4"] {
            game.play_san(san).unwrap();
        }
        let mate = game.play_san("Qh4").unwrap();
        assert_eq!(mate.san, "Qh4#");
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn threefold_repetition() {
        let mut game = Game::new();
        for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            game.play_san(san).unwrap();
        }
        assert_eq!(game.history().count(game.board()), 2);
        assert_eq!(game.status(), GameStatus::InProgress);

        for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            game.play_san(san).unwrap();
        }
        assert_eq!(game.history().count(game.board()), 3);
        assert_eq!(
            game.status(),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
    }

    #[test]
    fn fifty_move_rule() {
        let mut game = Game::from_fen("8/8/8/8/8/8/8/R3K2k w - - 99 80").unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        game.play_san("Ra2").unwrap();
        assert_eq!(game.board().halfmove_clock(), 100);
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn from_fen_rejects_bad_boards() {
        assert!(matches!(Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"), Err(BoardError::KingCount { .. })));
    }
}
