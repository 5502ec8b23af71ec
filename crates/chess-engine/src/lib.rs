//! Self-contained chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - piece placement plus castling, en passant and clocks
//! - Legal move generation and application ([`legal_moves`], [`apply_move`])
//! - SAN parsing and generation ([`parse_san`], [`format_san`])
//! - Outcome detection ([`game_status`]) including the fifty-move and
//!   threefold repetition draws
//! - [`Game`] - a board with its position history and move log
//!
//! Every operation is pure: boards are values and applying a move returns
//! a new one.
//!
//! # Example
//!
//! ```
//! use chess_engine::{apply_move, legal_moves, parse_san, Board, Game, GameStatus};
//!
//! let board = Board::new();
//! assert_eq!(legal_moves(&board).len(), 20);
//!
//! let e4 = parse_san(&board, "e4").unwrap();
//! let after = apply_move(&board, e4).unwrap();
//! assert_eq!(
//!     after.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//!
//! let mut game = Game::new();
//! game.play_san("e4").unwrap();
//! game.play_san("e5").unwrap();
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```

mod board;
mod error;
mod game;
pub mod movegen;
pub mod rules;
pub mod san;
mod zobrist;

pub use board::Board;
pub use error::{BoardError, MoveError};
pub use game::{Game, PlayedMove};
pub use movegen::attacks::is_square_attacked;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{apply_move, find_legal, legal_moves, MoveList};
pub use rules::{game_status, DrawReason, GameStatus};
pub use san::{format_san, parse_san};
pub use zobrist::PositionHistory;

pub use chess_core::{Color, Move, MoveFlags, Piece, PieceKind, Square};
