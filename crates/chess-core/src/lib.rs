//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and the
//! session layer:
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`] and [`MoveFlags`] for move representation
//! - [`CastlingRights`] for the per-side, per-rook castling flags
//! - [`FenRecord`] for FEN parsing and serialization

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{FenError, FenRecord};
pub use mov::{Move, MoveFlags};
pub use piece::{Piece, PieceKind};
pub use square::Square;
