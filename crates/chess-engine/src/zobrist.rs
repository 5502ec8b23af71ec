//! Zobrist hashing for position identification.
//!
//! Zobrist hashing creates a near-unique hash for each chess position by
//! XORing random numbers associated with:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Side to move
//! - Castling rights (4 values)
//! - En passant file (8 values), only when a capture there is possible
//!
//! Two boards hash equal exactly when they are the same position for the
//! repetition rule; the clocks are not part of the hash.

use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Zobrist hash keys.
///
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Keys for pieces: [kind][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    /// Key for black to move (XOR when black to move).
    black_to_move: u64,
    /// Keys for castling rights, one per flag bit.
    castling: [u64; 4],
    /// Keys for en passant file.
    en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Initializes Zobrist keys using a simple PRNG.
    pub const fn new() -> Self {
        // xorshift64, usable in const context
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut kind = 0;
        while kind < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[kind][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            kind += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    /// Returns the key for a piece on a square.
    #[inline]
    pub const fn piece_key(&self, piece: Piece, square: Square) -> u64 {
        self.pieces[piece.kind.index()][piece.color.index()][square.index()]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Board {
    /// Hash identifying this position for repetition detection.
    pub fn zobrist_hash(&self) -> u64 {
        let mut hash = self
            .pieces()
            .fold(0u64, |h, (sq, piece)| h ^ ZOBRIST.piece_key(piece, sq));

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move;
        }

        let rights = self.castling.raw();
        for (bit, key) in ZOBRIST.castling.iter().enumerate() {
            if rights & (1 << bit) != 0 {
                hash ^= key;
            }
        }

        if let Some(ep) = self.en_passant.filter(|&ep| self.en_passant_capturable(ep)) {
            hash ^= ZOBRIST.en_passant[usize::from(ep.file())];
        }
        hash
    }

    /// True if a pawn of the side to move stands ready to take on `ep`.
    fn en_passant_capturable(&self, ep: Square) -> bool {
        let us = self.side_to_move;
        let pawn = Piece::new(PieceKind::Pawn, us);
        [-1, 1].into_iter().any(|df| {
            ep.offset(df, -us.forward())
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p == pawn)
        })
    }
}

/// Hashes of every position reached in a game, starting position included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionHistory {
    hashes: Vec<u64>,
}

impl PositionHistory {
    /// Creates a history whose first entry is `board`.
    pub fn new(board: &Board) -> Self {
        PositionHistory {
            hashes: vec![board.zobrist_hash()],
        }
    }

    /// Records a position reached after a move.
    pub fn push(&mut self, board: &Board) {
        self.hashes.push(board.zobrist_hash());
    }

    /// How many times `board` occurs in the history.
    pub fn count(&self, board: &Board) -> usize {
        let hash = board.zobrist_hash();
        self.hashes.iter().filter(|&&h| h == hash).count()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
