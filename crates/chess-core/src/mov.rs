//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// Flags describing what a move does besides relocating a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    /// A piece is taken (including en passant).
    pub const CAPTURE: MoveFlags = MoveFlags(0b0_0001);
    /// A pawn takes en passant.
    pub const EN_PASSANT: MoveFlags = MoveFlags(0b0_0010);
    /// King-side castling (O-O).
    pub const CASTLE_KINGSIDE: MoveFlags = MoveFlags(0b0_0100);
    /// Queen-side castling (O-O-O).
    pub const CASTLE_QUEENSIDE: MoveFlags = MoveFlags(0b0_1000);
    /// A pawn advances two squares from its starting rank.
    pub const DOUBLE_PUSH: MoveFlags = MoveFlags(0b1_0000);

    /// Returns true if every flag in `other` is set.
    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both flag sets.
    #[inline]
    pub const fn with(self, other: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | other.0)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for MoveFlags {
    type Output = MoveFlags;

    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        self.with(rhs)
    }
}

/// A chess move.
///
/// Moves come out of move generation or SAN parsing fully described: the
/// flags are part of a move's identity, so a hand-built move only equals a
/// generated one when its flags match.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl Move {
    /// Creates a move with explicit flags and no promotion.
    #[inline]
    pub const fn new(from: Square, to: Square, flags: MoveFlags) -> Self {
        Move {
            from,
            to,
            promotion: None,
            flags,
        }
    }

    /// Creates a quiet move.
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlags::NONE)
    }

    /// Creates a promotion move.
    #[inline]
    pub const fn promote(from: Square, to: Square, kind: PieceKind, flags: MoveFlags) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
            flags,
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn is_castle_kingside(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE_KINGSIDE)
    }

    #[inline]
    pub const fn is_castle_queenside(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE_QUEENSIDE)
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        self.is_castle_kingside() || self.is_castle_queenside()
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PUSH)
    }

    /// Coordinate notation (e.g., "e2e4", "e7e8q"), used for logs.
    pub fn to_uci(self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            s.push(kind.san_char().to_ascii_lowercase());
        }
        s
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.to_uci())?;
        if self.flags != MoveFlags::NONE {
            write!(f, ", flags={:#07b}", self.flags.raw())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}
