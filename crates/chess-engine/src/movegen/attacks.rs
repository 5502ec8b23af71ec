//! Attack detection for all piece kinds.
//!
//! The board is a mailbox, so attacks are found by stepping from the target
//! square outwards: a square is attacked by a piece if that piece sits where
//! one of its own moves, played in reverse, would land.

use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Knight jumps as (file delta, rank delta).
pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King steps as (file delta, rank delta).
pub const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Bishop ray directions.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Rook ray directions.
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Ray directions for a sliding piece kind; empty for the others.
pub fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    const QUEEN: [(i8, i8); 8] = [
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
    ];
    match kind {
        PieceKind::Bishop => &DIAGONALS,
        PieceKind::Rook => &ORTHOGONALS,
        PieceKind::Queen => &QUEEN,
        _ => &[],
    }
}

/// Returns the first occupied square along a ray, with its piece.
pub fn first_blocker(board: &Board, from: Square, (df, dr): (i8, i8)) -> Option<(Square, Piece)> {
    let mut sq = from.offset(df, dr)?;
    loop {
        if let Some(piece) = board.piece_at(sq) {
            return Some((sq, piece));
        }
        sq = sq.offset(df, dr)?;
    }
}

/// Returns true if the given square is attacked by the given color.
///
/// Occupancy of `sq` itself is irrelevant, which lets castling ask about
/// empty transit squares and check detection ask about the king's square.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    let is = |target: Option<Square>, kind: PieceKind| {
        target.and_then(|t| board.piece_at(t)) == Some(Piece::new(kind, by))
    };

    // A pawn of `by` attacks diagonally forward, so look one rank behind.
    if [-1, 1]
        .into_iter()
        .any(|df| is(sq.offset(df, -by.forward()), PieceKind::Pawn))
    {
        return true;
    }

    if KNIGHT_STEPS
        .iter()
        .any(|&(df, dr)| is(sq.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }

    if KING_STEPS
        .iter()
        .any(|&(df, dr)| is(sq.offset(df, dr), PieceKind::King))
    {
        return true;
    }

    let slider_hit = |dirs: &[(i8, i8)], kind: PieceKind| {
        dirs.iter().any(|&dir| {
            matches!(
                first_blocker(board, sq, dir),
                Some((_, p)) if p.color == by && (p.kind == kind || p.kind == PieceKind::Queen)
            )
        })
    };

    slider_hit(&DIAGONALS, PieceKind::Bishop) || slider_hit(&ORTHOGONALS, PieceKind::Rook)
}
