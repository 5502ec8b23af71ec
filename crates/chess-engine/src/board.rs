//! Board state: piece placement plus the side-to-move bookkeeping.

use crate::movegen::attacks::is_square_attacked;
use crate::BoardError;
use chess_core::{CastlingRights, Color, FenRecord, Piece, PieceKind, Square};

/// Complete chess position state.
///
/// Cells are indexed by [`Square::index`]. A board built through
/// [`Board::new`], [`Board::from_fen`] or move application always has exactly
/// one king per color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) cells: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// Creates the standard starting position.
    pub fn new() -> Self {
        let mut cells = [None; 64];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in Color::BOTH {
            for (file, kind) in back.into_iter().enumerate() {
                let file = file as u8;
                cells[usize::from(color.back_rank() * 8 + file)] = Some(Piece::new(kind, color));
                cells[usize::from(color.pawn_rank() * 8 + file)] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        Board {
            cells,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a board from a FEN string.
    ///
    /// Castling rights whose king or rook is not on its home square are
    /// dropped, and an en-passant square with no pawn to take is cleared, so
    /// the generator never has to second-guess the board.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let record = FenRecord::parse(fen)?;
        let mut board = Board {
            cells: record.placement,
            side_to_move: record.side_to_move,
            castling: record.castling,
            en_passant: record.en_passant,
            halfmove_clock: record.halfmove_clock,
            fullmove_number: record.fullmove_number,
        };

        for color in Color::BOTH {
            let count = board
                .pieces()
                .filter(|(_, p)| *p == Piece::new(PieceKind::King, color))
                .count();
            if count != 1 {
                return Err(BoardError::KingCount { color, count });
            }
        }
        if let Some((sq, _)) = board
            .pieces()
            .find(|(sq, p)| p.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7))
        {
            return Err(BoardError::PawnOnBackRank(sq.to_string()));
        }
        let them = board.side_to_move.opposite();
        if board.is_king_attacked(them) {
            return Err(BoardError::OpponentInCheck(them));
        }

        board.sanitize_castling();
        board.sanitize_en_passant();
        Ok(board)
    }

    fn sanitize_castling(&mut self) {
        for color in Color::BOTH {
            let back = color.back_rank();
            let home = |file: u8, kind: PieceKind| {
                Square::new(file, back)
                    .and_then(|sq| self.piece_at(sq))
                    .is_some_and(|p| p == Piece::new(kind, color))
            };
            let king_home = home(4, PieceKind::King);
            let kingside = king_home && home(7, PieceKind::Rook);
            let queenside = king_home && home(0, PieceKind::Rook);
            let (kingside_rook, queenside_rook) = match color {
                Color::White => (Square::H1, Square::A1),
                Color::Black => (Square::H8, Square::A8),
            };
            if !kingside {
                self.castling.remove_rook_square(kingside_rook);
            }
            if !queenside {
                self.castling.remove_rook_square(queenside_rook);
            }
        }
    }

    fn sanitize_en_passant(&mut self) {
        let Some(ep) = self.en_passant else {
            return;
        };
        let them = self.side_to_move.opposite();
        // The pawn that just double-pushed sits one rank past the target.
        let pushed = ep.offset(0, them.forward());
        let origin = ep.offset(0, -them.forward());
        let pawn_there = pushed
            .and_then(|sq| self.piece_at(sq))
            .is_some_and(|p| p == Piece::new(PieceKind::Pawn, them));
        let origin_empty = origin.is_some_and(|sq| self.piece_at(sq).is_none());
        if !pawn_there || !origin_empty || self.piece_at(ep).is_some() {
            self.en_passant = None;
        }
    }

    /// Converts the board to a FEN string.
    pub fn to_fen(&self) -> String {
        FenRecord {
            placement: self.cells,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Iterates over occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant, set only right after a
    /// two-square pawn advance.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half-moves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after Black's move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the square of the given color's king.
    ///
    /// # Panics
    ///
    /// Panics if the king is missing, which no public constructor allows.
    pub fn king_square(&self, color: Color) -> Square {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|(_, p)| *p == king)
            .map(|(sq, _)| sq)
            .unwrap_or_else(|| panic!("board invariant violated: no {} king", color))
    }

    /// Returns true if the king of the given color is attacked.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        is_square_attacked(self, self.king_square(color), color.opposite())
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.side_to_move)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
