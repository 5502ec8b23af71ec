//! Move generation and application.
//!
//! Generation is two-phase: pseudo-legal moves per piece, then a filter that
//! plays each candidate on a scratch copy and drops those leaving the mover's
//! king attacked. The caller's board is never touched.

pub mod attacks;
pub mod perft;

use crate::{Board, MoveError};
use attacks::{first_blocker, is_square_attacked, slider_directions, KING_STEPS, KNIGHT_STEPS};
use chess_core::{Color, Move, MoveFlags, Piece, PieceKind, Square};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    const FILLER: Move = Move::quiet(Square::A1, Square::A1);

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Self::FILLER; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = pseudo_legal_moves(board);
    let us = board.side_to_move;
    moves.retain(|m| !make_move(board, *m).is_king_attacked(us));
    moves
}

/// Applies a legal move, returning the resulting board.
///
/// The move is matched against [`legal_moves`] by source, destination and
/// promotion, and the generated move (with its flags) is the one played, so
/// callers may pass a bare `Move::quiet(e2, e4)`.
pub fn apply_move(board: &Board, m: Move) -> Result<Board, MoveError> {
    let played = find_legal(board, m).ok_or_else(|| MoveError::Illegal(m.to_uci()))?;
    Ok(make_move(board, played))
}

/// Looks up the legal move with the same squares and promotion as `m`.
pub fn find_legal(board: &Board, m: Move) -> Option<Move> {
    legal_moves(board)
        .iter()
        .copied()
        .find(|lm| lm.from == m.from && lm.to == m.to && lm.promotion == m.promotion)
}

fn pseudo_legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    let us = board.side_to_move;

    for (from, piece) in board.pieces().filter(|(_, p)| p.color == us) {
        match piece.kind {
            PieceKind::Pawn => pawn_moves(board, from, us, &mut moves),
            PieceKind::Knight => step_moves(board, from, us, &KNIGHT_STEPS, &mut moves),
            PieceKind::King => step_moves(board, from, us, &KING_STEPS, &mut moves),
            kind => slider_moves(board, from, us, slider_directions(kind), &mut moves),
        }
    }
    castling_moves(board, us, &mut moves);
    moves
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, us: Color, flags: MoveFlags) {
    if to.rank() == us.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promote(from, to, kind, flags));
        }
    } else {
        moves.push(Move::new(from, to, flags));
    }
}

fn pawn_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    let fwd = us.forward();

    if let Some(one) = from.offset(0, fwd).filter(|&sq| board.piece_at(sq).is_none()) {
        push_pawn_move(moves, from, one, us, MoveFlags::NONE);
        if from.rank() == us.pawn_rank() {
            if let Some(two) = one.offset(0, fwd).filter(|&sq| board.piece_at(sq).is_none()) {
                moves.push(Move::new(from, two, MoveFlags::DOUBLE_PUSH));
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, fwd) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != us => {
                push_pawn_move(moves, from, to, us, MoveFlags::CAPTURE);
            }
            None if board.en_passant == Some(to) => {
                // The double-pushed pawn stands beside us, on the target's file.
                let victim = to.offset(0, -fwd);
                let victim_is_pawn = victim
                    .and_then(|sq| board.piece_at(sq))
                    .is_some_and(|p| p == Piece::new(PieceKind::Pawn, us.opposite()));
                if victim_is_pawn {
                    moves.push(Move::new(
                        from,
                        to,
                        MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
                    ));
                }
            }
            _ => {}
        }
    }
}

fn step_moves(board: &Board, from: Square, us: Color, steps: &[(i8, i8)], moves: &mut MoveList) {
    for &(df, dr) in steps {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match board.piece_at(to) {
            None => moves.push(Move::quiet(from, to)),
            Some(target) if target.color != us => {
                moves.push(Move::new(from, to, MoveFlags::CAPTURE));
            }
            Some(_) => {}
        }
    }
}

fn slider_moves(board: &Board, from: Square, us: Color, dirs: &[(i8, i8)], moves: &mut MoveList) {
    for &(df, dr) in dirs {
        let mut next = from.offset(df, dr);
        while let Some(to) = next {
            match board.piece_at(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(target) => {
                    if target.color != us {
                        moves.push(Move::new(from, to, MoveFlags::CAPTURE));
                    }
                    break;
                }
            }
            next = to.offset(df, dr);
        }
    }
}

/// Squares the king starts on, passes and lands on, and the rook's move.
struct CastlePath {
    king_from: Square,
    king_to: Square,
    transit: Square,
    rook_from: Square,
    rook_to: Square,
    flag: MoveFlags,
}

fn castle_path(us: Color, kingside: bool) -> CastlePath {
    match (us, kingside) {
        (Color::White, true) => CastlePath {
            king_from: Square::E1,
            king_to: Square::G1,
            transit: Square::F1,
            rook_from: Square::H1,
            rook_to: Square::F1,
            flag: MoveFlags::CASTLE_KINGSIDE,
        },
        (Color::White, false) => CastlePath {
            king_from: Square::E1,
            king_to: Square::C1,
            transit: Square::D1,
            rook_from: Square::A1,
            rook_to: Square::D1,
            flag: MoveFlags::CASTLE_QUEENSIDE,
        },
        (Color::Black, true) => CastlePath {
            king_from: Square::E8,
            king_to: Square::G8,
            transit: Square::F8,
            rook_from: Square::H8,
            rook_to: Square::F8,
            flag: MoveFlags::CASTLE_KINGSIDE,
        },
        (Color::Black, false) => CastlePath {
            king_from: Square::E8,
            king_to: Square::C8,
            transit: Square::D8,
            rook_from: Square::A8,
            rook_to: Square::D8,
            flag: MoveFlags::CASTLE_QUEENSIDE,
        },
    }
}

/// Generates castling moves whose rights are intact, whose path between
/// king and rook is empty, and whose king neither starts in nor crosses
/// check. Landing in check is left to the legality filter.
fn castling_moves(board: &Board, us: Color, moves: &mut MoveList) {
    let rights = board.castling;
    let wanted = [(true, rights.kingside(us)), (false, rights.queenside(us))];
    if !wanted.iter().any(|&(_, allowed)| allowed) {
        return;
    }
    let them = us.opposite();
    if board.is_king_attacked(us) {
        return;
    }

    for (kingside, allowed) in wanted {
        if !allowed {
            continue;
        }
        let path = castle_path(us, kingside);
        let dir = if kingside { 1 } else { -1 };
        // Every square strictly between king and rook must be empty.
        let path_clear = matches!(
            first_blocker(board, path.king_from, (dir, 0)),
            Some((sq, _)) if sq == path.rook_from
        );
        if path_clear && !is_square_attacked(board, path.transit, them) {
            moves.push(Move::new(path.king_from, path.king_to, path.flag));
        }
    }
}

/// Plays a move without checking legality.
///
/// # Panics
///
/// Panics if the source square is empty, which only happens if a move from
/// another position is replayed here.
pub(crate) fn make_move(board: &Board, m: Move) -> Board {
    let mut next = board.clone();
    let us = board.side_to_move;

    let piece = next.cells[m.from.index()]
        .take()
        .unwrap_or_else(|| panic!("no piece on {} for move {}", m.from, m));

    let mut captured = next.cells[m.to.index()].is_some();
    if m.is_en_passant() {
        if let Some(victim) = m.to.offset(0, -us.forward()) {
            captured |= next.cells[victim.index()].take().is_some();
        }
    }

    let placed = Piece::new(m.promotion.unwrap_or(piece.kind), us);
    next.cells[m.to.index()] = Some(placed);

    if m.is_castling() {
        let path = castle_path(us, m.is_castle_kingside());
        let rook = next.cells[path.rook_from.index()].take();
        debug_assert_eq!(rook, Some(Piece::new(PieceKind::Rook, us)));
        next.cells[path.rook_to.index()] = rook;
    }

    if piece.kind == PieceKind::King {
        next.castling.remove_color(us);
    }
    next.castling.remove_rook_square(m.from);
    next.castling.remove_rook_square(m.to);

    next.en_passant = if m.is_double_push() {
        m.from.offset(0, us.forward())
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || captured {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if us == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = us.opposite();
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn move_counters_saturate() {
        let b = board("4k3/8/8/8/8/8/8/R3K3 b - - 4294967295 4294967295");
        let next = apply_move(&b, Move::quiet(sq("e8"), sq("d8"))).unwrap();
        assert_eq!(next.halfmove_clock(), u32::MAX);
        assert_eq!(next.fullmove_number(), u32::MAX);
    }

    fn has(moves: &MoveList, from: &str, to: &str) -> bool {
        moves.iter().any(|m| m.from == sq(from) && m.to == sq(to))
    }

    #[test]
    fn movelist_retain_and_index() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::quiet(sq("e2"), sq("e3")));
        list.push(Move::new(sq("e2"), sq("e4"), MoveFlags::DOUBLE_PUSH));
        list.push(Move::quiet(sq("d2"), sq("d3")));
        list.retain(|m| m.from == sq("e2"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].to, sq("e4"));
        assert!(list.contains(&Move::quiet(sq("e2"), sq("e3"))));
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let moves = legal_moves(&Board::new());
        assert_eq!(moves.len(), 20);
        assert_eq!(moves.iter().filter(|m| m.is_double_push()).count(), 8);
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let next = apply_move(&Board::new(), Move::quiet(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.en_passant(), Some(sq("e3")));
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.fullmove_number(), 1);

        let after = apply_move(&next, Move::quiet(sq("g8"), sq("f6"))).unwrap();
        assert_eq!(after.en_passant(), None);
        assert_eq!(after.halfmove_clock(), 1);
        assert_eq!(after.fullmove_number(), 2);
    }

    #[test]
    fn apply_rejects_illegal_and_keeps_input() {
        let start = Board::new();
        let err = apply_move(&start, Move::quiet(sq("e2"), sq("e5"))).unwrap_err();
        assert_eq!(err, MoveError::Illegal("e2e5".to_string()));
        assert_eq!(start, Board::new());
    }

    #[test]
    fn en_passant_capture_removes_pawn() {
        let b = board("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let moves = legal_moves(&b);
        let ep: Vec<_> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, sq("f6"));

        let next = apply_move(&b, *ep[0]).unwrap();
        assert_eq!(next.piece_at(sq("f5")), None);
        assert_eq!(
            next.piece_at(sq("f6")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        // d5 was pushed two moves ago, so only f6 may be taken en passant.
        assert!(!has(&moves, "e5", "d6"));
    }

    #[test]
    fn en_passant_exposing_king_is_illegal() {
        // Taking on d6 would clear the fifth rank between the rook and king.
        let b = board("8/8/8/K2pP2r/8/8/8/7k w - d6 0 2");
        assert!(!legal_moves(&b).iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn promotions_generate_four_choices() {
        let b = board("3r3k/2P5/8/8/8/8/8/4K3 w - - 0 1");
        let moves = legal_moves(&b);
        let pushes: Vec<_> = moves.iter().filter(|m| m.to == sq("c8")).collect();
        let captures: Vec<_> = moves.iter().filter(|m| m.to == sq("d8")).collect();
        assert_eq!(pushes.len(), 4);
        assert_eq!(captures.len(), 4);
        assert!(captures.iter().all(|m| m.is_capture()));

        let queen = apply_move(
            &b,
            Move::promote(sq("c7"), sq("d8"), PieceKind::Queen, MoveFlags::NONE),
        )
        .unwrap();
        assert_eq!(
            queen.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(queen.piece_at(sq("c7")), None);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let moves = legal_moves(&b);
        assert!(moves.iter().any(|m| m.is_castle_kingside()));
        assert!(moves.iter().any(|m| m.is_castle_queenside()));

        let next = apply_move(&b, Move::quiet(Square::E1, Square::C1)).unwrap();
        assert_eq!(
            next.piece_at(Square::D1),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(next.piece_at(Square::A1), None);
        assert!(!next.castling().kingside(Color::White));
        assert!(!next.castling().queenside(Color::White));
        assert!(next.castling().kingside(Color::Black));
    }

    #[test]
    fn no_castling_out_of_or_through_check() {
        // Rook on e5 gives check.
        let b = board("r3k2r/pppp1ppp/8/4r3/8/8/PPPP1PPP/R3K2R w KQkq - 0 1");
        assert!(!legal_moves(&b).iter().any(|m| m.is_castling()));
        // Bishop on c4 covers f1 but not d1.
        let b = board("r3k2r/pppppppp/8/8/2b5/8/PPP3PP/R3K2R w KQkq - 0 1");
        let moves = legal_moves(&b);
        assert!(!moves.iter().any(|m| m.is_castle_kingside()));
        assert!(moves.iter().any(|m| m.is_castle_queenside()));
    }

    #[test]
    fn queenside_needs_b_file_empty() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/RN2K2R w KQkq - 0 1");
        let moves = legal_moves(&b);
        assert!(!moves.iter().any(|m| m.is_castle_queenside()));
        assert!(moves.iter().any(|m| m.is_castle_kingside()));
    }

    #[test]
    fn capturing_a_corner_rook_drops_its_right() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = apply_move(&b, Move::quiet(Square::A1, Square::A8)).unwrap();
        assert!(!next.castling().queenside(Color::Black));
        assert!(!next.castling().queenside(Color::White));
        assert!(next.castling().kingside(Color::Black));
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let b = board("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
        // King in check from e2; every legal move must resolve it.
        for m in &legal_moves(&b) {
            assert!(!make_move(&b, *m).is_king_attacked(Color::White));
        }
        let b = board("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = legal_moves(&b);
        assert!(!moves.iter().any(|m| m.from == sq("e2")));
    }
}
