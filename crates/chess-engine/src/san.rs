//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"
//!
//! Parsing is lenient in the ways people type moves into a chat: `0-0`
//! castling, `=` before the promotion piece may be left out, annotations
//! (`+`, `#`, `!`, `?`) are ignored, and a fully specified source square
//! (`g1f3`, `e7e8q`) is accepted for any piece.

use crate::movegen::{legal_moves, make_move};
use crate::{Board, MoveError};
use chess_core::{Move, PieceKind, Square};

/// Converts a move to SAN notation given the board it is played from.
///
/// The move must be legal on `board`.
pub fn format_san(board: &Board, m: Move) -> String {
    let mut san = if m.is_castle_kingside() {
        "O-O".to_string()
    } else if m.is_castle_queenside() {
        "O-O-O".to_string()
    } else {
        format_piece_move(board, m)
    };

    let next = make_move(board, m);
    if next.is_check() {
        san.push(if legal_moves(&next).is_empty() { '#' } else { '+' });
    }
    san
}

fn format_piece_move(board: &Board, m: Move) -> String {
    let kind = board
        .piece_at(m.from)
        .map(|p| p.kind)
        .unwrap_or_else(|| panic!("no piece on {} for move {}", m.from, m));

    let mut san = String::with_capacity(8);
    if kind == PieceKind::Pawn {
        if m.is_capture() {
            san.push(m.from.file_char());
        }
    } else {
        san.push(kind.san_char());
        san.push_str(&disambiguation(board, m, kind));
    }
    if m.is_capture() {
        san.push('x');
    }
    san.push_str(&m.to.to_string());
    if let Some(promotion) = m.promotion {
        san.push('=');
        san.push(promotion.san_char());
    }
    san
}

/// File if that alone is unique, else rank, else both.
fn disambiguation(board: &Board, m: Move, kind: PieceKind) -> String {
    let rivals: Vec<Square> = legal_moves(board)
        .iter()
        .filter(|other| other.to == m.to && other.from != m.from)
        .filter(|other| board.piece_at(other.from).is_some_and(|p| p.kind == kind))
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != m.from.file()) {
        m.from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != m.from.rank()) {
        m.from.rank_char().to_string()
    } else {
        m.from.to_string()
    }
}

/// Parses SAN text and returns the matching legal move.
pub fn parse_san(board: &Board, text: &str) -> Result<Move, MoveError> {
    let trimmed = text.trim();
    let body = trimmed.trim_end_matches(['+', '#', '!', '?']);
    if body.is_empty() {
        return Err(MoveError::parse(text, "empty move"));
    }

    let candidates: Vec<Move> = match body {
        "O-O" | "0-0" => legal_moves(board)
            .iter()
            .copied()
            .filter(|m| m.is_castle_kingside())
            .collect(),
        "O-O-O" | "0-0-0" => legal_moves(board)
            .iter()
            .copied()
            .filter(|m| m.is_castle_queenside())
            .collect(),
        _ => {
            let parts = SanParts::parse(body).map_err(|reason| MoveError::parse(trimmed, reason))?;
            legal_moves(board)
                .iter()
                .copied()
                .filter(|m| parts.matches(board, m))
                .collect()
        }
    };

    match candidates.as_slice() {
        [] => Err(MoveError::Illegal(trimmed.to_string())),
        [m] => Ok(*m),
        _ => Err(MoveError::Ambiguous {
            text: trimmed.to_string(),
            candidates: candidates.iter().map(|m| format_san(board, *m)).collect(),
        }),
    }
}

/// The pieces of a non-castling SAN move.
#[derive(Debug, PartialEq, Eq)]
struct SanParts {
    piece: Option<PieceKind>,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<PieceKind>,
}

impl SanParts {
    /// Splits `[piece][file][rank][x|-]<square>[=][promotion]`.
    fn parse(body: &str) -> Result<Self, String> {
        if !body.is_ascii() {
            return Err("unexpected character".to_string());
        }
        let mut rest = body.as_bytes();

        let piece = match rest.first().copied().map(char::from) {
            Some(c) if c.is_ascii_uppercase() => {
                let kind = PieceKind::from_san_char(c)
                    .ok_or_else(|| format!("unknown piece '{}'", c))?;
                rest = &rest[1..];
                Some(kind)
            }
            _ => None,
        };

        let promotion = match rest.last().copied().map(char::from) {
            Some(c) if c.is_ascii_alphabetic() => {
                let kind = PieceKind::from_san_char(c.to_ascii_uppercase())
                    .ok_or_else(|| format!("unknown promotion piece '{}'", c))?;
                if !PieceKind::PROMOTIONS.contains(&kind) {
                    return Err(format!("cannot promote to {}", kind));
                }
                rest = &rest[..rest.len() - 1];
                if rest.last() == Some(&b'=') {
                    rest = &rest[..rest.len() - 1];
                }
                Some(kind)
            }
            _ => None,
        };

        let [prefix @ .., file, rank] = rest else {
            return Err("expected a destination square".to_string());
        };
        let to = Square::file_from_char(char::from(*file))
            .zip(Square::rank_from_char(char::from(*rank)))
            .and_then(|(f, r)| Square::new(f, r))
            .ok_or_else(|| "expected a destination square".to_string())?;

        let prefix = match prefix {
            [head @ .., b'x' | b'-'] => head,
            other => other,
        };
        let (from_file, from_rank) = match prefix {
            [] => (None, None),
            [c] => {
                let c = char::from(*c);
                match (Square::file_from_char(c), Square::rank_from_char(c)) {
                    (Some(f), _) => (Some(f), None),
                    (_, Some(r)) => (None, Some(r)),
                    _ => return Err(format!("unexpected '{}' before the destination", c)),
                }
            }
            [f, r] => {
                let file = Square::file_from_char(char::from(*f));
                let rank = Square::rank_from_char(char::from(*r));
                if file.is_none() || rank.is_none() {
                    return Err("invalid source square".to_string());
                }
                (file, rank)
            }
            _ => return Err("too many characters before the destination".to_string()),
        };

        Ok(SanParts {
            piece,
            from_file,
            from_rank,
            to,
            promotion,
        })
    }

    fn matches(&self, board: &Board, m: &Move) -> bool {
        if m.to != self.to || m.promotion != self.promotion {
            return false;
        }
        if self.from_file.is_some_and(|f| f != m.from.file())
            || self.from_rank.is_some_and(|r| r != m.from.rank())
        {
            return false;
        }
        let Some(moving) = board.piece_at(m.from).map(|p| p.kind) else {
            return false;
        };
        match self.piece {
            // Castling is only written O-O / O-O-O.
            Some(kind) => kind == moving && !m.is_castling(),
            // A bare source square names whatever stands there.
            None if self.from_file.is_some() && self.from_rank.is_some() => true,
            None => {
                moving == PieceKind::Pawn
                    && (self.from_file.is_some() || m.from.file() == m.to.file())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::MoveFlags;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn san_pawn_push() {
        let m = Move::new(sq("e2"), sq("e4"), MoveFlags::DOUBLE_PUSH);
        assert_eq!(format_san(&Board::new(), m), "e4");
    }

    #[test]
    fn san_knight_move() {
        assert_eq!(format_san(&Board::new(), Move::quiet(sq("g1"), sq("f3"))), "Nf3");
    }

    #[test]
    fn san_pawn_capture() {
        let b = board("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let m = Move::new(sq("e4"), sq("d5"), MoveFlags::CAPTURE);
        assert_eq!(format_san(&b, m), "exd5");
    }

    #[test]
    fn san_castling() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let short = Move::new(Square::E1, Square::G1, MoveFlags::CASTLE_KINGSIDE);
        let long = Move::new(Square::E1, Square::C1, MoveFlags::CASTLE_QUEENSIDE);
        assert_eq!(format_san(&b, short), "O-O");
        assert_eq!(format_san(&b, long), "O-O-O");
    }

    #[test]
    fn san_promotion() {
        let b = board("8/P7/8/8/8/8/8/4K1k1 w - - 0 1");
        let m = Move::promote(sq("a7"), sq("a8"), PieceKind::Queen, MoveFlags::NONE);
        assert_eq!(format_san(&b, m), "a8=Q");
    }

    #[test]
    fn san_disambiguation() {
        // Knights on b1 and f1 both reach d2.
        let b = board("8/8/8/8/8/8/8/1N1K1N1k w - - 0 1");
        assert_eq!(format_san(&b, Move::quiet(sq("b1"), sq("d2"))), "Nbd2");
        // Rooks on a1 and a5 share a file.
        let b = board("7k/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert_eq!(format_san(&b, Move::quiet(sq("a1"), sq("a3"))), "R1a3");
        // Queens on h4, e4 and h1 all reach e1.
        let b = board("8/k7/8/8/4Q2Q/8/8/1K5Q w - - 0 1");
        assert_eq!(format_san(&b, Move::quiet(sq("h4"), sq("e1"))), "Qh4e1");
        assert_eq!(parse_san(&b, "Qh4e1").unwrap(), Move::quiet(sq("h4"), sq("e1")));
    }

    #[test]
    fn san_check_and_mate() {
        let b = board("7k/8/8/8/8/8/8/4K1Q1 w - - 0 1");
        assert_eq!(format_san(&b, Move::quiet(sq("g1"), sq("h2"))), "Qh2+");
        let b = board("6k1/5ppp/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(format_san(&b, Move::quiet(sq("a1"), sq("a8"))), "Ra8#");
    }

    #[test]
    fn parse_simple_moves() {
        let start = Board::new();
        let m = parse_san(&start, "e4").unwrap();
        assert_eq!((m.from, m.to), (sq("e2"), sq("e4")));
        assert!(m.is_double_push());
        let m = parse_san(&start, "  Nf3 ").unwrap();
        assert_eq!((m.from, m.to), (sq("g1"), sq("f3")));
    }

    #[test]
    fn parse_castling_spellings() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert!(parse_san(&b, "O-O").unwrap().is_castle_kingside());
        assert!(parse_san(&b, "0-0").unwrap().is_castle_kingside());
        assert!(parse_san(&b, "O-O-O").unwrap().is_castle_queenside());
        assert!(parse_san(&b, "0-0-0+").unwrap().is_castle_queenside());
        // The king step itself is not castling notation.
        assert_eq!(
            parse_san(&b, "Kg1"),
            Err(MoveError::Illegal("Kg1".to_string()))
        );
        assert!(parse_san(&Board::new(), "O-O").is_err());
    }

    #[test]
    fn parse_ignores_annotations() {
        let b = board("7k/8/8/8/8/8/8/4K1Q1 w - - 0 1");
        for text in ["Qh2+", "Qh2#", "Qh2!?", "Qh2"] {
            assert_eq!(parse_san(&b, text).unwrap().to, sq("h2"), "{}", text);
        }
    }

    #[test]
    fn parse_promotion_forms() {
        let b = board("8/P7/8/8/8/8/8/4K1k1 w - - 0 1");
        for text in ["a8=Q", "a8Q", "a8=q", "a7a8q"] {
            let m = parse_san(&b, text).unwrap();
            assert_eq!(m.promotion, Some(PieceKind::Queen), "{}", text);
        }
        assert_eq!(parse_san(&b, "a8=N").unwrap().promotion, Some(PieceKind::Knight));
        assert_eq!(parse_san(&b, "a8"), Err(MoveError::Illegal("a8".to_string())));
        assert!(matches!(parse_san(&b, "a8=K"), Err(MoveError::Parse { .. })));
    }

    #[test]
    fn parse_pawn_without_file_only_pushes() {
        // exd5 is available, but "d5" names the d-pawn push.
        let b = board("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        assert_eq!(parse_san(&b, "d5"), Err(MoveError::Illegal("d5".to_string())));
        let m = parse_san(&b, "exd5").unwrap();
        assert_eq!(m.from, sq("e4"));
        assert!(m.is_capture());
    }

    #[test]
    fn parse_coordinate_text() {
        let start = Board::new();
        let m = parse_san(&start, "g1f3").unwrap();
        assert_eq!((m.from, m.to), (sq("g1"), sq("f3")));
        let m = parse_san(&start, "e2-e4").unwrap();
        assert!(m.is_double_push());
    }

    #[test]
    fn parse_reports_ambiguity() {
        let b = board("8/8/8/8/8/8/8/1N1K1N1k w - - 0 1");
        assert_eq!(
            parse_san(&b, "Nd2"),
            Err(MoveError::Ambiguous {
                text: "Nd2".to_string(),
                candidates: vec!["Nbd2".to_string(), "Nfd2".to_string()],
            })
        );
        assert_eq!(parse_san(&b, "Nfd2").unwrap().from, sq("f1"));
    }

    #[test]
    fn parse_errors() {
        let start = Board::new();
        assert!(matches!(parse_san(&start, ""), Err(MoveError::Parse { .. })));
        assert!(matches!(parse_san(&start, "+"), Err(MoveError::Parse { .. })));
        assert!(matches!(parse_san(&start, "xyz"), Err(MoveError::Parse { .. })));
        assert!(matches!(parse_san(&start, "Zf3"), Err(MoveError::Parse { .. })));
        assert!(matches!(parse_san(&start, "e9"), Err(MoveError::Parse { .. })));
        assert!(matches!(parse_san(&start, "Nabcf3"), Err(MoveError::Parse { .. })));
        assert!(matches!(parse_san(&start, "é4"), Err(MoveError::Parse { .. })));
        assert_eq!(parse_san(&start, "Ke4"), Err(MoveError::Illegal("Ke4".to_string())));
        assert_eq!(parse_san(&start, "e5"), Err(MoveError::Illegal("e5".to_string())));
    }

    #[test]
    fn san_roundtrip_startpos() {
        let start = Board::new();
        for m in &legal_moves(&start) {
            let san = format_san(&start, *m);
            assert_eq!(parse_san(&start, &san), Ok(*m), "roundtrip failed for {}", san);
        }
    }
}
