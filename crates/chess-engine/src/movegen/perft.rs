//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::{legal_moves, make_move};
use crate::Board;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&make_move(board, *m), depth - 1))
        .sum()
}

/// Perft with divide: the node count below each root move, sorted by
/// coordinate notation. Useful to find which move has a wrong count.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = legal_moves(board)
        .iter()
        .map(|m| {
            let nodes = perft(&make_move(board, *m), depth.saturating_sub(1));
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn perft_startpos_shallow() {
        let start = Board::new();
        assert_eq!(perft(&start, 0), 1);
        assert_eq!(perft(&start, 1), 20);
        assert_eq!(perft(&start, 2), 400);
        assert_eq!(perft(&start, 3), 8902);
    }

    // Slow in debug builds.
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Board::new(), 4), 197281);
    }

    // Castling, en passant and promotions all in one position.
    #[test]
    fn perft_kiwipete() {
        let position = board(KIWIPETE);
        assert_eq!(perft(&position, 1), 48);
        assert_eq!(perft(&position, 2), 2039);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&board(KIWIPETE), 3), 97862);
    }

    // Check evasion, en passant and discovered checks along the fifth rank.
    #[test]
    fn perft_position3() {
        let position = board(POSITION3);
        assert_eq!(perft(&position, 1), 14);
        assert_eq!(perft(&position, 2), 191);
        assert_eq!(perft(&position, 3), 2812);
    }

    #[test]
    fn perft_position4() {
        let position = board(POSITION4);
        assert_eq!(perft(&position, 1), 6);
        assert_eq!(perft(&position, 2), 264);
        assert_eq!(perft(&position, 3), 9467);
    }

    #[test]
    fn perft_position5() {
        let position = board(POSITION5);
        assert_eq!(perft(&position, 1), 44);
        assert_eq!(perft(&position, 2), 1486);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let results = perft_divide(&Board::new(), 2);
        assert_eq!(results.len(), 20);
        assert_eq!(results[0].0, "a2a3");
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
    }
}
