//! Leaf-counting move generator exerciser: `perft(depth)` counts leaf
//! positions reachable in exactly `depth` plies, `perft_divide` breaks that
//! count down by root move. Used to cross-check move generation against
//! known node counts rather than to play games.

use crate::board::Board;
use crate::moves::movegen::generate_legal_moves;
use crate::moves::types::Move;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3;

fn perft_recursive(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        board.make(mv);
        nodes += perft_recursive(board, depth - 1);
        board.unmake();
    }
    nodes
}

/// Total leaf count at `depth` plies from the current position.
#[instrument(skip(board), fields(depth))]
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    perft_recursive(board, depth)
}

/// Per-root-move leaf counts, the standard `go perft <depth> divide` output.
#[instrument(skip(board), fields(depth))]
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    let root_moves = generate_legal_moves(board);
    let mut out = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        board.make(mv);
        let count = if depth == 0 { 1 } else { perft_recursive(board, depth - 1) };
        board.unmake();

        if depth <= MAX_LOG_DEPTH {
            debug!(%mv, nodes = count, "divide: root move");
        }
        out.push((mv, count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_perft_one_matches_legal_move_count() {
        let mut b = Board::new();
        assert_eq!(perft(&mut b, 1), 20);
    }

    #[test]
    fn startpos_perft_two() {
        let mut b = Board::new();
        assert_eq!(perft(&mut b, 2), 400);
    }

    #[test]
    fn startpos_perft_three() {
        let mut b = Board::new();
        assert_eq!(perft(&mut b, 3), 8_902);
    }

    #[test]
    fn startpos_perft_four() {
        let mut b = Board::new();
        assert_eq!(perft(&mut b, 4), 197_281);
    }

    #[test]
    #[ignore = "slow: full depth-5 startpos perft, run explicitly"]
    fn startpos_perft_five() {
        let mut b = Board::new();
        assert_eq!(perft(&mut b, 5), 4_865_609);
    }

    #[test]
    fn kiwipete_perft_four() {
        let mut b = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(perft(&mut b, 4), 4_085_603);
    }

    #[test]
    fn divide_sums_to_total_perft() {
        let mut b = Board::new();
        let breakdown = perft_divide(&mut b, 3);
        let sum: u64 = breakdown.iter().map(|(_, n)| n).sum();
        assert_eq!(sum, perft(&mut Board::new(), 3));
        assert_eq!(breakdown.len(), 20);
    }
}
