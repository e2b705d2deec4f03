//! The running Zobrist hash must never drift from a full recomputation,
//! across ordinary play and the special moves that are easiest to get wrong.

use talon::board::Board;
use talon::hash::zobrist::compute_full;
use talon::moves::movegen::generate_legal_moves;
use talon::moves::types::Move;

fn play_uci_line(board: &mut Board, moves: &[&str]) {
    for uci in moves {
        let legal = generate_legal_moves(board);
        let mv = Move::from_uci(uci, &legal).unwrap_or_else(|| panic!("{uci} is not legal"));
        board.make(mv);
    }
}

#[test]
fn hash_matches_full_recompute_after_a_short_opening() {
    let mut b = Board::new();
    play_uci_line(&mut b, &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);
    assert_eq!(b.hash, compute_full(&b));
}

#[test]
fn hash_survives_unmake_back_to_start() {
    let mut b = Board::new();
    let start_hash = b.hash;
    play_uci_line(&mut b, &["d2d4", "d7d5", "c2c4"]);
    b.unmake();
    b.unmake();
    b.unmake();
    assert_eq!(b.hash, start_hash);
}

#[test]
fn en_passant_capture_updates_hash_consistently() {
    let mut b = Board::new();
    play_uci_line(&mut b, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(b.en_passant.map(|s| s.to_string()), Some("d6".to_string()));
    play_uci_line(&mut b, &["e5d6"]);
    assert_eq!(b.hash, compute_full(&b));
}

#[test]
fn castling_updates_hash_consistently() {
    let mut b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play_uci_line(&mut b, &["e1g1"]);
    assert_eq!(b.hash, compute_full(&b));
}

#[test]
fn promotion_updates_hash_consistently() {
    let mut b = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    play_uci_line(&mut b, &["a7a8q"]);
    assert_eq!(b.hash, compute_full(&b));
}

#[test]
fn two_boards_reaching_the_same_position_by_different_move_orders_hash_equal() {
    let mut a = Board::new();
    play_uci_line(&mut a, &["e2e4", "e7e5", "g1f3", "b8c6"]);

    let mut b = Board::new();
    play_uci_line(&mut b, &["g1f3", "b8c6", "e2e4", "e7e5"]);

    assert_eq!(a.hash, b.hash);
}
