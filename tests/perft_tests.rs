//! Cross-checks move generation against known node counts from the
//! starting position and the Kiwipete test position.

use talon::board::Board;
use talon::moves::perft::perft;

#[test]
fn startpos_perft_depths_one_through_four() {
    let mut b = Board::new();
    assert_eq!(perft(&mut b, 1), 20);
    assert_eq!(perft(&mut b, 2), 400);
    assert_eq!(perft(&mut b, 3), 8_902);
    assert_eq!(perft(&mut b, 4), 197_281);
}

#[test]
#[ignore = "slow: full depth-5 startpos perft, run explicitly"]
fn startpos_perft_depth_five() {
    let mut b = Board::new();
    assert_eq!(perft(&mut b, 5), 4_865_609);
}

#[test]
fn kiwipete_perft_depths_one_through_three() {
    let mut b = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(perft(&mut b, 1), 48);
    assert_eq!(perft(&mut b, 2), 2_039);
    assert_eq!(perft(&mut b, 3), 97_862);
}

#[test]
fn kiwipete_perft_depth_four() {
    let mut b = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(perft(&mut b, 4), 4_085_603);
}

#[test]
fn position_unchanged_after_perft() {
    let mut b = Board::new();
    let before = b.clone();
    perft(&mut b, 3);
    assert_eq!(b, before);
}
