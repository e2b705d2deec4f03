//! 781 deterministic Zobrist keys: 768 piece-square, 1 side-to-move, 4
//! castling-right, 8 en-passant-file. Keys are derived from a fixed seed so
//! hashes are comparable across runs and engine instances.

use crate::board::castle_bits::*;
use crate::board::{Board, Color, Piece};
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

pub struct ZobristKeys {
    /// `[color][piece][square]`, White = 0, Black = 1, Pawn..King = 0..5.
    pub piece: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// `[0]=WK, [1]=WQ, [2]=BK, [3]=BQ`.
    pub castling: [u64; 4],
    /// a..h => 0..7.
    pub ep_file: [u64; 8],
}

pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_keys(StdRng::seed_from_u64(ZOBRIST_SEED)))
}

fn generate_keys(mut rng: StdRng) -> ZobristKeys {
    fn non_zero(r: &mut StdRng) -> u64 {
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[[0u64; 64]; 6]; 2],
        side_to_move: 0,
        castling: [0u64; 4],
        ep_file: [0u64; 8],
    };

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                keys.piece[color][piece][sq] = non_zero(&mut rng);
            }
        }
    }
    for right in &mut keys.castling {
        *right = non_zero(&mut rng);
    }
    for file in &mut keys.ep_file {
        *file = non_zero(&mut rng);
    }
    keys.side_to_move = non_zero(&mut rng);
    keys
}

/// XORs in exactly the castling keys whose bit flipped between `old` and
/// `new_rights`.
pub fn xor_castling_rights_delta(hash: &mut u64, keys: &ZobristKeys, old: u8, new_rights: u8) {
    let changed = old ^ new_rights;
    if changed & CASTLE_WK != 0 {
        *hash ^= keys.castling[0];
    }
    if changed & CASTLE_WQ != 0 {
        *hash ^= keys.castling[1];
    }
    if changed & CASTLE_BK != 0 {
        *hash ^= keys.castling[2];
    }
    if changed & CASTLE_BQ != 0 {
        *hash ^= keys.castling[3];
    }
}

/// Toggles the en-passant file keys for a transition from `old` to `new`
/// target squares: unconditionally off the old file if a target existed,
/// unconditionally on the new file if one now exists. This is the intended
/// behavior behind a typo'd condition in the original source (a branch on
/// `originalEnPassant == 1` that should have read `== -1`) — both keys toggle
/// on target *existence*, not on whether the target is currently capturable.
pub fn xor_en_passant_delta(
    hash: &mut u64,
    keys: &ZobristKeys,
    old: Option<crate::square::Square>,
    new: Option<crate::square::Square>,
) {
    if let Some(sq) = old {
        *hash ^= keys.ep_file[sq.file() as usize];
    }
    if let Some(sq) = new {
        *hash ^= keys.ep_file[sq.file() as usize];
    }
}

/// Recomputes the hash from scratch; used to verify the incrementally
/// maintained hash and to initialize a freshly parsed board.
pub fn compute_full(board: &Board) -> u64 {
    let keys = zobrist_keys();
    let mut hash = 0u64;

    for &color in &[Color::White, Color::Black] {
        for &piece in &Piece::ALL {
            let mut bb = board.bb(color, piece);
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                hash ^= keys.piece[color as usize][piece as usize][sq];
                bb &= bb - 1;
            }
        }
    }

    if board.side_to_move == Color::Black {
        hash ^= keys.side_to_move;
    }

    if board.has_castling(CASTLE_WK) {
        hash ^= keys.castling[0];
    }
    if board.has_castling(CASTLE_WQ) {
        hash ^= keys.castling[1];
    }
    if board.has_castling(CASTLE_BK) {
        hash ^= keys.castling[2];
    }
    if board.has_castling(CASTLE_BQ) {
        hash ^= keys.castling[3];
    }

    if let Some(sq) = board.en_passant {
        hash ^= keys.ep_file[sq.file() as usize];
    }

    hash
}
