//! `make`/`unmake`: the only way a [`Board`] is ever mutated. Every touched
//! square goes through `put_piece`/`remove_piece`, so the Zobrist hash never
//! drifts from the mailbox/bitboard state.

use crate::board::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, Piece};
use crate::hash::zobrist::{xor_castling_rights_delta, xor_en_passant_delta, zobrist_keys};
use crate::moves::types::{Move, MoveDelta, MoveKind};
use crate::square::Square;

pub(crate) fn push_direction(color: Color) -> i32 {
    if color == Color::White { 8 } else { -8 }
}

fn rook_castle_squares(color: Color, kind: MoveKind) -> (Square, Square) {
    match (color, kind) {
        (Color::White, MoveKind::CastleKingside) => (Square::H1, Square::try_from_rank_file(0, 5).unwrap()),
        (Color::White, MoveKind::CastleQueenside) => (Square::A1, Square::try_from_rank_file(0, 3).unwrap()),
        (Color::Black, MoveKind::CastleKingside) => (Square::H8, Square::try_from_rank_file(7, 5).unwrap()),
        (Color::Black, MoveKind::CastleQueenside) => (Square::A8, Square::try_from_rank_file(7, 3).unwrap()),
        _ => unreachable!("rook_castle_squares called on a non-castling move"),
    }
}

fn rook_start_right(sq: Square) -> Option<u8> {
    match sq {
        Square::A1 => Some(CASTLE_WQ),
        Square::H1 => Some(CASTLE_WK),
        Square::A8 => Some(CASTLE_BQ),
        Square::H8 => Some(CASTLE_BK),
        _ => None,
    }
}

impl Board {
    /// Mutates the board in place and pushes the delta needed to reverse it.
    pub fn make(&mut self, mv: Move) -> MoveDelta {
        let color = self.side_to_move;
        let opp = color.opposite();
        let keys = zobrist_keys();

        let prev_castling_rights = self.castling_rights;
        let prev_en_passant = self.en_passant;
        let prev_halfmove_clock = self.halfmove_clock;
        let prev_hash = self.hash;

        // 2. Relocate the piece, recording any capture on the landing square.
        let mut captured = None;
        if let Some((cap_color, cap_piece)) = self.piece_at(mv.to) {
            self.remove_piece(mv.to, cap_color, cap_piece);
            captured = Some((cap_color, cap_piece, mv.to));
        }
        self.remove_piece(mv.from, color, mv.piece);
        self.put_piece(mv.to, color, mv.piece);

        // 3. En-passant capture removes a pawn one rank behind the landing square.
        if matches!(mv.kind, MoveKind::EnPassant) {
            let cap_sq = Square::from_index((mv.to.index() as i32 - push_direction(color)) as u8);
            self.remove_piece(cap_sq, opp, Piece::Pawn);
            captured = Some((opp, Piece::Pawn, cap_sq));
        }

        // 4. En-passant target: set only on a two-square pawn push, otherwise clear.
        let new_en_passant = if mv.is_double_pawn_push() {
            Some(Square::from_index(
                (mv.from.index() as i32 + push_direction(color)) as u8,
            ))
        } else {
            None
        };
        xor_en_passant_delta(&mut self.hash, keys, prev_en_passant, new_en_passant);
        self.en_passant = new_en_passant;

        // 5. Promotion replaces the piece on the landing square.
        if let Some(promo) = mv.promotion {
            self.remove_piece(mv.to, color, mv.piece);
            self.put_piece(mv.to, color, promo);
        }

        // 6. Castling rights: a king move clears both of its color's rights;
        // a rook move or capture from a starting square clears that one right.
        let mut new_rights = prev_castling_rights;
        if mv.piece == Piece::King {
            new_rights &= !match color {
                Color::White => CASTLE_WK | CASTLE_WQ,
                Color::Black => CASTLE_BK | CASTLE_BQ,
            };
        }
        if let Some(right) = rook_start_right(mv.from) {
            new_rights &= !right;
        }
        if let Some((_, _, cap_sq)) = captured {
            if let Some(right) = rook_start_right(cap_sq) {
                new_rights &= !right;
            }
        }
        xor_castling_rights_delta(&mut self.hash, keys, prev_castling_rights, new_rights);
        self.castling_rights = new_rights;

        // 7. Castling also relocates the rook.
        if mv.is_castle() {
            let (rook_from, rook_to) = rook_castle_squares(color, mv.kind);
            self.remove_piece(rook_from, color, Piece::Rook);
            self.put_piece(rook_to, color, Piece::Rook);
        }

        // 8. Flip side to move; update clocks.
        self.hash ^= keys.side_to_move;
        self.side_to_move = opp;
        self.halfmove_clock = if mv.is_capture() || mv.piece == Piece::Pawn {
            0
        } else {
            prev_halfmove_clock + 1
        };
        if self.side_to_move == Color::White {
            self.fullmove_number += 1;
        }

        let delta = MoveDelta {
            mv,
            captured,
            prev_castling_rights,
            prev_en_passant,
            prev_halfmove_clock,
            prev_hash,
        };
        self.history.push(delta);
        #[cfg(debug_assertions)]
        self.assert_hash_consistent();
        delta
    }

    /// Inverts the most recent `make`; restores mailbox, bitboards, turn,
    /// castling, en-passant, clocks and hash byte-for-byte.
    pub fn unmake(&mut self) {
        let delta = self
            .history
            .pop()
            .unwrap_or_else(|| panic!("unmake called with empty history\nFEN: {}", self.to_fen()));
        let mv = delta.mv;

        // The mover's color is the side to move *before* this unmake (the
        // side `make` flipped to); flip back first so every helper below
        // operates with `color` as the mover.
        self.side_to_move = self.side_to_move.opposite();
        let color = self.side_to_move;
        let opp = color.opposite();

        if mv.is_castle() {
            let (rook_from, rook_to) = rook_castle_squares(color, mv.kind);
            self.remove_piece(rook_to, color, Piece::Rook);
            self.put_piece(rook_from, color, Piece::Rook);
        }

        let landed_piece = mv.promotion.unwrap_or(mv.piece);
        self.remove_piece(mv.to, color, landed_piece);
        self.put_piece(mv.from, color, mv.piece);

        if matches!(mv.kind, MoveKind::EnPassant) {
            let cap_sq = Square::from_index((mv.to.index() as i32 - push_direction(color)) as u8);
            self.put_piece(cap_sq, opp, Piece::Pawn);
        } else if let Some((cap_color, cap_piece, cap_sq)) = delta.captured {
            self.put_piece(cap_sq, cap_color, cap_piece);
        }

        self.castling_rights = delta.prev_castling_rights;
        self.en_passant = delta.prev_en_passant;
        self.halfmove_clock = delta.prev_halfmove_clock;
        if color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.hash = delta.prev_hash;

        #[cfg(debug_assertions)]
        self.assert_hash_consistent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn quiet_move_roundtrips_through_make_unmake() {
        let mut b = Board::new();
        let before = b.clone();
        let e2 = Square::try_from_rank_file(1, 4).unwrap();
        let e4 = Square::try_from_rank_file(3, 4).unwrap();
        let mv = Move { from: e2, to: e4, piece: Piece::Pawn, promotion: None, kind: MoveKind::DoublePawnPush };
        b.make(mv);
        assert_ne!(b, before);
        b.unmake();
        assert_eq!(b, before);
    }

    #[test]
    fn capture_roundtrips_through_make_unmake() {
        let mut b = Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR w KQkq - 0 2").unwrap();
        let before = b.clone();
        let d4 = Square::try_from_rank_file(3, 3).unwrap();
        let e5 = Square::try_from_rank_file(4, 4).unwrap();
        let mv = Move { from: d4, to: e5, piece: Piece::Pawn, promotion: None, kind: MoveKind::Capture };
        b.make(mv);
        b.unmake();
        assert_eq!(b, before);
    }
}
