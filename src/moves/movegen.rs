//! Legal move generation: pin/check line computation, per-piece-type
//! pseudo-legal dispatch, and the pin/check predicate that filters
//! pseudo-legal candidates down to legal ones.

use crate::bitboard::BitboardExt;
use crate::board::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, Piece};
use crate::moves::square_control::{self, is_check, is_square_attacked};
use crate::moves::types::{Move, MoveKind, MoveLine, MoveList, PieceMoveList};
use crate::square::{self, Square};
use arrayvec::ArrayVec;

/// Up to one check line per attacker; two or more means double check.
type CheckLines = ArrayVec<MoveLine, 2>;
/// Pinned square paired with the line it's pinned along.
type Pins = ArrayVec<(Square, MoveLine), 8>;

fn compute_pins_and_checks(board: &Board, side: Color) -> (CheckLines, Pins) {
    let king_sq = board.king_square(side);
    let opp = side.opposite();
    let mut checks = CheckLines::new();
    let mut pins = Pins::new();

    for dir in 0..8 {
        let is_rook_dir = square::ROOK_DIRS.contains(&dir);
        let max = square::max_sliding_distance(king_sq, dir);
        let delta = square::DIRECTIONS[dir] as i32;
        let mut cur = king_sq.index() as i32;
        let mut blocker: Option<Square> = None;

        for _ in 0..max {
            cur += delta;
            let sq = Square::from_index(cur as u8);
            match board.piece_at(sq) {
                None => continue,
                Some((color, _)) if color == side => {
                    if blocker.is_some() {
                        blocker = None;
                        break;
                    }
                    blocker = Some(sq);
                }
                Some((_, piece)) => {
                    let matches_dir = match piece {
                        Piece::Queen => true,
                        Piece::Rook => is_rook_dir,
                        Piece::Bishop => !is_rook_dir,
                        _ => false,
                    };
                    if matches_dir {
                        match blocker {
                            None => checks.push(MoveLine::new(king_sq, sq)),
                            Some(pinned) => pins.push((pinned, MoveLine::new(king_sq, sq))),
                        }
                    }
                    break;
                }
            }
        }
    }

    let pawn_checkers = square_control::pawn_attacks(king_sq, side) & board.pieces(Piece::Pawn, opp);
    for sq in pawn_checkers.squares() {
        checks.push(MoveLine::new(sq, sq));
    }
    let knight_checkers = square_control::knight_attacks(king_sq) & board.pieces(Piece::Knight, opp);
    for sq in knight_checkers.squares() {
        checks.push(MoveLine::new(sq, sq));
    }

    (checks, pins)
}

fn emit_pawn_move(from: Square, to: Square, kind: MoveKind, promo_rank: i32, out: &mut PieceMoveList) {
    if to.rank() as i32 == promo_rank {
        for promo in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
            out.push(Move { from, to, piece: Piece::Pawn, promotion: Some(promo), kind });
        }
    } else {
        out.push(Move { from, to, piece: Piece::Pawn, promotion: None, kind });
    }
}

fn generate_pawn_pseudo(board: &Board, side: Color, from: Square, out: &mut PieceMoveList) {
    let opp = side.opposite();
    let rank_dir: i32 = if side == Color::White { 1 } else { -1 };
    let start_rank: i32 = if side == Color::White { 1 } else { 6 };
    let promo_rank: i32 = if side == Color::White { 7 } else { 0 };
    let rank = from.rank() as i32;
    let file = from.file() as i32;

    if let Some(one) = Square::try_from_rank_file(rank + rank_dir, file) {
        if board.piece_at(one).is_none() {
            emit_pawn_move(from, one, MoveKind::Quiet, promo_rank, out);
            if rank == start_rank {
                let two = Square::try_from_rank_file(rank + 2 * rank_dir, file).unwrap();
                if board.piece_at(two).is_none() {
                    out.push(Move {
                        from,
                        to: two,
                        piece: Piece::Pawn,
                        promotion: None,
                        kind: MoveKind::DoublePawnPush,
                    });
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(dst) = Square::try_from_rank_file(rank + rank_dir, file + df) {
            match board.piece_at(dst) {
                Some((color, _)) if color == opp => emit_pawn_move(from, dst, MoveKind::Capture, promo_rank, out),
                None if Some(dst) == board.en_passant => out.push(Move {
                    from,
                    to: dst,
                    piece: Piece::Pawn,
                    promotion: None,
                    kind: MoveKind::EnPassant,
                }),
                _ => {}
            }
        }
    }
}

fn generate_knight_pseudo(board: &Board, side: Color, from: Square, out: &mut PieceMoveList) {
    let targets = square_control::knight_attacks(from) & !board.occupancy(side);
    for to in targets.squares() {
        let kind = if board.piece_at(to).is_some() { MoveKind::Capture } else { MoveKind::Quiet };
        out.push(Move { from, to, piece: Piece::Knight, promotion: None, kind });
    }
}

fn generate_slider_pseudo(
    board: &Board,
    side: Color,
    from: Square,
    piece: Piece,
    dirs: std::ops::Range<usize>,
    out: &mut PieceMoveList,
) {
    for dir in dirs {
        let max = square::max_sliding_distance(from, dir);
        let delta = square::DIRECTIONS[dir] as i32;
        let mut cur = from.index() as i32;
        for _ in 0..max {
            cur += delta;
            let to = Square::from_index(cur as u8);
            match board.piece_at(to) {
                None => out.push(Move::quiet(from, to, piece)),
                Some((color, _)) => {
                    if color != side {
                        out.push(Move { from, to, piece, promotion: None, kind: MoveKind::Capture });
                    }
                    break;
                }
            }
        }
    }
}

fn generate_king_pseudo(board: &Board, side: Color, king_sq: Square, out: &mut PieceMoveList) {
    let targets = square_control::king_attacks(king_sq) & !board.occupancy(side);
    for to in targets.squares() {
        let kind = if board.piece_at(to).is_some() { MoveKind::Capture } else { MoveKind::Quiet };
        out.push(Move { from: king_sq, to, piece: Piece::King, promotion: None, kind });
    }
}

/// Makes `mv`, tests whether `mover` is left in check, then unmakes. Used
/// for king moves, castling (walking into/through check), and en-passant,
/// which can expose the king along a rank in a way the pin/check lines
/// above don't model.
fn leaves_mover_safe(board: &mut Board, mv: Move, mover: Color) -> bool {
    board.make(mv);
    let safe = !is_check(board, mover);
    board.unmake();
    safe
}

fn generate_castling(board: &mut Board, side: Color, already_in_check: bool, out: &mut MoveList) {
    if already_in_check {
        return;
    }
    let opp = side.opposite();
    let king_sq = board.king_square(side);
    let rank = king_sq.rank() as i32;
    let (kingside_right, queenside_right) = match side {
        Color::White => (CASTLE_WK, CASTLE_WQ),
        Color::Black => (CASTLE_BK, CASTLE_BQ),
    };

    if board.has_castling(kingside_right) {
        let f = Square::try_from_rank_file(rank, 5).unwrap();
        let g = Square::try_from_rank_file(rank, 6).unwrap();
        if board.piece_at(f).is_none()
            && board.piece_at(g).is_none()
            && !is_square_attacked(board, f, opp)
            && !is_square_attacked(board, g, opp)
        {
            let mv = Move { from: king_sq, to: g, piece: Piece::King, promotion: None, kind: MoveKind::CastleKingside };
            if leaves_mover_safe(board, mv, side) {
                out.push(mv);
            }
        }
    }

    if board.has_castling(queenside_right) {
        let d = Square::try_from_rank_file(rank, 3).unwrap();
        let c = Square::try_from_rank_file(rank, 2).unwrap();
        let b = Square::try_from_rank_file(rank, 1).unwrap();
        if board.piece_at(d).is_none()
            && board.piece_at(c).is_none()
            && board.piece_at(b).is_none()
            && !is_square_attacked(board, d, opp)
            && !is_square_attacked(board, c, opp)
        {
            let mv = Move { from: king_sq, to: c, piece: Piece::King, promotion: None, kind: MoveKind::CastleQueenside };
            if leaves_mover_safe(board, mv, side) {
                out.push(mv);
            }
        }
    }
}

/// The complete legal move list for the side to move.
pub fn generate_legal_moves(board: &mut Board) -> MoveList {
    let side = board.side_to_move;
    let king_sq = board.king_square(side);
    let (checks, pins) = compute_pins_and_checks(board, side);
    let mut moves = MoveList::new();

    if checks.len() < 2 {
        let own_pieces = board.occupancy(side) & !board.pieces(Piece::King, side);
        for sq in own_pieces.squares() {
            let piece = board.piece_type_at(sq).expect("occupied square has no piece");
            let mut candidates = PieceMoveList::new();
            match piece {
                Piece::Pawn => generate_pawn_pseudo(board, side, sq, &mut candidates),
                Piece::Knight => generate_knight_pseudo(board, side, sq, &mut candidates),
                Piece::Bishop => generate_slider_pseudo(board, side, sq, Piece::Bishop, square::BISHOP_DIRS, &mut candidates),
                Piece::Rook => generate_slider_pseudo(board, side, sq, Piece::Rook, square::ROOK_DIRS, &mut candidates),
                Piece::Queen => generate_slider_pseudo(board, side, sq, Piece::Queen, square::QUEEN_DIRS, &mut candidates),
                Piece::King => unreachable!("king excluded from own_pieces above"),
            }

            let pin_line = pins.iter().find(|(psq, _)| *psq == sq).map(|(_, line)| *line);

            for mv in candidates {
                if mv.is_en_passant() {
                    if leaves_mover_safe(board, mv, side) {
                        moves.push(mv);
                    }
                    continue;
                }
                let legal = match (checks.first(), pin_line) {
                    (None, None) => true,
                    (None, Some(line)) => line.in_line(mv.to),
                    (Some(check), None) => check.in_line(mv.to),
                    (Some(check), Some(line)) => check.in_line(mv.to) && line.in_line(mv.to),
                };
                if legal {
                    moves.push(mv);
                }
            }
        }
    }

    let mut king_candidates = PieceMoveList::new();
    generate_king_pseudo(board, side, king_sq, &mut king_candidates);
    for mv in king_candidates {
        if leaves_mover_safe(board, mv, side) {
            moves.push(mv);
        }
    }

    generate_castling(board, side, !checks.is_empty(), &mut moves);

    moves
}
