use crate::board::{Color, Piece};
use crate::square::Square;
use arrayvec::ArrayVec;
use std::fmt;

/// Upper bound on legal moves in any reachable chess position.
pub const MAX_MOVES: usize = 218;
/// Upper bound on legal moves a single piece can generate.
pub const MAX_PIECE_MOVES: usize = 27;

pub type MoveList = ArrayVec<Move, MAX_MOVES>;
pub type PieceMoveList = ArrayVec<Move, MAX_PIECE_MOVES>;

/// What a move does beyond relocating a piece. `piece`/`promotion` already
/// carry the identity information a caller needs; `kind` exists so
/// `make`/`unmake` can dispatch without re-deriving it from board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    DoublePawnPush,
    Capture,
    EnPassant,
    CastleKingside,
    CastleQueenside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub promotion: Option<Piece>,
    pub kind: MoveKind,
}

impl Move {
    pub fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Move { from, to, piece, promotion: None, kind: MoveKind::Quiet }
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline(always)]
    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        matches!(self.kind, MoveKind::DoublePawnPush)
    }

    /// Parses the 4-or-5-character UCI form (`e2e4`, `a7a8q`) against the
    /// legal moves available in `legal`, since the move's `kind` cannot be
    /// recovered from the string alone.
    pub fn from_uci(uci: &str, legal: &[Move]) -> Option<Move> {
        if uci.len() != 4 && uci.len() != 5 {
            return None;
        }
        let from = Square::from_uci(&uci[0..2])?;
        let to = Square::from_uci(&uci[2..4])?;
        let promotion = match uci.as_bytes().get(4) {
            None => None,
            Some(b'q') => Some(Piece::Queen),
            Some(b'r') => Some(Piece::Rook),
            Some(b'b') => Some(Piece::Bishop),
            Some(b'n') => Some(Piece::Knight),
            Some(_) => return None,
        };
        legal
            .iter()
            .find(|m| m.from == from && m.to == to && m.promotion == promotion)
            .copied()
    }

    pub fn to_uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(p) = self.promotion {
            s.push(match p {
                Piece::Queen => 'q',
                Piece::Rook => 'r',
                Piece::Bishop => 'b',
                Piece::Knight => 'n',
                _ => unreachable!("non-promotable piece in promotion field"),
            });
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// A ray along a rank, file, or diagonal, used to represent pin and check
/// lines during legality filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveLine {
    pub from: Square,
    pub to: Square,
}

impl MoveLine {
    pub fn new(from: Square, to: Square) -> Self {
        MoveLine { from, to }
    }

    /// True iff `sq` lies on the ray between `from` and `to`, inclusive.
    /// A single-square line (`from == to`, used for pawn/knight checkers)
    /// matches only that square.
    pub fn in_line(&self, sq: Square) -> bool {
        if self.from == self.to {
            return sq == self.from;
        }
        let (fr, ff) = (self.from.rank() as i32, self.from.file() as i32);
        let (tr, tf) = (self.to.rank() as i32, self.to.file() as i32);
        let (sr, sf) = (sq.rank() as i32, sq.file() as i32);
        let between = |v: i32, a: i32, b: i32| (a.min(b)..=a.max(b)).contains(&v);

        if fr == tr {
            return ff != tf && sr == fr && between(sf, ff, tf);
        }
        if ff == tf {
            return sf == ff && between(sr, fr, tr);
        }
        if fr - ff == tr - tf {
            return sr - sf == fr - ff && between(sr, fr, tr);
        }
        if fr + ff == tr + tf {
            return sr + sf == fr + ff && between(sr, fr, tr);
        }
        false
    }
}

/// Everything needed to reverse one `Board::make` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDelta {
    pub mv: Move,
    /// Captured piece's color/type and the square it was removed from —
    /// differs from `mv.to` for en-passant.
    pub captured: Option<(Color, Piece, Square)>,
    pub prev_castling_rights: u8,
    pub prev_en_passant: Option<Square>,
    pub prev_halfmove_clock: u32,
    pub prev_hash: u64,
}
