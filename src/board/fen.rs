//! FEN parsing and emission. Parses the six whitespace-separated fields and
//! round-trips: `parse(emit(board)) == board`.

use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color};
use crate::error::{EngineError, FenErrorReason};
use crate::square::Square;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, EngineError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(EngineError::InvalidFen {
                fen: fen.to_string(),
                reason: FenErrorReason::WrongFieldCount,
            });
        }

        let err = |reason: FenErrorReason| EngineError::InvalidFen { fen: fen.to_string(), reason };

        let mut board = Board::new_empty();
        parse_placement(&mut board, fields[0]).map_err(err)?;

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(err(FenErrorReason::BadActiveColor)),
        };

        board.castling_rights = parse_castling(fields[2]).ok_or_else(|| err(FenErrorReason::BadCastlingChar))?;

        board.en_passant = parse_en_passant(fields[3]).ok_or_else(|| err(FenErrorReason::BadEnPassant))?;

        board.halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| err(FenErrorReason::BadHalfmoveClock))?;

        board.fullmove_number = fields[5]
            .parse::<u32>()
            .map_err(|_| err(FenErrorReason::BadFullmoveNumber))
            .and_then(|n| if n == 0 { Err(err(FenErrorReason::BadFullmoveNumber)) } else { Ok(n) })?;

        board.refresh_hash();
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in (0..8).rev() {
            let mut empty_run = 0u8;
            for file in 0..8 {
                let sq = Square::try_from_rank_file(rank, file).unwrap();
                match self.piece_at(sq) {
                    None => empty_run += 1,
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            out.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        out.push(PC_TO_CHAR[(color as usize) * 6 + piece as usize]);
                    }
                }
            }
            if empty_run > 0 {
                out.push((b'0' + empty_run) as char);
            }
            if rank != 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(if self.side_to_move == Color::White { 'w' } else { 'b' });

        out.push(' ');
        let mut any_castle = false;
        if self.has_castling(CASTLE_WK) {
            out.push('K');
            any_castle = true;
        }
        if self.has_castling(CASTLE_WQ) {
            out.push('Q');
            any_castle = true;
        }
        if self.has_castling(CASTLE_BK) {
            out.push('k');
            any_castle = true;
        }
        if self.has_castling(CASTLE_BQ) {
            out.push('q');
            any_castle = true;
        }
        if !any_castle {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

fn parse_placement(board: &mut Board, field: &str) -> Result<(), FenErrorReason> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenErrorReason::BadRankLength);
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as i32;
        let mut file = 0i32;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                file += digit as i32;
            } else {
                if file >= 8 {
                    return Err(FenErrorReason::BadRankLength);
                }
                let (piece, color) = CHAR_TO_PC[c as usize].ok_or(FenErrorReason::BadPieceChar)?;
                let sq =
                    Square::try_from_rank_file(rank, file).ok_or(FenErrorReason::BadRankLength)?;
                board.put_piece(sq, color, piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenErrorReason::BadRankLength);
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Option<u8> {
    if field == "-" {
        return Some(0);
    }
    let mut rights = 0u8;
    for c in field.chars() {
        rights |= match c {
            'K' => CASTLE_WK,
            'Q' => CASTLE_WQ,
            'k' => CASTLE_BK,
            'q' => CASTLE_BQ,
            _ => return None,
        };
    }
    Some(rights)
}

fn parse_en_passant(field: &str) -> Option<Option<Square>> {
    if field == "-" {
        return Some(None);
    }
    Square::from_uci(field).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        assert_eq!(board.to_fen(), STARTPOS_FEN);
    }

    #[test]
    fn kiwipete_round_trips() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn en_passant_field_round_trips() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.en_passant, Square::from_uci("d6"));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidFen {
                fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -".to_string(),
                reason: FenErrorReason::WrongFieldCount,
            }
        );
    }

    #[test]
    fn bad_active_color_is_rejected() {
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 x - - 0 1").is_err());
    }

    #[test]
    fn bad_piece_char_is_rejected() {
        let err = Board::from_fen("rnbqkbnx/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidFen {
                fen: "rnbqkbnx/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
                reason: FenErrorReason::BadPieceChar,
            }
        );
    }

    #[test]
    fn non_positive_fullmove_is_rejected() {
        assert!(Board::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0"
        )
        .is_err());
    }
}
