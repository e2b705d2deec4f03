//! Error kinds reported to the command front-end. Programmer-bug conditions
//! (illegal `make`, move-list capacity exceeded) are not modeled here: those
//! panic with the offending FEN attached, since they indicate a bug in move
//! generation rather than a condition a caller can recover from.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid FEN ({reason}): {fen}")]
    InvalidFen { fen: String, reason: FenErrorReason },

    #[error("invalid UCI move string: {0}")]
    InvalidUciMove(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FenErrorReason {
    #[error("expected 6 whitespace-separated fields")]
    WrongFieldCount,
    #[error("rank has the wrong number of squares")]
    BadRankLength,
    #[error("unknown piece character in placement field")]
    BadPieceChar,
    #[error("active color must be 'w' or 'b'")]
    BadActiveColor,
    #[error("unknown castling availability character")]
    BadCastlingChar,
    #[error("malformed en-passant target square")]
    BadEnPassant,
    #[error("halfmove clock must be a non-negative integer")]
    BadHalfmoveClock,
    #[error("fullmove number must be a positive integer")]
    BadFullmoveNumber,
}
