//! Errors raised while building boards from FEN text.

use crate::piece::Color;

/// Errors from parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Fewer than four or more than six space-separated fields.
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    /// The placement field does not describe eight ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// A rank describes more or fewer than eight squares.
    #[error("rank {rank} describes {length} squares, expected 8")]
    BadRankLength { rank: u8, length: usize },

    #[error("invalid piece character '{character}'")]
    InvalidPieceChar { character: char },

    #[error("invalid active color \"{found}\"")]
    InvalidColor { found: String },

    #[error("invalid castling character '{character}'")]
    InvalidCastlingChar { character: char },

    #[error("invalid en passant square \"{found}\"")]
    InvalidEnPassant { found: String },

    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },

    /// The text parsed, but describes an impossible position.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}

/// Structural problems found by [`Board::validate`](crate::Board::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount { color: Color, count: u32 },

    #[error("pawns found on back rank")]
    PawnsOnBackRank,

    /// The side that just moved has its king attacked.
    #[error("side not to move ({color}) is in check")]
    OpponentInCheck { color: Color },

    #[error("en passant square {square} is inconsistent with the position")]
    BadEnPassant { square: crate::square::Square },
}
