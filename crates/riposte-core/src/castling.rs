//! Castling rights and the fixed geometry of the four castling moves.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::error::FenError;
use crate::piece::Color;
use crate::square::Square;

/// Which wing the king castles toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];
}

/// Squares touched by one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingPath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook; all must be empty.
    pub must_be_empty: Bitboard,
    /// Squares the king stands on, crosses, or lands on; none may be attacked.
    pub king_walk: Bitboard,
}

impl CastlingPath {
    pub const fn of(color: Color, side: CastleSide) -> CastlingPath {
        let (king_from, king_to, rook_from, rook_to) = match (color, side) {
            (Color::White, CastleSide::KingSide) => (Square::E1, Square::G1, Square::H1, Square::F1),
            (Color::White, CastleSide::QueenSide) => (Square::E1, Square::C1, Square::A1, Square::D1),
            (Color::Black, CastleSide::KingSide) => (Square::E8, Square::G8, Square::H8, Square::F8),
            (Color::Black, CastleSide::QueenSide) => (Square::E8, Square::C8, Square::A8, Square::D8),
        };
        let must_be_empty = match side {
            CastleSide::KingSide => Bitboard::new(rook_to.bitboard().inner() | king_to.bitboard().inner()),
            CastleSide::QueenSide => Bitboard::new(
                rook_to.bitboard().inner()
                    | king_to.bitboard().inner()
                    | (rook_from.bitboard().inner() << 1),
            ),
        };
        let king_walk = Bitboard::new(
            king_from.bitboard().inner() | rook_to.bitboard().inner() | king_to.bitboard().inner(),
        );
        CastlingPath { king_from, king_to, rook_from, rook_to, must_be_empty, king_walk }
    }

    /// Look up the path from the king's destination square (g1, c1, g8, c8).
    pub const fn from_king_to(king_to: Square) -> Option<CastlingPath> {
        match king_to.index() {
            6 => Some(CastlingPath::of(Color::White, CastleSide::KingSide)),
            2 => Some(CastlingPath::of(Color::White, CastleSide::QueenSide)),
            62 => Some(CastlingPath::of(Color::Black, CastleSide::KingSide)),
            58 => Some(CastlingPath::of(Color::Black, CastleSide::QueenSide)),
            _ => None,
        }
    }
}

/// Castling rights: bit 0 = White king side, 1 = White queen side,
/// 2 = Black king side, 3 = Black queen side.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    #[inline]
    pub const fn new(bits: u8) -> CastleRights {
        CastleRights(bits & 0b1111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        let shift = match side {
            CastleSide::KingSide => 0,
            CastleSide::QueenSide => 1,
        };
        1 << (color as u8 * 2 + shift)
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> CastleRights {
        CastleRights(self.0 | Self::flag(color, side))
    }

    /// Rights left after a piece leaves or lands on `sq`.
    pub const fn touched(self, sq: Square) -> CastleRights {
        let lost = match sq.index() {
            4 => 0b0011,
            7 => 0b0001,
            0 => 0b0010,
            60 => 0b1100,
            63 => 0b0100,
            56 => 0b1000,
            _ => 0,
        };
        CastleRights(self.0 & !lost)
    }

    /// Parse the FEN castling field (`"KQkq"`, `"-"`, ...).
    pub fn from_fen(field: &str) -> Result<CastleRights, FenError> {
        if field == "-" {
            return Ok(CastleRights::NONE);
        }
        field.chars().try_fold(CastleRights::NONE, |rights, c| {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::KingSide),
                'Q' => (Color::White, CastleSide::QueenSide),
                'k' => (Color::Black, CastleSide::KingSide),
                'q' => (Color::Black, CastleSide::QueenSide),
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            Ok(rights.with(color, side))
        })
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (color, side, c) in [
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ] {
            if self.has(color, side) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}
