//! Moves packed into 16 bits, and the fixed-capacity list they are generated into.

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

const FROM_MASK: u16 = 0x003F;
const TO_SHIFT: u32 = 6;
const TO_MASK: u16 = 0x003F << TO_SHIFT;
const PROMO_SHIFT: u32 = 12;
const PROMO_MASK: u16 = 0b11 << PROMO_SHIFT;
const KIND_SHIFT: u32 = 14;

/// What a move does besides relocating one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// The piece a pawn turns into on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotionPiece {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PromotionPiece {
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }

    const fn from_bits(bits: u16) -> PromotionPiece {
        match bits {
            0 => PromotionPiece::Knight,
            1 => PromotionPiece::Bishop,
            2 => PromotionPiece::Rook,
            _ => PromotionPiece::Queen,
        }
    }
}

/// A move: origin, destination, kind, and promotion piece.
///
/// ```text
/// bits  0-5   from
/// bits  6-11  to
/// bits 12-13  promotion piece (N, B, R, Q)
/// bits 14-15  kind (normal, promotion, en passant, castling)
/// ```
///
/// Castling is encoded by the king's own origin and destination (e1g1, e8c8).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Sentinel a1a1; never produced by move generation.
    pub const NULL: Move = Move(0);

    const fn pack(from: Square, to: Square, kind: MoveKind, promo: u16) -> Move {
        Move(
            from.index() as u16
                | (to.index() as u16) << TO_SHIFT
                | promo << PROMO_SHIFT
                | (kind as u16) << KIND_SHIFT,
        )
    }

    /// A normal move or capture.
    pub const fn new(from: Square, to: Square) -> Move {
        Move::pack(from, to, MoveKind::Normal, 0)
    }

    pub const fn new_promotion(from: Square, to: Square, piece: PromotionPiece) -> Move {
        Move::pack(from, to, MoveKind::Promotion, piece as u16)
    }

    pub const fn new_en_passant(from: Square, to: Square) -> Move {
        Move::pack(from, to, MoveKind::EnPassant, 0)
    }

    pub const fn new_castle(king_from: Square, king_to: Square) -> Move {
        Move::pack(king_from, king_to, MoveKind::Castling, 0)
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 & FROM_MASK) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 & TO_MASK) >> TO_SHIFT) as u8)
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        match self.0 >> KIND_SHIFT {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    /// The promotion piece, for promotion moves only.
    #[inline]
    pub const fn promotion(self) -> Option<PromotionPiece> {
        match self.kind() {
            MoveKind::Promotion => Some(PromotionPiece::from_bits((self.0 & PROMO_MASK) >> PROMO_SHIFT)),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind(), MoveKind::Promotion)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind(), MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind(), MoveKind::Castling)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(piece) = self.promotion() {
            write!(f, "{}", piece.kind().fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {:?})", self.kind())
    }
}

/// Capacity of a [`MoveList`]; no position has more than 218 legal moves.
pub const MAX_MOVES: usize = 256;

/// Stack buffer of moves, filled by generators and appended to by callers.
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList { moves: [Move::NULL; MAX_MOVES], len: 0 }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
