//! Position state: piece placement, side to move, castling, en passant, clocks.

use std::fmt;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::castling::CastleRights;
use crate::error::BoardError;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// A complete chess position.
///
/// Bitboards per kind and per colour are kept in sync with a mailbox so
/// both set queries and `piece_at` are constant time. Boards are `Copy`;
/// moves are simulated by copying (see [`Board::apply`]).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    mailbox: [Option<Piece>; Square::COUNT],
    pieces: [Bitboard; PieceKind::COUNT],
    sides: [Bitboard; Color::COUNT],
    occupied: Bitboard,
    kings: [Square; Color::COUNT],
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Board {
    /// An empty board, White to move. Not valid until kings are placed.
    pub(crate) fn empty() -> Board {
        Board {
            mailbox: [None; Square::COUNT],
            pieces: [Bitboard::EMPTY; PieceKind::COUNT],
            sides: [Bitboard::EMPTY; Color::COUNT],
            occupied: Bitboard::EMPTY,
            kings: [Square::E1, Square::E8],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// A board with nothing on it but the two kings, White to move.
    pub(crate) fn with_kings(white_king: Square, black_king: Square) -> Board {
        let mut board = Board::empty();
        board.put(white_king, Piece::new(PieceKind::King, Color::White));
        board.put(black_king, Piece::new(PieceKind::King, Color::Black));
        board
    }

    /// The standard initial position.
    pub fn starting_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::with_kings(Square::E1, Square::E8);
        for (file, kind) in (0u8..).zip(BACK_RANK) {
            for (color, back, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let Some(sq) = Square::from_coords(file, back) {
                    if kind != PieceKind::King {
                        board.put(sq, Piece::new(kind, color));
                    }
                }
                if let Some(sq) = Square::from_coords(file, pawns) {
                    board.put(sq, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
        board.castling = CastleRights::ALL;
        board
    }

    /// Place `piece` on the empty square `sq`.
    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.mailbox[sq.index()].is_none(), "{sq} already occupied");
        let bb = sq.bitboard();
        self.mailbox[sq.index()] = Some(piece);
        self.pieces[piece.kind().index()] |= bb;
        self.sides[piece.color().index()] |= bb;
        self.occupied |= bb;
        if piece.kind() == PieceKind::King {
            self.kings[piece.color().index()] = sq;
        }
    }

    /// Lift and return whatever stands on `sq`.
    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.mailbox[sq.index()].take()?;
        let bb = !sq.bitboard();
        self.pieces[piece.kind().index()] &= bb;
        self.sides[piece.color().index()] &= bb;
        self.occupied &= bb;
        Some(piece)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.mailbox[sq.index()]
    }

    #[inline]
    pub fn kind_at(&self, sq: Square) -> Option<PieceKind> {
        self.piece_at(sq).map(Piece::kind)
    }

    /// Both colours' pieces of `kind`.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()] & self.sides[color.index()]
    }

    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        self.pieces_of(color, kind).count()
    }

    /// Bishops and queens of both colours.
    #[inline]
    pub fn diagonal_sliders(&self) -> Bitboard {
        self.pieces(PieceKind::Bishop) | self.pieces(PieceKind::Queen)
    }

    /// Rooks and queens of both colours.
    #[inline]
    pub fn orthogonal_sliders(&self) -> Bitboard {
        self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Queen)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.occupied.contains(sq)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    pub(crate) fn set_clocks(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Every piece of either colour attacking `sq`, with sliders traced
    /// through `occupied` instead of the board's own occupancy.
    ///
    /// Pieces standing on squares outside `occupied` are still reported;
    /// callers that remove pieces mask the result themselves.
    pub fn attackers_to(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        (knight_attacks(sq) & self.pieces(PieceKind::Knight))
            | (king_attacks(sq) & self.pieces(PieceKind::King))
            | (pawn_attacks(Color::Black, sq) & self.pieces_of(Color::White, PieceKind::Pawn))
            | (pawn_attacks(Color::White, sq) & self.pieces_of(Color::Black, PieceKind::Pawn))
            | (rook_attacks(sq, occupied) & self.orthogonal_sliders())
            | (bishop_attacks(sq, occupied) & self.diagonal_sliders())
    }

    /// Pieces of `color` attacking `sq` under the current occupancy.
    #[inline]
    pub fn attackers_of(&self, sq: Square, color: Color) -> Bitboard {
        self.attackers_to(sq, self.occupied) & self.side(color)
    }

    /// Return `true` if any piece of `by` attacks `sq`, tracing sliders through `occupied`.
    pub fn is_attacked_with(&self, sq: Square, by: Color, occupied: Bitboard) -> bool {
        let them = self.side(by);
        (knight_attacks(sq) & them & self.pieces(PieceKind::Knight)).is_nonempty()
            || (pawn_attacks(by.flip(), sq) & them & self.pieces(PieceKind::Pawn)).is_nonempty()
            || (king_attacks(sq) & them & self.pieces(PieceKind::King)).is_nonempty()
            || (rook_attacks(sq, occupied) & them & self.orthogonal_sliders()).is_nonempty()
            || (bishop_attacks(sq, occupied) & them & self.diagonal_sliders()).is_nonempty()
    }

    #[inline]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.is_attacked_with(sq, by, self.occupied)
    }

    /// Check the structural invariants a FEN string cannot guarantee.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self.count(color, PieceKind::King);
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }

        if (self.pieces(PieceKind::Pawn) & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_nonempty() {
            return Err(BoardError::PawnsOnBackRank);
        }

        let waiting = self.side_to_move.flip();
        if self.is_attacked(self.king_square(waiting), self.side_to_move) {
            return Err(BoardError::OpponentInCheck { color: waiting });
        }

        if let Some(ep) = self.en_passant {
            let us = self.side_to_move;
            let pawn_behind = ep
                .backward(us)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p == Piece::new(PieceKind::Pawn, us.flip()));
            if ep.relative_rank(us) != 5 || self.is_occupied(ep) || !pawn_behind {
                return Err(BoardError::BadEnPassant { square: ep });
            }
        }

        Ok(())
    }

    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{self}\")")
    }
}

/// Display adapter drawing the board as an 8x8 grid, White at the bottom.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0u8..8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.0.piece_at(sq))
                    .map_or('.', Piece::fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::bitboard::Bitboard;
    use crate::error::{BoardError, FenError};
    use crate::piece::{Color, Piece, PieceKind};
    use crate::square::Square;

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        board.validate().unwrap();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.kind_at(Square::D1), Some(PieceKind::Queen));
        assert_eq!(board.piece_at(Square::G8), Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert_eq!(board.piece_at(Square::E4), None);
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert_eq!(board.count(Color::White, PieceKind::Pawn), 8);
    }

    #[test]
    fn starting_position_matches_fen() {
        let parsed: Board = crate::STARTING_FEN.parse().unwrap();
        assert_eq!(parsed, Board::starting_position());
    }

    #[test]
    fn put_and_take_keep_sets_in_sync() {
        let mut board = Board::with_kings(Square::E1, Square::E8);
        board.put(Square::D4, Piece::new(PieceKind::Rook, Color::White));
        assert!(board.pieces_of(Color::White, PieceKind::Rook).contains(Square::D4));
        assert!(board.is_occupied(Square::D4));
        assert_eq!(board.take(Square::D4), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(board.take(Square::D4), None);
        assert_eq!(board.occupied().count(), 2);
        assert!(board.pieces(PieceKind::Rook).is_empty());
    }

    #[test]
    fn attackers_of_square() {
        let board: Board = "4k3/8/8/3p4/4P3/2N5/8/4K2B w - - 0 1".parse().unwrap();
        let white = board.attackers_of(Square::D5, Color::White);
        assert_eq!(white, Square::E4.bitboard() | Square::C3.bitboard());
        // The bishop on h1 is screened by the e4 pawn.
        assert!(!white.contains(Square::H1));
        let xray = board.attackers_to(Square::D5, board.occupied().without(Square::E4));
        assert!(xray.contains(Square::H1));
    }

    #[test]
    fn starting_position_attacks() {
        let board = Board::starting_position();
        assert!(board.is_attacked(Square::F3, Color::White));
        assert!(board.is_attacked(Square::F6, Color::Black));
        assert!(!board.is_attacked(Square::E4, Color::White));
        assert!(!board.is_attacked_with(Square::E4, Color::Black, Bitboard::EMPTY));
    }

    #[test]
    fn validate_rejects_bad_positions() {
        let err = "4k3/8/8/8/8/8/8/8 w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            FenError::InvalidBoard(BoardError::InvalidKingCount { color: Color::White, count: 0 })
        );

        let err = "4k3/8/8/8/8/8/8/4K2P w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::InvalidBoard(BoardError::PawnsOnBackRank));

        // White to move while the black king is attacked by the rook.
        let err = "4k3/8/8/8/8/8/8/4RK2 w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            FenError::InvalidBoard(BoardError::OpponentInCheck { color: Color::Black })
        );

        let err = "4k3/8/8/8/8/8/8/4K3 w - e6 0 1".parse::<Board>().unwrap_err();
        assert!(matches!(err, FenError::InvalidBoard(BoardError::BadEnPassant { .. })));
    }

    #[test]
    fn pretty_print() {
        let out = Board::starting_position().pretty().to_string();
        assert!(out.contains("8  r n b q k b n r"));
        assert!(out.contains("1  R N B Q K B N R"));
        assert!(out.ends_with("a b c d e f g h"));
    }
}
