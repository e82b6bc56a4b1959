//! Move execution via copy-make.

use crate::board::Board;
use crate::castling::CastlingPath;
use crate::chess_move::{Move, MoveKind};
use crate::piece::{Color, Piece, PieceKind};

impl Board {
    /// Apply a move and return the resulting board. Copy-make: `self` is not modified.
    ///
    /// The move must be pseudo-legal for the side to move. A move from an
    /// empty square returns the board unchanged.
    pub fn apply(&self, mv: Move) -> Board {
        let mut b = *self;
        let us = b.side_to_move();
        let (from, to) = (mv.from(), mv.to());

        let Some(moving) = b.take(from) else {
            debug_assert!(false, "apply {mv}: no piece on {from}");
            return *self;
        };
        debug_assert_eq!(moving.color(), us, "apply {mv}: moving the wrong colour");

        let captured = match mv.kind() {
            MoveKind::EnPassant => mv.to().backward(us).and_then(|victim| b.take(victim)),
            MoveKind::Castling => None,
            MoveKind::Normal | MoveKind::Promotion => b.take(to),
        };

        b.set_en_passant(None);
        match mv.kind() {
            MoveKind::Normal => {
                b.put(to, moving);
                if moving.kind() == PieceKind::Pawn && from.index().abs_diff(to.index()) == 16 {
                    b.set_en_passant(from.forward(us));
                }
            }
            MoveKind::Promotion => {
                let kind = mv.promotion().map_or(PieceKind::Queen, |p| p.kind());
                b.put(to, Piece::new(kind, us));
            }
            MoveKind::EnPassant => b.put(to, moving),
            MoveKind::Castling => {
                b.put(to, moving);
                if let Some(path) = CastlingPath::from_king_to(to) {
                    if let Some(rook) = b.take(path.rook_from) {
                        b.put(path.rook_to, rook);
                    }
                }
            }
        }

        b.set_castling(b.castling().touched(from).touched(to));

        let halfmove = if moving.kind() == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            b.halfmove_clock().saturating_add(1)
        };
        let fullmove = match us {
            Color::White => b.fullmove_number(),
            Color::Black => b.fullmove_number().saturating_add(1),
        };
        b.set_clocks(halfmove, fullmove);
        b.set_side_to_move(us.flip());
        b
    }
}
