//! Move generation.
//!
//! Moves are generated pseudo-legally per piece kind and filtered for
//! own-king safety by playing them out on a copy of the board.

mod pawns;
mod pieces;

use crate::board::Board;
use crate::chess_move::{Move, MoveList};

use self::pawns::gen_pawns;
use self::pieces::{gen_castling, gen_pieces};

/// Generate every pseudo-legal move for the side to move.
///
/// Castling moves are only generated when they are fully legal.
pub fn generate_pseudo_moves(board: &Board) -> MoveList {
    let mut list = MoveList::new();
    gen_pawns(board, &mut list);
    gen_pieces(board, &mut list);
    gen_castling(board, &mut list);
    list
}

/// Return `true` if playing `mv` leaves the mover's king unattacked.
pub fn leaves_king_safe(board: &Board, mv: Move) -> bool {
    let us = board.side_to_move();
    let after = board.apply(mv);
    !after.is_attacked(after.king_square(us), us.flip())
}

/// Generate all legal moves for the current position.
pub fn generate_legal_moves(board: &Board) -> MoveList {
    let mut list = MoveList::new();
    for &mv in &generate_pseudo_moves(board) {
        if leaves_king_safe(board, mv) {
            list.push(mv);
        }
    }
    list
}
