//! Pawn move generation.

use crate::attacks::pawn_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, MoveList, PromotionPiece};
use crate::piece::{Color, PieceKind};
use crate::square::Square;

/// Push one move per promotion piece, or the plain move off the last rank.
fn push_pawn_move(list: &mut MoveList, from: Square, to: Square, last_rank: Bitboard) {
    if last_rank.contains(to) {
        for piece in PromotionPiece::ALL {
            list.push(Move::new_promotion(from, to, piece));
        }
    } else {
        list.push(Move::new(from, to));
    }
}

/// Generate pseudo-legal pawn pushes, captures and en passant.
pub(super) fn gen_pawns(board: &Board, list: &mut MoveList) {
    let us = board.side_to_move();
    let enemy = board.side(us.flip());
    let empty = !board.occupied();
    let (last_rank, double_rank) = match us {
        Color::White => (Bitboard::RANK_8, Bitboard::RANK_4),
        Color::Black => (Bitboard::RANK_1, Bitboard::RANK_5),
    };

    for from in board.pieces_of(us, PieceKind::Pawn) {
        if let Some(one) = from.forward(us).filter(|sq| empty.contains(*sq)) {
            push_pawn_move(list, from, one, last_rank);
            if let Some(two) = one.forward(us).filter(|sq| empty.contains(*sq) && double_rank.contains(*sq)) {
                list.push(Move::new(from, two));
            }
        }

        for to in pawn_attacks(us, from) & enemy {
            push_pawn_move(list, from, to, last_rank);
        }

        if let Some(ep) = board.en_passant() {
            if pawn_attacks(us, from).contains(ep) {
                list.push(Move::new_en_passant(from, ep));
            }
        }
    }
}
