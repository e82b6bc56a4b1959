//! Knight, bishop, rook, queen and king moves, castling included.

use crate::attacks::piece_attacks;
use crate::board::Board;
use crate::castling::{CastleSide, CastlingPath};
use crate::chess_move::{Move, MoveList};
use crate::piece::{Piece, PieceKind};

const PIECES: [PieceKind; 5] =
    [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen, PieceKind::King];

/// Generate pseudo-legal moves for every non-pawn piece of the side to move.
pub(super) fn gen_pieces(board: &Board, list: &mut MoveList) {
    let us = board.side_to_move();
    let targets = !board.side(us);
    let occupied = board.occupied();

    for kind in PIECES {
        for from in board.pieces_of(us, kind) {
            for to in piece_attacks(kind, us, from, occupied) & targets {
                list.push(Move::new(from, to));
            }
        }
    }
}

/// Generate castling moves that are fully legal: the right is held, the
/// rook stands on its corner, the path is empty and the king never stands on
/// an attacked square.
pub(super) fn gen_castling(board: &Board, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.flip();

    for side in CastleSide::ALL {
        if !board.castling().has(us, side) {
            continue;
        }
        let path = CastlingPath::of(us, side);
        if board.piece_at(path.king_from) != Some(Piece::new(PieceKind::King, us))
            || board.piece_at(path.rook_from) != Some(Piece::new(PieceKind::Rook, us))
            || (board.occupied() & path.must_be_empty).is_nonempty()
        {
            continue;
        }
        if path.king_walk.into_iter().any(|sq| board.is_attacked(sq, them)) {
            continue;
        }
        list.push(Move::new_castle(path.king_from, path.king_to));
    }
}
