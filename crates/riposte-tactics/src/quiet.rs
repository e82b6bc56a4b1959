//! Generation of quiet moves that give check.

use riposte_core::attacks::{line, pawn_attacks, piece_attacks};
use riposte_core::{Bitboard, Board, CastleSide, Color, Move, MoveList, PieceKind, PromotionPiece};

use crate::check::{castle_ready, move_is_check, pseudo_is_legal, slider_blockers};

/// Whether non-capturing promotions that give check count as quiet checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuietPromotions {
    /// Emit checking quiet promotions.
    #[default]
    Include,
    /// Leave promotions to the capture and promotion generators.
    Exclude,
}

/// Append every legal non-capturing checking move to `list`.
pub fn gen_quiet_checks(list: &mut MoveList, board: &Board) {
    gen_quiet_checks_with(list, board, QuietPromotions::Include);
}

/// Like [`gen_quiet_checks`], with an explicit promotion policy.
pub fn gen_quiet_checks_with(list: &mut MoveList, board: &Board, promotions: QuietPromotions) {
    let us = board.side_to_move();
    let king = board.king_square(us.flip());
    let occupied = board.occupied();
    let empty = !occupied;
    let discoverers = slider_blockers(board, king, board.side(us)) & board.side(us);

    let push = |list: &mut MoveList, mv: Move| {
        if pseudo_is_legal(mv, board) {
            list.push(mv);
        }
    };

    for kind in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen, PieceKind::King] {
        // Squares from which this kind would attack the enemy king.
        let direct = match kind {
            PieceKind::King => Bitboard::EMPTY,
            _ => piece_attacks(kind, us, king, occupied),
        };
        for from in board.pieces_of(us, kind) {
            let reach = piece_attacks(kind, us, from, occupied) & empty;
            let mut targets = reach & direct;
            if discoverers.contains(from) {
                targets |= reach & !line(king, from);
            }
            for to in targets {
                push(list, Move::new(from, to));
            }
        }
    }

    let direct = pawn_attacks(us.flip(), king);
    let last_rank = match us {
        Color::White => Bitboard::RANK_8,
        Color::Black => Bitboard::RANK_1,
    };
    for from in board.pieces_of(us, PieceKind::Pawn) {
        let Some(single) = from.forward(us).filter(|sq| empty.contains(*sq)) else {
            continue;
        };

        if last_rank.contains(single) {
            if promotions == QuietPromotions::Include {
                for piece in PromotionPiece::ALL {
                    let mv = Move::new_promotion(from, single, piece);
                    if move_is_check(mv, board) {
                        push(list, mv);
                    }
                }
            }
            continue;
        }

        let mut reach = single.bitboard();
        if let Some(double) = single.forward(us) {
            if from.relative_rank(us) == 1 && empty.contains(double) {
                reach |= double.bitboard();
            }
        }
        let mut targets = reach & direct;
        if discoverers.contains(from) {
            targets |= reach & !line(king, from);
        }
        for to in targets {
            push(list, Move::new(from, to));
        }
    }

    for mv in castling_moves(board) {
        if move_is_check(mv, board) {
            push(list, mv);
        }
    }
}

/// Castling moves whose rights, pieces and path allow them. King safety is
/// left to [`pseudo_is_legal`].
fn castling_moves(board: &Board) -> impl Iterator<Item = Move> + '_ {
    let us = board.side_to_move();
    CastleSide::ALL
        .into_iter()
        .filter_map(move |side| castle_ready(board, us, side))
        .map(|path| Move::new_castle(path.king_from, path.king_to))
}

/// Return `true` if `mv` captures nothing.
#[inline]
pub fn is_quiet(mv: Move, board: &Board) -> bool {
    !mv.is_en_passant() && !board.is_occupied(mv.to())
}
