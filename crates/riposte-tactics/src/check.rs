//! Check detection, pin detection and cheap pseudo-legality and legality tests.
//!
//! Nothing here plays a move out on a board unless the position is too
//! irregular for the line tests (en passant, or the mover already in check).

use riposte_core::attacks::{between, bishop_attacks, line, pawn_attacks, piece_attacks, rook_attacks};
use riposte_core::movegen::leaves_king_safe;
use riposte_core::{
    Bitboard, Board, CastleSide, CastlingPath, Color, Move, MoveKind, Piece, PieceKind, Square,
};

/// Return `true` if the king of `color` is attacked.
#[inline]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board.is_attacked(board.king_square(color), color.flip())
}

/// Pieces of either colour that stand alone between `target` and one of
/// `sliders`.
///
/// With the enemy sliders and our own king square this is the set of pieces
/// pinned against it (after masking with our side). With our own sliders and
/// the enemy king it is the set of discovered-check candidates.
pub fn slider_blockers(board: &Board, target: Square, sliders: Bitboard) -> Bitboard {
    let snipers = (rook_attacks(target, Bitboard::EMPTY) & sliders & board.orthogonal_sliders())
        | (bishop_attacks(target, Bitboard::EMPTY) & sliders & board.diagonal_sliders());

    let mut blockers = Bitboard::EMPTY;
    for sniper in snipers {
        let between = between(target, sniper) & board.occupied();
        if between.is_nonempty() && !between.has_many() {
            blockers |= between;
        }
    }
    blockers
}

/// Own pieces of `color` pinned against their king.
#[inline]
pub fn pinned(board: &Board, color: Color) -> Bitboard {
    slider_blockers(board, board.king_square(color), board.side(color.flip())) & board.side(color)
}

/// Squares a move empties and the squares it fills, under post-move occupancy.
struct Footprint {
    vacated: Bitboard,
    occupied: Bitboard,
}

fn footprint(board: &Board, mv: Move) -> Footprint {
    let (from, to) = (mv.from(), mv.to());
    let mut vacated = from.bitboard();
    let mut filled = to.bitboard();

    match mv.kind() {
        MoveKind::EnPassant => {
            if let Some(victim) = to.backward(board.side_to_move()) {
                vacated |= victim.bitboard();
            }
        }
        MoveKind::Castling => {
            if let Some(path) = CastlingPath::from_king_to(to) {
                vacated |= path.rook_from.bitboard();
                filled |= path.rook_to.bitboard();
            }
        }
        MoveKind::Normal | MoveKind::Promotion => {}
    }

    Footprint { vacated: vacated & !filled, occupied: (board.occupied() & !vacated) | filled }
}

/// Return `true` if the pseudo-legal move `mv` gives check to the opponent.
pub fn move_is_check(mv: Move, board: &Board) -> bool {
    let us = board.side_to_move();
    let king = board.king_square(us.flip());
    let (from, to) = (mv.from(), mv.to());
    let Some(moving) = board.kind_at(from) else {
        debug_assert!(false, "move_is_check {mv}: no piece on {from}");
        return false;
    };
    let after = footprint(board, mv);

    // Direct check from the destination.
    match mv.kind() {
        MoveKind::Castling => {
            if let Some(path) = CastlingPath::from_king_to(to) {
                if rook_attacks(path.rook_to, after.occupied).contains(king) {
                    return true;
                }
            }
        }
        _ => {
            let kind = mv.promotion().map_or(moving, |p| p.kind());
            if kind != PieceKind::King
                && piece_attacks(kind, us, to, after.occupied).contains(king)
            {
                return true;
            }
        }
    }

    // Discovered check: a slider that stayed put now sees the king through a
    // vacated square.
    let ours = board.side(us) & !after.vacated;
    let orthogonal = rook_attacks(king, after.occupied) & board.orthogonal_sliders() & ours;
    let diagonal = bishop_attacks(king, after.occupied) & board.diagonal_sliders() & ours;
    (orthogonal | diagonal)
        .into_iter()
        .any(|slider| (between(king, slider) & after.vacated).is_nonempty())
}

/// The castling path of `us` on `side` when the right is held, king and rook
/// stand on their squares and everything between them is empty. Attacks on
/// the king's walk are not looked at.
pub(crate) fn castle_ready(board: &Board, us: Color, side: CastleSide) -> Option<CastlingPath> {
    let path = CastlingPath::of(us, side);
    let ready = board.castling().has(us, side)
        && board.piece_at(path.king_from) == Some(Piece::new(PieceKind::King, us))
        && board.piece_at(path.rook_from) == Some(Piece::new(PieceKind::Rook, us))
        && (board.occupied() & path.must_be_empty).is_empty();
    ready.then_some(path)
}

/// Return `true` if a pawn of the side to move on `from` can push or capture
/// onto `to`, en passant aside.
fn pawn_reaches(board: &Board, from: Square, to: Square) -> bool {
    let us = board.side_to_move();
    if pawn_attacks(us, from).contains(to) {
        return board.side(us.flip()).contains(to);
    }
    let Some(single) = from.forward(us).filter(|sq| !board.is_occupied(*sq)) else {
        return false;
    };
    to == single
        || (from.relative_rank(us) == 1 && single.forward(us) == Some(to) && !board.is_occupied(to))
}

/// Return `true` if `mv` is a pseudo-legal move for the side to move.
///
/// Accepts exactly the moves [`generate_pseudo_moves`] would produce, so a
/// move remembered from another position (a hash or killer move) can be
/// checked before it is played.
///
/// [`generate_pseudo_moves`]: riposte_core::generate_pseudo_moves
pub fn move_is_pseudo(mv: Move, board: &Board) -> bool {
    let us = board.side_to_move();
    let (from, to) = (mv.from(), mv.to());
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if piece.color() != us || board.side(us).contains(to) {
        return false;
    }

    match (piece.kind(), mv.kind()) {
        (PieceKind::King, MoveKind::Castling) => CastleSide::ALL
            .into_iter()
            .filter_map(|side| castle_ready(board, us, side))
            .any(|path| {
                path.king_to == to && !path.king_walk.into_iter().any(|sq| board.is_attacked(sq, us.flip()))
            }),
        (PieceKind::Pawn, MoveKind::EnPassant) => {
            board.en_passant() == Some(to) && pawn_attacks(us, from).contains(to)
        }
        (PieceKind::Pawn, MoveKind::Normal | MoveKind::Promotion) => {
            mv.is_promotion() == (to.relative_rank(us) == 7) && pawn_reaches(board, from, to)
        }
        (kind, MoveKind::Normal) => piece_attacks(kind, us, from, board.occupied()).contains(to),
        _ => false,
    }
}

/// Return `true` if `mv` is a pseudo-legal move that captures nothing and
/// does not promote, as a killer move must be.
pub fn quiet_is_pseudo(mv: Move, board: &Board) -> bool {
    !mv.is_promotion() && !mv.is_en_passant() && !board.is_occupied(mv.to()) && move_is_pseudo(mv, board)
}

/// Return `true` if the pseudo-legal move `mv` does not leave the mover's
/// king attacked.
pub fn pseudo_is_legal(mv: Move, board: &Board) -> bool {
    let us = board.side_to_move();
    let them = us.flip();
    let king = board.king_square(us);
    let (from, to) = (mv.from(), mv.to());

    if mv.kind() == MoveKind::Castling {
        return CastlingPath::from_king_to(to)
            .is_some_and(|path| !path.king_walk.into_iter().any(|sq| board.is_attacked(sq, them)));
    }

    if mv.kind() == MoveKind::EnPassant || is_in_check(board, us) {
        return leaves_king_safe(board, mv);
    }

    if from == king {
        return !board.is_attacked_with(to, them, board.occupied().without(from));
    }

    !pinned(board, us).contains(from) || line(king, from).contains(to)
}
