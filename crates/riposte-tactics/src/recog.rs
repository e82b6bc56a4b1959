//! Recognition of material configurations where mate is impossible.

use riposte_core::{Bitboard, Board, Color, PieceKind};

/// Return `true` if neither side can possibly deliver mate.
///
/// Recognizes bare kings, a single minor piece against a bare king, and one
/// bishop each on squares of the same colour. Any other material returns
/// `false`, so a `true` answer is always a real draw.
pub fn recog_draw(board: &Board) -> bool {
    let heavy = board.pieces(PieceKind::Pawn) | board.pieces(PieceKind::Rook) | board.pieces(PieceKind::Queen);
    if heavy.is_nonempty() {
        return false;
    }

    let minors = |color| board.count(color, PieceKind::Knight) + board.count(color, PieceKind::Bishop);
    match (minors(Color::White), minors(Color::Black)) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (1, 1) => {
            let bishops = board.pieces(PieceKind::Bishop);
            bishops.count() == 2
                && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                    || (bishops & Bitboard::DARK_SQUARES).is_empty())
        }
        _ => false,
    }
}
