//! Attack sets for every piece type.
//!
//! Leaper attacks are plain table lookups. Sliding attacks walk the
//! per-direction rays and cut each one at the nearest blocker in `occupied`.

mod tables;

use crate::bitboard::Bitboard;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

use self::tables::{tables, Direction};

/// Build the attack tables now instead of on first use.
///
/// Call once during startup so search threads never race the lazy build.
pub fn init() {
    let _ = tables();
}

/// Squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    tables().knight[sq.index()]
}

/// Squares a king on `sq` attacks.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    tables().king[sq.index()]
}

/// Squares a pawn of `color` standing on `sq` captures on.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    tables().pawn[color.index()][sq.index()]
}

#[inline]
fn ray_attacks(dir: Direction, sq: Square, occupied: Bitboard) -> Bitboard {
    let rays = &tables().rays[dir as usize];
    let ray = rays[sq.index()];
    let blockers = ray & occupied;
    let nearest = if dir.ascending() { blockers.lsb() } else { blockers.msb() };
    match nearest {
        Some(blocker) => ray ^ rays[blocker.index()],
        None => ray,
    }
}

/// Rook attacks from `sq`; blocker squares are included.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::ORTHOGONAL
        .iter()
        .fold(Bitboard::EMPTY, |bb, &dir| bb | ray_attacks(dir, sq, occupied))
}

/// Bishop attacks from `sq`; blocker squares are included.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::DIAGONAL
        .iter()
        .fold(Bitboard::EMPTY, |bb, &dir| bb | ray_attacks(dir, sq, occupied))
}

/// Union of rook and bishop attacks from `sq`.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Attacks of a `color` piece of `kind` standing on `sq`.
#[inline]
pub fn piece_attacks(kind: PieceKind, color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_attacks(color, sq),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupied),
        PieceKind::Rook => rook_attacks(sq, occupied),
        PieceKind::Queen => queen_attacks(sq, occupied),
        PieceKind::King => king_attacks(sq),
    }
}

/// Squares strictly between two aligned squares; empty when not aligned.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    tables().between[a.index()][b.index()]
}

/// The whole rank, file or diagonal through two aligned squares, edge to
/// edge; empty when not aligned.
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    tables().line[a.index()][b.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaper_counts() {
        assert_eq!(knight_attacks(Square::E4).count(), 8);
        assert_eq!(knight_attacks(Square::A1).count(), 2);
        assert_eq!(king_attacks(Square::E1).count(), 5);
        assert_eq!(king_attacks(Square::H8).count(), 3);
    }

    #[test]
    fn pawn_attacks_do_not_wrap() {
        assert_eq!(pawn_attacks(Color::White, Square::A4), Square::B5.bitboard());
        assert_eq!(pawn_attacks(Color::White, Square::H4), Square::G5.bitboard());
        assert_eq!(
            pawn_attacks(Color::Black, Square::E5),
            Square::D4.bitboard() | Square::F4.bitboard()
        );
        assert!(pawn_attacks(Color::White, Square::C8).is_empty());
    }

    #[test]
    fn rook_empty_board_always_14() {
        for sq in Square::all() {
            assert_eq!(rook_attacks(sq, Bitboard::EMPTY).count(), 14, "{sq}");
        }
    }

    #[test]
    fn bishop_empty_board_centre() {
        assert_eq!(bishop_attacks(Square::D4, Bitboard::EMPTY).count(), 13);
        assert_eq!(bishop_attacks(Square::A1, Bitboard::EMPTY).count(), 7);
    }

    #[test]
    fn blockers_truncate_in_both_index_directions() {
        let occupied = Square::E6.bitboard() | Square::E2.bitboard() | Square::B4.bitboard();
        let attacks = rook_attacks(Square::E4, occupied);
        assert!(attacks.contains(Square::E6));
        assert!(!attacks.contains(Square::E7));
        assert!(attacks.contains(Square::E2));
        assert!(!attacks.contains(Square::E1));
        assert!(attacks.contains(Square::B4));
        assert!(!attacks.contains(Square::A4));
        assert!(attacks.contains(Square::H4));
    }

    #[test]
    fn bishop_blocked_diagonal() {
        let occupied = Square::C3.bitboard() | Square::G7.bitboard();
        let attacks = bishop_attacks(Square::E5, occupied);
        assert!(attacks.contains(Square::D4));
        assert!(attacks.contains(Square::C3));
        assert!(!attacks.contains(Square::B2));
        assert!(attacks.contains(Square::F6));
        assert!(attacks.contains(Square::G7));
        assert!(!attacks.contains(Square::H8));
        assert!(attacks.contains(Square::G3));
        assert!(attacks.contains(Square::B8));
    }

    #[test]
    fn slider_attacks_match_naive_walk() {
        // Compare ray truncation against a square-by-square walk on pseudo-random boards.
        fn naive(sq: Square, occupied: Bitboard, steps: &[(i8, i8)]) -> Bitboard {
            let mut bb = Bitboard::EMPTY;
            for &(df, dr) in steps {
                let (mut f, mut r) = (sq.file() as i8 + df, sq.rank() as i8 + dr);
                while (0..8).contains(&f) && (0..8).contains(&r) {
                    let s = Square::from_coords(f as u8, r as u8).unwrap();
                    bb = bb.with(s);
                    if occupied.contains(s) {
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
            bb
        }
        let orth = [(0, 1), (1, 0), (0, -1), (-1, 0)];
        let diag = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

        let mut rng: u64 = 0x9E37_79B9_7F4A_7C15;
        for sq in Square::all() {
            for _ in 0..32 {
                rng ^= rng << 13;
                rng ^= rng >> 7;
                rng ^= rng << 17;
                let occupied = Bitboard::new(rng & rng.rotate_left(17));
                assert_eq!(rook_attacks(sq, occupied), naive(sq, occupied, &orth), "rook {sq}");
                assert_eq!(bishop_attacks(sq, occupied), naive(sq, occupied, &diag), "bishop {sq}");
            }
        }
    }

    #[test]
    fn between_and_line() {
        assert_eq!(between(Square::E1, Square::E4), Square::E2.bitboard() | Square::E3.bitboard());
        assert_eq!(between(Square::A1, Square::H8).count(), 6);
        assert_eq!(between(Square::H8, Square::A1).count(), 6);
        assert!(between(Square::A1, Square::B3).is_empty());
        assert!(between(Square::E4, Square::E5).is_empty());
        assert_eq!(line(Square::A1, Square::H8).count(), 8);
        assert_eq!(line(Square::C2, Square::C7), line(Square::C7, Square::C2));
        assert!(line(Square::C2, Square::C7).contains(Square::C1));
        assert!(line(Square::A1, Square::B3).is_empty());
    }

    #[test]
    fn piece_attacks_dispatch() {
        assert_eq!(
            piece_attacks(PieceKind::Knight, Color::White, Square::G1, Bitboard::EMPTY),
            knight_attacks(Square::G1)
        );
        assert_eq!(
            piece_attacks(PieceKind::Pawn, Color::Black, Square::D7, Bitboard::EMPTY),
            pawn_attacks(Color::Black, Square::D7)
        );
    }
}
