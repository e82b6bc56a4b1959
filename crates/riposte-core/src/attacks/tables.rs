//! Process-wide attack tables, built once and read-only afterwards.

use std::sync::OnceLock;

use tracing::debug;

use crate::bitboard::Bitboard;
use crate::square::Square;

/// The eight ray directions. Ascending directions move toward higher square
/// indices, so the nearest blocker on them is the lowest set bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    North,
    NorthEast,
    East,
    NorthWest,
    South,
    SouthWest,
    West,
    SouthEast,
}

impl Direction {
    pub(crate) const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::NorthWest,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::SouthEast,
    ];

    pub(crate) const ORTHOGONAL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub(crate) const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// `(file, rank)` step.
    const fn step(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::SouthEast => (1, -1),
        }
    }

    #[inline]
    pub(crate) const fn ascending(self) -> bool {
        (self as usize) < 4
    }

    const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::NorthWest => Direction::SouthEast,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

pub(crate) struct AttackTables {
    pub(crate) knight: [Bitboard; 64],
    pub(crate) king: [Bitboard; 64],
    /// Indexed by `[Color::index()][Square::index()]`.
    pub(crate) pawn: [[Bitboard; 64]; 2],
    /// Empty-board ray from a square (exclusive) to the edge, per direction.
    pub(crate) rays: [[Bitboard; 64]; 8],
    pub(crate) between: Box<[[Bitboard; 64]]>,
    pub(crate) line: Box<[[Bitboard; 64]]>,
}

static TABLES: OnceLock<AttackTables> = OnceLock::new();

#[inline]
pub(crate) fn tables() -> &'static AttackTables {
    TABLES.get_or_init(AttackTables::build)
}

/// Squares reached from `sq` by repeating `(df, dr)` up to `limit` times.
fn walk(sq: Square, (df, dr): (i8, i8), limit: u8) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    let (mut file, mut rank) = (sq.file() as i8, sq.rank() as i8);
    for _ in 0..limit {
        file += df;
        rank += dr;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            break;
        }
        bb = bb.with(Square::from_index_unchecked((rank * 8 + file) as u8));
    }
    bb
}

impl AttackTables {
    fn build() -> AttackTables {
        const KNIGHT_STEPS: [(i8, i8); 8] =
            [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        let mut pawn = [[Bitboard::EMPTY; 64]; 2];
        let mut rays = [[Bitboard::EMPTY; 64]; 8];

        for sq in Square::all() {
            let i = sq.index();
            knight[i] = KNIGHT_STEPS.iter().fold(Bitboard::EMPTY, |bb, &step| bb | walk(sq, step, 1));
            king[i] = Direction::ALL
                .iter()
                .fold(Bitboard::EMPTY, |bb, dir| bb | walk(sq, dir.step(), 1));
            pawn[0][i] = walk(sq, (-1, 1), 1) | walk(sq, (1, 1), 1);
            pawn[1][i] = walk(sq, (-1, -1), 1) | walk(sq, (1, -1), 1);
            for dir in Direction::ALL {
                rays[dir as usize][i] = walk(sq, dir.step(), 7);
            }
        }

        let mut between = vec![[Bitboard::EMPTY; 64]; 64].into_boxed_slice();
        let mut line = vec![[Bitboard::EMPTY; 64]; 64].into_boxed_slice();
        for from in Square::all() {
            for dir in Direction::ALL {
                let ray = rays[dir as usize][from.index()];
                let full = ray | rays[dir.opposite() as usize][from.index()] | from.bitboard();
                for to in ray {
                    between[from.index()][to.index()] =
                        (ray ^ rays[dir as usize][to.index()]).without(to);
                    line[from.index()][to.index()] = full;
                }
            }
        }

        debug!("attack tables built");
        AttackTables { knight, king, pawn, rays, between, line }
    }
}

#[cfg(test)]
mod tests {
    use super::{tables, Direction};
    use crate::square::Square;

    #[test]
    fn ray_lengths_from_corner() {
        let t = tables();
        assert_eq!(t.rays[Direction::North as usize][Square::A1.index()].count(), 7);
        assert_eq!(t.rays[Direction::NorthEast as usize][Square::A1.index()].count(), 7);
        assert!(t.rays[Direction::South as usize][Square::A1.index()].is_empty());
        assert!(t.rays[Direction::West as usize][Square::A1.index()].is_empty());
    }

    #[test]
    fn ascending_directions_increase_index() {
        for dir in Direction::ALL {
            let ray = tables().rays[dir as usize][Square::D4.index()];
            let first = ray.lsb().unwrap();
            assert_eq!(dir.ascending(), first > Square::D4, "{dir:?}");
        }
    }
}
