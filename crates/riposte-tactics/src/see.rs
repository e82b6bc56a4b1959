//! Static Exchange Evaluation (SEE).
//!
//! Determines the material outcome of a sequence of captures on a single square,
//! assuming both sides use their least valuable attacker at each step. A
//! piece sits out while capturing would open a line from an enemy slider to
//! its own king, judged on the board as it stands at that point of the
//! exchange, and sliders hidden behind a capturer join once it has left.

use riposte_core::attacks::{bishop_attacks, rook_attacks};
use riposte_core::{Bitboard, Board, Color, Move, MoveKind, PieceKind, Square};

/// Material values used by the exchange evaluator, in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeeValues {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
}

impl SeeValues {
    /// Pawn 100, minors 325, rook 500, queen 1000, king 10000.
    pub const STANDARD: SeeValues =
        SeeValues { pawn: 100, knight: 325, bishop: 325, rook: 500, queen: 1000, king: 10_000 };

    /// Value of a piece of `kind`.
    #[inline]
    pub const fn value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

impl Default for SeeValues {
    fn default() -> Self {
        SeeValues::STANDARD
    }
}

const MAX_ATTACKERS: usize = 16;
const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy)]
struct Attacker {
    value: i32,
    square: Square,
    kind: PieceKind,
}

/// One side's attackers of the target square, most valuable first so the
/// cheapest is popped from the end.
struct AttackerList {
    items: [Attacker; MAX_ATTACKERS],
    len: usize,
}

impl AttackerList {
    fn new() -> AttackerList {
        AttackerList {
            items: [Attacker { value: 0, square: Square::A1, kind: PieceKind::Pawn }; MAX_ATTACKERS],
            len: 0,
        }
    }

    fn insert(&mut self, attacker: Attacker) {
        if self.len == MAX_ATTACKERS {
            debug_assert!(false, "attacker list overflow");
            return;
        }
        let mut i = self.len;
        while i > 0 && self.items[i - 1].value < attacker.value {
            self.items[i] = self.items[i - 1];
            i -= 1;
        }
        self.items[i] = attacker;
        self.len += 1;
    }

    fn remove(&mut self, index: usize) -> Attacker {
        let attacker = self.items[index];
        self.items.copy_within(index + 1..self.len, index);
        self.len -= 1;
        attacker
    }
}

/// Attackers of one target square for both sides, kept current as pieces
/// leave the board. `occupied` always includes the target.
struct Exchange<'a> {
    board: &'a Board,
    values: &'a SeeValues,
    target: Square,
    occupied: Bitboard,
    seen: Bitboard,
    lists: [AttackerList; Color::COUNT],
}

impl<'a> Exchange<'a> {
    fn new(board: &'a Board, values: &'a SeeValues, target: Square, occupied: Bitboard) -> Self {
        let mut exchange = Exchange {
            board,
            values,
            target,
            occupied: occupied.with(target),
            seen: Bitboard::EMPTY,
            lists: [AttackerList::new(), AttackerList::new()],
        };
        exchange.collect();
        exchange
    }

    /// Add attackers not yet seen, which after a removal are the x-rays it revealed.
    fn collect(&mut self) {
        let fresh = self.board.attackers_to(self.target, self.occupied) & self.occupied & !self.seen;
        self.seen |= fresh;
        for square in fresh {
            let Some(piece) = self.board.piece_at(square) else {
                continue;
            };
            self.lists[piece.color().index()].insert(Attacker {
                value: self.values.value(piece.kind()),
                square,
                kind: piece.kind(),
            });
        }
    }

    /// Return `true` if the piece of `side` on `from` moving to the target
    /// would leave its king open to an enemy slider still on the board.
    fn exposes_king(&self, from: Square, side: Color) -> bool {
        let king = self.board.king_square(side);
        if king == from {
            return false;
        }
        let occupied = self.occupied.without(from);
        let enemy = self.board.side(side.flip()) & occupied.without(self.target);
        let orthogonal = rook_attacks(king, occupied) & self.board.orthogonal_sliders();
        let diagonal = bishop_attacks(king, occupied) & self.board.diagonal_sliders();
        ((orthogonal | diagonal) & enemy).is_nonempty()
    }

    /// Take the cheapest attacker of `side` that may capture right now. A king
    /// standing on the target may be taken by any attacker.
    fn next_capture(&mut self, side: Color, king_on_target: bool) -> Option<Attacker> {
        let list = &self.lists[side.index()];
        let index = (0..list.len)
            .rev()
            .find(|&i| king_on_target || !self.exposes_king(list.items[i].square, side))?;
        let attacker = self.lists[side.index()].remove(index);
        self.occupied = self.occupied.without(attacker.square);
        self.collect();
        Some(attacker)
    }

    fn promotes(&self, kind: PieceKind, side: Color) -> bool {
        kind == PieceKind::Pawn && self.target.relative_rank(side) == 7
    }

    /// Play out the recaptures after a first capture that gained `first_gain`
    /// and left a piece worth `on_target` standing on the target square.
    fn resolve(&mut self, mut side: Color, first_gain: i32, mut on_target: i32, mut king_on_target: bool) -> i32 {
        let mut gain = [0i32; MAX_DEPTH];
        gain[0] = first_gain;
        let mut depth = 0;

        while depth + 1 < MAX_DEPTH {
            let Some(attacker) = self.next_capture(side, king_on_target) else {
                break;
            };
            depth += 1;

            let promotes = self.promotes(attacker.kind, side);
            let bonus = if promotes { self.values.queen - self.values.pawn } else { 0 };
            gain[depth] = on_target + bonus - gain[depth - 1];
            if king_on_target {
                break;
            }

            on_target = if promotes { self.values.queen } else { attacker.value };
            king_on_target = attacker.kind == PieceKind::King;
            side = side.flip();
        }

        while depth > 0 {
            gain[depth - 1] = -((-gain[depth - 1]).max(gain[depth]));
            depth -= 1;
        }
        gain[0]
    }
}

/// Net material for the mover of playing `mv` and then trading optimally on
/// its destination, with the default piece values.
pub fn see_move(mv: Move, board: &Board) -> i32 {
    see_move_with(mv, board, &SeeValues::STANDARD)
}

/// [`see_move`] with explicit piece values.
pub fn see_move_with(mv: Move, board: &Board, values: &SeeValues) -> i32 {
    let us = board.side_to_move();
    let (from, to) = (mv.from(), mv.to());
    let Some(mover) = board.kind_at(from) else {
        debug_assert!(false, "see_move {mv}: no piece on {from}");
        return 0;
    };

    let mut occupied = board.occupied().without(from);
    let mut gain = match mv.kind() {
        MoveKind::Castling => return 0,
        MoveKind::EnPassant => {
            if let Some(victim) = to.backward(us) {
                occupied = occupied.without(victim);
            }
            values.pawn
        }
        MoveKind::Normal | MoveKind::Promotion => board.kind_at(to).map_or(0, |kind| values.value(kind)),
    };

    let on_target = match mv.promotion() {
        Some(piece) => {
            let promoted = values.value(piece.kind());
            gain += promoted - values.pawn;
            promoted
        }
        None => values.value(mover),
    };

    Exchange::new(board, values, to, occupied).resolve(us.flip(), gain, on_target, mover == PieceKind::King)
}

/// Value for `color` of opening a capture sequence on `square`.
///
/// The first capture is optional, so the result is never negative. Empty
/// squares and squares holding one of `color`'s own pieces score 0.
pub fn see_square(board: &Board, square: Square, color: Color) -> i32 {
    see_square_with(board, square, color, &SeeValues::STANDARD)
}

/// [`see_square`] with explicit piece values.
pub fn see_square_with(board: &Board, square: Square, color: Color, values: &SeeValues) -> i32 {
    let Some(victim) = board.piece_at(square) else {
        return 0;
    };
    if victim.color() == color {
        return 0;
    }

    let mut exchange = Exchange::new(board, values, square, board.occupied());
    let Some(first) = exchange.next_capture(color, victim.kind() == PieceKind::King) else {
        return 0;
    };

    let promotes = exchange.promotes(first.kind, color);
    let mut gain = values.value(victim.kind());
    let on_target = if promotes {
        gain += values.queen - values.pawn;
        values.queen
    } else {
        first.value
    };

    exchange
        .resolve(color.flip(), gain, on_target, first.kind == PieceKind::King)
        .max(0)
}

/// Return `true` if `see_move(mv, board) >= threshold`.
#[inline]
pub fn see_ge(mv: Move, board: &Board, threshold: i32) -> bool {
    see_move(mv, board) >= threshold
}

/// [`see_ge`] with explicit piece values.
#[inline]
pub fn see_ge_with(mv: Move, board: &Board, threshold: i32, values: &SeeValues) -> bool {
    see_move_with(mv, board, values) >= threshold
}
