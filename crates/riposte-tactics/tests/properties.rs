//! Property-based tests over random legal playouts.

use proptest::prelude::*;
use rand::prelude::*;

use riposte_core::movegen::leaves_king_safe;
use riposte_core::{
    Board, Color, Move, MoveList, PieceKind, PromotionPiece, Square, generate_legal_moves,
    generate_pseudo_moves,
};
use riposte_tactics::{
    SeeValues, gen_quiet_checks, is_in_check, is_quiet, move_is_check, move_is_pseudo, pseudo_is_legal,
    quiet_is_pseudo, recog_draw, see_move, see_square,
};

const ROOTS: [&str; 5] = [
    riposte_core::STARTING_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

/// Play `plies` random legal moves from `root`, stopping early at mate or stalemate.
fn playout(root: &str, seed: u64, plies: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board: Board = root.parse().unwrap();
    let mut boards = vec![board];
    for _ in 0..plies {
        let moves = generate_legal_moves(&board);
        let Some(&mv) = moves.as_slice().choose(&mut rng) else {
            break;
        };
        board = board.apply(mv);
        boards.push(board);
    }
    boards
}

fn value(kind: PieceKind) -> i32 {
    SeeValues::default().value(kind)
}

/// Material won by the capture `mv` alone, promotion included.
fn capture_gain(board: &Board, mv: Move) -> i32 {
    let taken = if mv.is_en_passant() {
        value(PieceKind::Pawn)
    } else {
        board.kind_at(mv.to()).map_or(0, value)
    };
    taken + mv.promotion().map_or(0, |p| value(p.kind()) - value(PieceKind::Pawn))
}

/// Best result for the side to move of recapturing on `target` by playing
/// real legal moves, cheapest capturer first, with the option to stop.
///
/// Returns `None` when equally cheap recaptures lead to different results,
/// since the order among them is arbitrary.
fn best_recapture(board: &Board, target: Square) -> Option<i32> {
    let captures: Vec<Move> = generate_legal_moves(board)
        .iter()
        .copied()
        .filter(|mv| mv.to() == target && board.is_occupied(target))
        .filter(|mv| mv.promotion().is_none_or(|p| p == PromotionPiece::Queen))
        .collect();
    let capturer = |mv: &Move| board.kind_at(mv.from()).map_or(0, value);
    let Some(cheapest) = captures.iter().map(capturer).min() else {
        return Some(0);
    };

    let mut outcome = None;
    for &mv in captures.iter().filter(|mv| capturer(*mv) == cheapest) {
        let score = (capture_gain(board, mv) - best_recapture(&board.apply(mv), target)?).max(0);
        if outcome.is_some_and(|previous| previous != score) {
            return None;
        }
        outcome = Some(score);
    }
    outcome
}

fn root_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ROOTS.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// move_is_check agrees with playing the move out.
    #[test]
    fn prop_move_is_check_matches_apply(root in root_strategy(), seed in any::<u64>(), plies in 0..40usize) {
        for board in playout(root, seed, plies) {
            let them = board.side_to_move().flip();
            for &mv in &generate_legal_moves(&board) {
                prop_assert_eq!(
                    move_is_check(mv, &board),
                    is_in_check(&board.apply(mv), them),
                    "{} {}", board, mv
                );
            }
        }
    }

    /// The line-based legality test agrees with copy-make.
    #[test]
    fn prop_pseudo_is_legal_matches_copy_make(root in root_strategy(), seed in any::<u64>(), plies in 0..40usize) {
        for board in playout(root, seed, plies) {
            for &mv in &generate_pseudo_moves(&board) {
                prop_assert_eq!(pseudo_is_legal(mv, &board), leaves_king_safe(&board, mv), "{} {}", board, mv);
            }
        }
    }

    /// Quiet checks are exactly the legal non-captures that give check.
    #[test]
    fn prop_quiet_checks_match_brute_force(root in root_strategy(), seed in any::<u64>(), plies in 0..40usize) {
        for board in playout(root, seed, plies) {
            let legal = generate_legal_moves(&board);
            let mut list = MoveList::new();
            gen_quiet_checks(&mut list, &board);

            for &mv in &list {
                prop_assert!(legal.contains(mv), "{} illegal {}", board, mv);
                prop_assert!(is_quiet(mv, &board), "{} capture {}", board, mv);
                prop_assert!(move_is_check(mv, &board), "{} no check {}", board, mv);
            }

            let mut got: Vec<String> = list.iter().map(|mv| mv.to_string()).collect();
            let mut want: Vec<String> = legal
                .iter()
                .filter(|&&mv| is_quiet(mv, &board) && move_is_check(mv, &board))
                .map(|mv| mv.to_string())
                .collect();
            got.sort();
            want.sort();
            prop_assert_eq!(got, want, "{}", board);
        }
    }

    /// SEE depends only on the position, never on how it was reached.
    #[test]
    fn prop_see_is_history_independent(root in root_strategy(), seed in any::<u64>(), plies in 0..40usize) {
        for board in playout(root, seed, plies) {
            let reparsed: Board = board.to_string().parse().unwrap();
            for &mv in &generate_legal_moves(&board) {
                let see = see_move(mv, &board);
                prop_assert_eq!(see, see_move(mv, &board));
                prop_assert_eq!(see, see_move(mv, &reparsed));
            }
            for color in Color::ALL {
                for square in board.side(color.flip()) {
                    prop_assert!(see_square(&board, square, color) >= 0);
                }
            }
        }
    }

    /// SEE of every legal capture matches trading it out with real moves.
    #[test]
    fn prop_see_matches_played_out_exchange(root in root_strategy(), seed in any::<u64>(), plies in 0..40usize) {
        for board in playout(root, seed, plies) {
            for &mv in &generate_legal_moves(&board) {
                if is_quiet(mv, &board) {
                    continue;
                }
                if let Some(reply) = best_recapture(&board.apply(mv), mv.to()) {
                    prop_assert_eq!(see_move(mv, &board), capture_gain(&board, mv) - reply, "{} {}", board, mv);
                }
            }
        }
    }

    /// Moves carried over from the previous position are vetted exactly.
    #[test]
    fn prop_move_is_pseudo_vets_stale_moves(root in root_strategy(), seed in any::<u64>(), plies in 1..40usize) {
        let boards = playout(root, seed, plies);
        for pair in boards.windows(2) {
            let (before, board) = (&pair[0], &pair[1]);
            let pseudo = generate_pseudo_moves(board);
            let candidates = generate_pseudo_moves(before);
            for &mv in candidates.iter().chain(pseudo.iter()) {
                prop_assert_eq!(move_is_pseudo(mv, board), pseudo.contains(mv), "{} {}", board, mv);
                prop_assert_eq!(
                    quiet_is_pseudo(mv, board),
                    pseudo.contains(mv) && is_quiet(mv, board) && !mv.is_promotion(),
                    "{} {}", board, mv
                );
            }
        }
    }

    /// The draw recognizer is stable and never fires with mating material.
    #[test]
    fn prop_recog_draw_is_conservative(root in root_strategy(), seed in any::<u64>(), plies in 0..40usize) {
        for board in playout(root, seed, plies) {
            let draw = recog_draw(&board);
            prop_assert_eq!(draw, recog_draw(&board));
            let heavy = board.pieces(PieceKind::Pawn) | board.pieces(PieceKind::Rook) | board.pieces(PieceKind::Queen);
            if heavy.is_nonempty() {
                prop_assert!(!draw);
            }
        }
    }
}

#[test]
fn starting_position_neither_side_in_check() {
    let board = Board::starting_position();
    assert!(!is_in_check(&board, Color::White));
    assert!(!is_in_check(&board, Color::Black));
}
