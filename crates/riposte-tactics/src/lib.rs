//! Tactical support for riposte's search: check detection, quiet checks,
//! static exchange evaluation and dead-draw recognition.

pub mod check;
pub mod config;
pub mod quiet;
pub mod recog;
pub mod see;

use riposte_core::{Board, Color, Move, MoveList, Square};

pub use check::{
    is_in_check, move_is_check, move_is_pseudo, pinned, pseudo_is_legal, quiet_is_pseudo, slider_blockers,
};
pub use config::{ConfigError, TacticsConfig};
pub use quiet::{QuietPromotions, gen_quiet_checks, gen_quiet_checks_with, is_quiet};
pub use recog::recog_draw;
pub use see::{SeeValues, see_ge, see_move, see_square};

/// The tactical queries bundled with one configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tactics {
    config: TacticsConfig,
}

impl Tactics {
    /// Bundle the queries with `config`.
    pub fn new(config: TacticsConfig) -> Tactics {
        Tactics { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    /// Mutable access for `setoption`-style changes.
    pub fn config_mut(&mut self) -> &mut TacticsConfig {
        &mut self.config
    }

    /// See [`check::is_in_check`].
    #[inline]
    pub fn is_in_check(&self, board: &Board, color: Color) -> bool {
        check::is_in_check(board, color)
    }

    /// See [`check::move_is_check`].
    #[inline]
    pub fn move_is_check(&self, mv: Move, board: &Board) -> bool {
        check::move_is_check(mv, board)
    }

    /// See [`check::move_is_pseudo`].
    #[inline]
    pub fn move_is_pseudo(&self, mv: Move, board: &Board) -> bool {
        check::move_is_pseudo(mv, board)
    }

    /// See [`check::quiet_is_pseudo`].
    #[inline]
    pub fn quiet_is_pseudo(&self, mv: Move, board: &Board) -> bool {
        check::quiet_is_pseudo(mv, board)
    }

    /// See [`check::pseudo_is_legal`].
    #[inline]
    pub fn pseudo_is_legal(&self, mv: Move, board: &Board) -> bool {
        check::pseudo_is_legal(mv, board)
    }

    /// Append the quiet checking moves, honouring the promotion policy.
    pub fn gen_quiet_checks(&self, list: &mut MoveList, board: &Board) {
        quiet::gen_quiet_checks_with(list, board, self.config.quiet_promotions);
    }

    /// [`see::see_move`] with the configured piece values.
    pub fn see_move(&self, mv: Move, board: &Board) -> i32 {
        see::see_move_with(mv, board, &self.config.see_values)
    }

    /// [`see::see_square`] with the configured piece values.
    pub fn see_square(&self, board: &Board, square: Square, color: Color) -> i32 {
        see::see_square_with(board, square, color, &self.config.see_values)
    }

    /// [`see::see_ge`] with the configured piece values.
    pub fn see_ge(&self, mv: Move, board: &Board, threshold: i32) -> bool {
        see::see_ge_with(mv, board, threshold, &self.config.see_values)
    }

    /// See [`recog::recog_draw`].
    #[inline]
    pub fn recog_draw(&self, board: &Board) -> bool {
        recog::recog_draw(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_core::{PromotionPiece, Square};

    #[test]
    fn facade_uses_configured_values() {
        let mut tactics = Tactics::default();
        let board: Board = "4k3/8/2b5/3p4/8/8/8/3RK3 w - - 0 1".parse().unwrap();
        let mv = Move::new(Square::D1, Square::D5);
        assert_eq!(tactics.see_move(mv, &board), -400);

        tactics.config_mut().set_option("SeeValueRook", "600").unwrap();
        assert_eq!(tactics.see_move(mv, &board), -500);
        assert!(tactics.see_ge(mv, &board, -500));
        assert!(!tactics.see_ge(mv, &board, -499));
    }

    #[test]
    fn facade_honours_promotion_policy() {
        let board: Board = "1k6/3P4/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let queen = Move::new_promotion(Square::D7, Square::D8, PromotionPiece::Queen);

        let mut list = MoveList::new();
        Tactics::default().gen_quiet_checks(&mut list, &board);
        assert!(list.contains(queen));

        let mut config = TacticsConfig::default();
        config.quiet_promotions = QuietPromotions::Exclude;
        let mut list = MoveList::new();
        Tactics::new(config).gen_quiet_checks(&mut list, &board);
        assert!(list.is_empty());
    }

    #[test]
    fn facade_forwards_queries() {
        let tactics = Tactics::default();
        let board = Board::starting_position();
        assert!(!tactics.is_in_check(&board, Color::White));
        assert!(!tactics.recog_draw(&board));
        assert_eq!(tactics.see_square(&board, Square::E7, Color::White), 0);
        let mv = Move::new(Square::E2, Square::E4);
        assert!(tactics.pseudo_is_legal(mv, &board));
        assert!(tactics.move_is_pseudo(mv, &board));
        assert!(tactics.quiet_is_pseudo(mv, &board));
        assert!(!tactics.quiet_is_pseudo(Move::new(Square::E2, Square::E5), &board));
        assert!(!tactics.move_is_check(mv, &board));
    }
}
