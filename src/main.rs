use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use riposte_core::{Board, Color, MoveList, attacks, generate_legal_moves};
use riposte_tactics::{Tactics, TacticsConfig, is_quiet};

/// Usage: `riposte [FEN] [name=value ...]`
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    attacks::init();
    info!("riposte starting");

    let mut fen = None;
    let mut config = TacticsConfig::default();
    for arg in std::env::args().skip(1) {
        if arg.contains('=') {
            config
                .set_pair(&arg)
                .with_context(|| format!("bad option `{arg}`"))?;
        } else if fen.is_none() {
            fen = Some(arg);
        } else {
            anyhow::bail!("unexpected argument `{arg}`");
        }
    }

    let board = match fen {
        Some(fen) => fen
            .parse::<Board>()
            .with_context(|| format!("failed to parse FEN `{fen}`"))?,
        None => Board::starting_position(),
    };
    debug!(%board, "position loaded");

    report(&board, &Tactics::new(config));
    Ok(())
}

fn report(board: &Board, tactics: &Tactics) {
    println!("{}", board.pretty());
    println!("fen: {board}");

    for color in Color::ALL {
        let status = if tactics.is_in_check(board, color) { "in check" } else { "not in check" };
        println!("{color}: {status}");
    }

    let mut checks = MoveList::new();
    tactics.gen_quiet_checks(&mut checks, board);
    let checks: Vec<String> = checks.iter().map(|mv| mv.to_string()).collect();
    println!("quiet checks ({}): {}", checks.len(), checks.join(" "));

    let legal = generate_legal_moves(board);
    let captures: Vec<_> = legal.iter().copied().filter(|&mv| !is_quiet(mv, board)).collect();
    println!("captures ({}):", captures.len());
    for mv in captures {
        let check = if tactics.move_is_check(mv, board) { " +" } else { "" };
        println!("  {mv}{check} see {}", tactics.see_move(mv, board));
    }

    let draw = if tactics.recog_draw(board) { "dead draw" } else { "mate still possible" };
    println!("material: {draw}");
}
