mod app;
mod ui;

use std::process::ExitCode;

use blockade_game::Game;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::TerminalUi;

/// Two players claim cells on a shrinking grid; every move walls off the
/// cell just left behind. Trap your opponent to win.
#[derive(Parser, Debug)]
#[command(name = "blockade", version)]
struct Args {
    /// Playable cells per side of the board.
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(2..=26))]
    size: u8,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut game = Game::new(args.size);
    let mut ui = TerminalUi::new();

    match app::run(&mut game, &mut ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
