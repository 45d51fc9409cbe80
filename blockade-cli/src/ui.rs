use std::io::{self, BufRead, Write};

use blockade_game::{player::PlayerId, Game};

/// The seam between the game loop and the outside world, so tests can play
/// a scripted match without a terminal.
pub trait Ui {
    /// Draws the current board.
    fn render(&mut self, game: &Game) -> io::Result<()>;
    /// Prompts `player` for a move. `None` means the input stream is done.
    fn read_move(&mut self, player: PlayerId) -> io::Result<Option<String>>;
    /// One line of feedback: move errors, help, the final outcome.
    fn say(&mut self, message: &str) -> io::Result<()>;
}

pub struct TerminalUi;

impl TerminalUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for TerminalUi {
    fn render(&mut self, game: &Game) -> io::Result<()> {
        println!("\n{}", game.grid());
        Ok(())
    }

    fn read_move(&mut self, player: PlayerId) -> io::Result<Option<String>> {
        print!("[{player}] Where would you like to move to?: ");
        io::stdout().flush()?;

        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        Ok((read > 0).then(|| buf.trim().to_owned()))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        println!("{message}");
        Ok(())
    }
}
