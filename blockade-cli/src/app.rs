use std::io;

use blockade_game::{
    board::{GameState, Move},
    Game,
};
use tracing::{debug, info};

use crate::ui::Ui;

/// Runs one match to completion: render, prompt, verify, apply, repeat.
/// Returns once the game is finished or the input stream runs dry.
pub fn run(game: &mut Game, ui: &mut impl Ui) -> io::Result<()> {
    ui.render(game)?;

    while game.is_ongoing() {
        let Some(line) = ui.read_move(game.turn)? else {
            info!("input closed, leaving the match unfinished");
            return Ok(());
        };
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("help") {
            ui.say(Move::SYNTAX)?;
            continue;
        }

        match game.verify_move_str(&line) {
            Ok(p_move) => {
                debug!(player = %game.turn, %line, "applying move");
                game.make_move(p_move);
                ui.render(game)?;
            }
            // the same player goes again; a bad line never costs the turn
            Err(e) => ui.say(&format!("Move error: {e}"))?,
        }
    }

    if let GameState::Finished(winner) = game.state {
        info!(%winner, "match finished");
        ui.say(&winner.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use blockade_game::{board::Winner, player::PlayerId};

    use super::*;

    #[derive(Default)]
    struct ScriptedUi {
        lines: VecDeque<&'static str>,
        renders: usize,
        said: Vec<String>,
    }

    impl ScriptedUi {
        fn new(lines: &[&'static str]) -> Self {
            Self {
                lines: lines.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Ui for ScriptedUi {
        fn render(&mut self, _game: &Game) -> io::Result<()> {
            self.renders += 1;
            Ok(())
        }

        fn read_move(&mut self, _player: PlayerId) -> io::Result<Option<String>> {
            Ok(self.lines.pop_front().map(str::to_owned))
        }

        fn say(&mut self, message: &str) -> io::Result<()> {
            self.said.push(message.to_owned());
            Ok(())
        }
    }

    #[test]
    fn plays_a_full_match() {
        let mut game = Game::new(2);
        let mut ui = ScriptedUi::new(&["A1", "B2", "B1", "A2"]);
        run(&mut game, &mut ui).unwrap();

        assert_eq!(game.state, GameState::Finished(Winner(Some(PlayerId::Two))));
        // the initial board plus one render per applied move
        assert_eq!(ui.renders, 5);
        assert_eq!(ui.said.last().map(String::as_str), Some("Player Two wins."));
    }

    #[test]
    fn rejected_input_does_not_cost_the_turn() {
        let mut game = Game::new(2);
        let mut ui = ScriptedUi::new(&["Z9", "A1"]);
        run(&mut game, &mut ui).unwrap();

        assert!(game.is_ongoing());
        assert_eq!(game.turn, PlayerId::Two);
        assert!(ui.said.iter().any(|m| m.contains("Column Z")));
    }

    #[test]
    fn end_of_input_quits_cleanly() {
        let mut game = Game::new(2);
        let mut ui = ScriptedUi::new(&[]);
        run(&mut game, &mut ui).unwrap();

        assert!(game.is_ongoing());
        assert_eq!(ui.renders, 1);
        assert!(ui.said.is_empty());
    }

    #[test]
    fn blank_lines_and_help_reprompt() {
        let mut game = Game::new(2);
        let mut ui = ScriptedUi::new(&["", "help", "A1"]);
        run(&mut game, &mut ui).unwrap();

        assert_eq!(game.turn, PlayerId::Two);
        assert_eq!(ui.said.first().map(String::as_str), Some(Move::SYNTAX));
    }

    #[test]
    fn resigning_ends_the_match() {
        let mut game = Game::new(8);
        let mut ui = ScriptedUi::new(&["quit"]);
        run(&mut game, &mut ui).unwrap();

        assert_eq!(game.state, GameState::Finished(Winner(Some(PlayerId::Two))));
        assert_eq!(ui.said.last().map(String::as_str), Some("Player Two wins."));
    }
}
