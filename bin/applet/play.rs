use crate::terminal::Terminal;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::Square;
use lib::game::{Controller, GameState, Observer, Options, Phase};
use std::io::{stdin, stdout, Read, Write};
use std::path::Path;
use tracing::{instrument, warn};

/// Plays a game of chess on the terminal.
///
/// Squares are picked by name, e.g. `e2` then `e4`.
/// Type `new` to start over, `save` to save the game and `quit` to leave.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The game configuration.
    #[clap(short, long, default_value_t)]
    options: Options,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut terminal = Terminal::new(stdout(), stdin());
        session(&mut terminal, &self.options.games)
    }
}

/// Runs an interactive game until the input is exhausted or the player quits.
fn session<W: Write, R: Read>(terminal: &mut Terminal<W, R>, games: &Path) -> Result<(), Anyhow> {
    let mut state = GameState::default();
    let mut controller = Controller::new(&mut state, terminal);

    let board = controller.board().to_string();
    controller.observer_mut().print(board)?;

    loop {
        let question = match controller.phase() {
            Phase::AwaitingSelection => format!("{} to move", controller.turn()),
            Phase::PieceSelected(sq) => format!("{} selected, pick its destination", sq),
            Phase::GameOver(_) => "game over, type `new`, `save` or `quit`".to_string(),
        };

        let command = match controller.observer_mut().prompt(&question) {
            Ok(Some(command)) => command,
            Ok(None) => break Ok(()),
            Err(e) => break Err(e).context("failed to read the input"),
        };

        match command.as_str() {
            "" => continue,
            "quit" => break Ok(()),

            "new" => {
                controller.new_game();
                let board = controller.board().to_string();
                controller.observer_mut().print(board)?;
            }

            "save" => {
                if let Err(e) = controller.save(games) {
                    warn!("{}", e);
                }
            }

            s => match s.parse::<Square>() {
                Ok(sq) => {
                    controller.handle(sq);
                }

                Err(e) => {
                    let text = format!("`{}` is not a square, {}", s, e);
                    controller.observer_mut().on_message(&text);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run(input: &str, games: &Path) -> String {
        let mut output = Vec::new();
        let mut terminal = Terminal::new(&mut output, input.as_bytes());
        session(&mut terminal, games).unwrap();
        drop(terminal);
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn moves_are_echoed_as_records() {
        let output = run("e2\ne4\ne7\ne5\n", Path::new("unused"));
        assert!(output.contains("e2-e4"));
        assert!(output.contains("e7-e5"));
        assert!(output.contains("white to move"));
        assert!(output.contains("black to move"));
    }

    #[test]
    fn illegal_moves_are_silently_ignored() {
        let output = run("e2\ne5\nd2\nd4\nquit\n", Path::new("unused"));
        assert!(!output.contains("e2-e5"));
        assert!(output.contains("d2-d4"));
    }

    #[test]
    fn checkmate_ends_the_game() {
        let output = run("f2\nf3\ne7\ne5\ng2\ng4\nd8\nh4\ne2\n", Path::new("unused"));
        assert!(output.contains("Qd8-h4"));
        assert!(output.contains("checkmate by the black player"));
        assert!(output.contains("game over"));
    }

    #[test]
    fn invalid_squares_are_reported() {
        let output = run("z9\n", Path::new("unused"));
        assert!(output.contains("`z9` is not a square"));
    }

    #[test]
    fn games_can_be_saved() {
        let dir = std::env::temp_dir().join(format!("rulebook-play-{}", std::process::id()));
        let output = run("e2\ne4\nsave\n", &dir);
        assert!(output.contains("game saved to"));

        let saved: Vec<_> = fs::read_dir(&dir).unwrap().filter_map(Result::ok).collect();
        assert_eq!(saved.len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn saving_without_moves_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("rulebook-play-empty-{}", std::process::id()));
        let output = run("save\n", &dir);
        assert!(output.contains("no moves to save"));
        assert!(!dir.exists());
    }
}
