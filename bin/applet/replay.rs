use crate::terminal::Terminal;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::game::{GameState, Options};
use std::io::{empty, stdout, Read, Write};
use std::path::PathBuf;
use tracing::instrument;

/// Replays a game record, printing the board after every move.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Replay {
    /// The game configuration.
    #[clap(short, long, default_value_t)]
    options: Options,

    /// Only print the board after this many moves.
    #[clap(short, long)]
    at: Option<usize>,

    /// The game record to replay, overrides the configuration.
    record: Option<PathBuf>,
}

impl Replay {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut state = GameState::default();
        state.load(self.record.as_deref().unwrap_or(self.options.replay.as_path()));
        state.replay();

        let mut terminal = Terminal::new(stdout(), empty());
        print(&mut state, self.at, &mut terminal)?;
        Ok(terminal.flush()?)
    }
}

fn print<W: Write, R: Read>(
    state: &mut GameState,
    at: Option<usize>,
    terminal: &mut Terminal<W, R>,
) -> Result<(), Anyhow> {
    let indices: Vec<usize> = match at {
        Some(i) => vec![i],
        None => (0..state.history().len()).collect(),
    };

    for i in indices {
        let label = match i.checked_sub(1).and_then(|m| state.moves().get(m)) {
            None => "starting position".to_string(),
            Some(token) => format!("{}. {}", (i + 1) / 2, token),
        };

        match state.seek(i) {
            None => anyhow::bail!("the game has only {} moves", state.moves().len()),
            Some(snapshot) => {
                let board = snapshot.to_string();
                terminal.print(label)?;
                terminal.print(board)?;
            }
        }
    }

    Ok(())
}
