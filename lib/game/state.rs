use crate::chess::{Board, Snapshot};
use crate::notation;
use std::path::Path;
use tracing::{instrument, warn};

/// The live [`Board`] along with the moves of a game record to replay.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct GameState {
    board: Board,
    moves: Vec<String>,
    history: Vec<Snapshot>,
    cursor: usize,
}

impl GameState {
    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the live board.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The notation tokens of the game record to replay.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Installs the notation tokens of a game record to replay.
    pub fn load_moves<I>(&mut self, moves: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).collect();
    }

    /// Reads the game record to replay from a file.
    ///
    /// A missing or unreadable file results in an empty move list.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) {
        match notation::read(path) {
            Ok(moves) => self.moves = moves,
            Err(e) => {
                warn!(path = %path.display(), "failed to read the game record, {}", e);
                self.moves.clear();
            }
        }
    }

    /// Replaces the live board with a fresh one in the starting position.
    pub fn reset(&mut self) {
        self.board = Board::default();
    }

    /// Overwrites the cells of the live board with the ones in a [`Snapshot`].
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.board.restore(snapshot);
    }

    /// Interprets every move of the game record, recording a [`Snapshot`] after each.
    ///
    /// The history starts with the starting position and the live board is
    /// left in the starting position once done.
    #[instrument(level = "debug", skip(self), fields(moves = self.moves.len()))]
    pub fn replay(&mut self) -> &[Snapshot] {
        self.reset();
        self.history = vec![Snapshot::from(&self.board)];

        for token in &self.moves {
            self.board.interpret(token);
            self.history.push(Snapshot::from(&self.board));
        }

        self.reset();
        self.cursor = 0;
        &self.history
    }

    /// The snapshots recorded by the last [replay](`Self::replay`).
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// The index of the snapshot shown on the live board.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Shows the snapshot at `index` on the live board, if any.
    pub fn seek(&mut self, index: usize) -> Option<&Snapshot> {
        let snapshot = self.history.get(index)?;
        self.board.restore(snapshot);
        self.cursor = index;
        Some(snapshot)
    }

    /// Shows the next snapshot on the live board, if any.
    pub fn forward(&mut self) -> Option<&Snapshot> {
        self.seek(self.cursor + 1)
    }

    /// Shows the previous snapshot on the live board, if any.
    pub fn backward(&mut self) -> Option<&Snapshot> {
        self.seek(self.cursor.checked_sub(1)?)
    }
}
