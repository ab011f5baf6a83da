use crate::chess::Color;
use crate::notation::MoveRecord;
use derive_more::{Constructor, Display, Error, From};
use humantime::format_rfc3339_seconds;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io, time::SystemTime};
use tracing::instrument;

/// The reason why a [`Scoresheet`] could not be saved.
#[derive(Debug, Display, Error, From)]
pub enum SaveError {
    #[display(fmt = "no moves to save")]
    #[from(ignore)]
    Empty,

    #[display(fmt = "failed to write the scoresheet")]
    Io(io::Error),
}

/// The written account of a game, as persisted to disk.
///
/// ```text
/// [Date: 2023-05-01T17:30:00Z]
///
/// 1. e2-e4 e7-e5
/// 2. Ng1-f3
/// 1-0
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Constructor)]
pub struct Scoresheet {
    date: SystemTime,
    records: Vec<MoveRecord>,
    winner: Option<Color>,
}

impl Scoresheet {
    /// The moves played, in order.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// The side that won the game, if it ended.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// The name of the file this scoresheet is saved to, e.g. `game_20230501_173000.txt`.
    pub fn file_name(&self) -> String {
        let digits: String = format_rfc3339_seconds(self.date)
            .to_string()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        let (date, time) = digits.split_at(digits.len().min(8));
        format!("game_{}_{}.txt", date, time)
    }

    /// Writes this scoresheet into a directory, returning the path of the file created.
    ///
    /// The directory is created if missing and the file appears atomically.
    #[instrument(level = "debug", skip(self), fields(moves = self.records.len()), ret, err)]
    pub fn save(&self, dir: &Path) -> Result<PathBuf, SaveError> {
        if self.records.is_empty() {
            return Err(SaveError::Empty);
        }

        fs::create_dir_all(dir)?;

        let name = self.file_name();
        let path = dir.join(&name);
        let part = dir.join(format!(".{}.part", name));

        let result = fs::write(&part, self.to_string()).and_then(|_| fs::rename(&part, &path));

        if let Err(e) = result {
            fs::remove_file(&part).ok();
            return Err(e.into());
        }

        Ok(path)
    }
}

impl fmt::Display for Scoresheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Date: {}]", format_rfc3339_seconds(self.date))?;
        writeln!(f)?;

        for (i, pair) in self.records.chunks(2).enumerate() {
            write!(f, "{}.", i + 1)?;
            for record in pair {
                write!(f, " {}", record)?;
            }
            writeln!(f)?;
        }

        match self.winner {
            Some(Color::White) => writeln!(f, "1-0"),
            Some(Color::Black) => writeln!(f, "0-1"),
            None => Ok(()),
        }
    }
}
