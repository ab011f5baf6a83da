use crate::chess::{File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error, From};
use std::{fmt, str::FromStr};

/// A square on the chess board.
///
/// Board coordinates are `(row, col)`, where row 0 is rank `1` and column 0 is file `a`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square {
    rank: Rank,
    file: File,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    pub fn new(file: File, rank: Rank) -> Self {
        Square { rank, file }
    }

    /// Constructs [`Square`] from board coordinates, if on the board.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        Some(Square::new(File::from_index(col)?, Rank::from_index(row)?))
    }

    /// This square's [`File`].
    pub fn file(&self) -> File {
        self.file
    }

    /// This square's [`Rank`].
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// This square's board row.
    pub fn row(&self) -> usize {
        self.rank.index()
    }

    /// This square's board column.
    pub fn col(&self) -> usize {
        self.file.index()
    }

    /// The square displaced by some number of rows and columns, if still on the board.
    pub fn offset(&self, rows: i8, cols: i8) -> Option<Self> {
        let row = usize::try_from(self.row() as i8 + rows).ok()?;
        let col = usize::try_from(self.col() as i8 + cols).ok()?;
        Square::from_coords(row, col)
    }

    /// Returns an iterator over all [`Square`]s in row-major order, starting at `a1`.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Rank::iter().flat_map(|r| File::iter().map(move |f| Square::new(f, r)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file, f)?;
        fmt::Display::fmt(&self.rank, f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}
