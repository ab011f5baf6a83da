use crate::chess::board::{render, Grid};
use crate::chess::{Board, Piece, Square};
use std::{fmt, ops::Index};

/// An immutable copy of the pieces on a [`Board`] at one instant.
///
/// Pieces are values, so a snapshot never aliases the board it was taken from.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Snapshot {
    cells: Grid,
}

impl Snapshot {
    pub(crate) fn cells(&self) -> &Grid {
        &self.cells
    }
}

impl From<&Board> for Snapshot {
    fn from(board: &Board) -> Self {
        Snapshot {
            cells: *board.cells(),
        }
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Snapshot {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square.row()][square.col()]
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(&self.cells, f)
    }
}
