use crate::chess::{Color, Role, Square};
use std::fmt::{self, Write};

/// A chess [piece][`Role`] of a certain [`Color`].
///
/// Pieces are plain values that remember the [`Square`] they were last placed on.
/// The board grid is authoritative, the square is only kept for display purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    role: Role,
    color: Color,
    square: Square,
}

impl Piece {
    /// Constructs [`Piece`] placed on a [`Square`].
    pub fn new(role: Role, color: Color, square: Square) -> Self {
        Piece {
            role,
            color,
            square,
        }
    }

    /// This piece's [`Role`].
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Color`].
    pub fn color(&self) -> Color {
        self.color
    }

    /// The [`Square`] this piece was last placed on.
    pub fn square(&self) -> Square {
        self.square
    }

    /// The label of the square this piece was last placed on, e.g. `"e4"`.
    pub fn label(&self) -> String {
        self.square.to_string()
    }

    /// This piece placed on another [`Square`].
    pub fn relocate(self, square: Square) -> Self {
        Piece { square, ..self }
    }
}

/// Prints the piece as a single letter, uppercase for white and lowercase for black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.role.letter().unwrap_or('P');
        match self.color {
            Color::White => f.write_char(c),
            Color::Black => f.write_char(c.to_ascii_lowercase()),
        }
    }
}
