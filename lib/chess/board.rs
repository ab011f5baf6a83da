use crate::chess::{Color, Piece, Role, Snapshot, Square};
use crate::notation::{ParseTokenError, Token};
use crate::rules;
use derive_more::{Display, Error, From};
use std::{fmt, ops::Index};
use tracing::{debug, instrument, warn};

/// The 8x8 grid of cells indexed by `[row][col]`.
pub(crate) type Grid = [[Option<Piece>; 8]; 8];

/// Renders a [`Grid`] with rank 8 at the top.
pub(crate) fn render(cells: &Grid, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (row, cells) in cells.iter().enumerate().rev() {
        write!(f, "{} ", row + 1)?;
        for cell in cells {
            match cell {
                Some(p) => write!(f, " {}", p)?,
                None => write!(f, " .")?,
            }
        }
        writeln!(f)?;
    }

    write!(f, "   a b c d e f g h")
}

/// The reason why a [`Token`] could not be played.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum PlayTokenError {
    #[display(fmt = "malformed token")]
    Malformed(ParseTokenError),

    #[display(fmt = "no piece can play `{}`", _0)]
    NoCandidate(#[error(not(source))] Token),
}

/// The chess board.
///
/// Holds the pieces in an 8x8 grid along with the notation tokens interpreted so far.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    cells: Grid,
    history: Vec<String>,
    turn: Color,
}

/// The standard starting position.
impl Default for Board {
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for (col, role) in back.into_iter().enumerate() {
            for (row, role, color) in [
                (0, role, Color::White),
                (1, Pawn, Color::White),
                (6, Pawn, Color::Black),
                (7, role, Color::Black),
            ] {
                if let Some(sq) = Square::from_coords(row, col) {
                    board.place(role, color, sq);
                }
            }
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
            history: Vec::new(),
            turn: Color::White,
        }
    }

    /// The notation tokens interpreted so far.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The side to move according to the notation tokens consumed so far.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// An iterator over the pieces on the board in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().flatten().copied()
    }

    /// Places a new piece on a [`Square`], returning the previous occupant.
    pub fn place(&mut self, role: Role, color: Color, square: Square) -> Option<Piece> {
        self.cell_mut(square).replace(Piece::new(role, color, square))
    }

    /// Removes the piece on a [`Square`], if any.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.cell_mut(square).take()
    }

    /// Moves whatever occupies `whence` onto `whither`, returning the previous occupant of `whither`.
    ///
    /// This is a raw mutation, callers are responsible for checking legality.
    pub fn apply_raw(&mut self, whence: Square, whither: Square) -> Option<Piece> {
        let moved = self.remove(whence).map(|p| p.relocate(whither));
        std::mem::replace(self.cell_mut(whither), moved)
    }

    /// A disposable copy of this board with a single raw move applied.
    pub fn hypothetical(&self, whence: Square, whither: Square) -> Self {
        let mut board = Board {
            cells: self.cells,
            history: Vec::new(),
            turn: self.turn,
        };

        board.apply_raw(whence, whither);
        board
    }

    /// Overwrites the cells with the ones recorded in a [`Snapshot`].
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.cells = *snapshot.cells();
    }

    /// Resolves the squares a [`Token`] moves from and to, given the side to move.
    ///
    /// The first piece in row-major order that matches the token and can reach
    /// the destination is the mover. Castling resolves to `None`.
    pub fn resolve(&self, token: &Token) -> Result<Option<(Square, Square)>, PlayTokenError> {
        match *token {
            Token::Castle(_) => Ok(None),
            Token::Move {
                role,
                file,
                rank,
                whither,
                ..
            } => Square::iter()
                .filter(|sq| file.map_or(true, |f| sq.file() == f))
                .filter(|sq| rank.map_or(true, |r| sq.rank() == r))
                .find(|&sq| match self[sq] {
                    Some(p) if p.role() == role && p.color() == self.turn => {
                        rules::is_legal(p, sq, whither, self)
                    }
                    _ => false,
                })
                .map(|whence| Some((whence, whither)))
                .ok_or(PlayTokenError::NoCandidate(*token)),
        }
    }

    /// Interprets a token of the replay notation and applies it to the board.
    ///
    /// Castling tokens are accepted without moving any piece.
    /// Tokens that cannot be interpreted are skipped, leaving the pieces untouched.
    /// Either way the turn passes to the other side.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), ret)]
    pub fn interpret(&mut self, token: &str) -> bool {
        let result = token
            .parse::<Token>()
            .map_err(PlayTokenError::from)
            .and_then(|t| self.resolve(&t));

        self.turn = !self.turn;

        match result {
            Err(e) => {
                warn!(token, "skipping token, {}", e);
                false
            }

            Ok(squares) => {
                if let Some((whence, whither)) = squares {
                    debug!(%whence, %whither);
                    self.apply_raw(whence, whither);
                }

                self.history.push(token.to_string());
                true
            }
        }
    }

    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.cells[square.row()][square.col()]
    }

    pub(crate) fn cells(&self) -> &Grid {
        &self.cells
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square.row()][square.col()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(&self.cells, f)
    }
}
