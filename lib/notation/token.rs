use crate::chess::{File, Rank, Role, Square};
use derive_more::{Display, Error};
use std::fmt::{self, Write};
use std::str::FromStr;

/// The side of the board a castling move is played towards.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Castling {
    #[display(fmt = "O-O")]
    Kingside,
    #[display(fmt = "O-O-O")]
    Queenside,
}

/// A move in the simplified [algebraic notation] of externally supplied game records.
///
/// Only the destination is known for sure, the piece that moves is resolved
/// against a [`Board`][`crate::chess::Board`], optionally helped by the
/// file and/or rank of its origin.
///
/// [algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Token {
    Move {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        whither: Square,
    },

    /// Castling is recognized, but never played.
    Castle(Castling),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Token::Castle(c) => fmt::Display::fmt(&c, f),
            Token::Move {
                role,
                file,
                rank,
                capture,
                whither,
            } => {
                if let Some(c) = role.letter() {
                    f.write_char(c)?;
                }

                if let Some(file) = file {
                    write!(f, "{}", file)?;
                }

                if let Some(rank) = rank {
                    write!(f, "{}", rank)?;
                }

                if capture {
                    f.write_char('x')?;
                }

                write!(f, "{}", whither)
            }
        }
    }
}

/// The reason why parsing [`Token`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse move token")]
pub struct ParseTokenError;

impl FromStr for Token {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_end_matches(|c: char| c == '+' || c == '#');

        match s {
            "O-O" => return Ok(Token::Castle(Castling::Kingside)),
            "O-O-O" => return Ok(Token::Castle(Castling::Queenside)),
            _ => {}
        }

        let mut chars: Vec<char> = s.chars().collect();

        let role = match chars.first() {
            Some(&c) if c.is_uppercase() => {
                chars.remove(0);
                Role::from_letter(c).ok_or(ParseTokenError)?
            }

            _ => Role::Pawn,
        };

        let capture = match chars.iter().filter(|&&c| c == 'x').count() {
            0 => false,
            1 => true,
            _ => return Err(ParseTokenError),
        };

        chars.retain(|&c| c != 'x');

        if !(2..=4).contains(&chars.len()) {
            return Err(ParseTokenError);
        }

        let (origin, destination) = chars.split_at(chars.len() - 2);
        let whither = Square::new(
            File::try_from(destination[0]).map_err(|_| ParseTokenError)?,
            Rank::try_from(destination[1]).map_err(|_| ParseTokenError)?,
        );

        let (mut file, mut rank) = (None, None);
        for &c in origin {
            if let Ok(f) = File::try_from(c) {
                if file.replace(f).is_some() {
                    return Err(ParseTokenError);
                }
            } else if let Ok(r) = Rank::try_from(c) {
                if rank.replace(r).is_some() {
                    return Err(ParseTokenError);
                }
            } else {
                return Err(ParseTokenError);
            }
        }

        Ok(Token::Move {
            role,
            file,
            rank,
            capture,
            whither,
        })
    }
}
