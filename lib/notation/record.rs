use crate::chess::{Role, Square};
use derive_more::{Constructor, Display, Error};
use std::fmt::{self, Write};
use std::str::FromStr;

/// The record of a move played in a game, as persisted in a [`Scoresheet`][`crate::notation::Scoresheet`].
///
/// Unlike a [`Token`][`crate::notation::Token`], a record always names both the
/// origin and the destination, e.g. `e2-e4` or `Nb1xc3`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct MoveRecord {
    role: Role,
    whence: Square,
    capture: bool,
    whither: Square,
}

impl MoveRecord {
    /// The [`Role`] of the piece moved.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.whither
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.role.letter() {
            f.write_char(c)?;
        }

        let separator = if self.capture { 'x' } else { '-' };
        write!(f, "{}{}{}", self.whence, separator, self.whither)
    }
}

/// The reason why parsing [`MoveRecord`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse move record")]
pub struct ParseRecordError;

impl FromStr for MoveRecord {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (role, s) = match s.chars().next() {
            Some(c) if c.is_uppercase() => {
                let role = Role::from_letter(c).ok_or(ParseRecordError)?;
                (role, &s[c.len_utf8()..])
            }

            _ => (Role::Pawn, s),
        };

        let i = s
            .find(|c: char| c == '-' || c == 'x')
            .ok_or(ParseRecordError)?;
        let capture = s[i..].starts_with('x');

        Ok(MoveRecord {
            role,
            whence: s[..i].parse().map_err(|_| ParseRecordError)?,
            capture,
            whither: s[i + 1..].parse().map_err(|_| ParseRecordError)?,
        })
    }
}
