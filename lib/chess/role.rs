use std::fmt::{self, Formatter, Write};

/// The type of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Role {
    /// The capital letter that names this role in move notation.
    ///
    /// Pawns are not named, so this is `None` for [`Role::Pawn`].
    pub fn letter(&self) -> Option<char> {
        match self {
            Role::Pawn => None,
            Role::Knight => Some('N'),
            Role::Bishop => Some('B'),
            Role::Rook => Some('R'),
            Role::Queen => Some('Q'),
            Role::King => Some('K'),
        }
    }

    /// The role named by a capital letter in move notation, if any.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'N' => Some(Role::Knight),
            'B' => Some(Role::Bishop),
            'R' => Some(Role::Rook),
            'Q' => Some(Role::Queen),
            'K' => Some(Role::King),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Role::Pawn => f.write_char('p'),
            Role::Knight => f.write_char('n'),
            Role::Bishop => f.write_char('b'),
            Role::Rook => f.write_char('r'),
            Role::Queen => f.write_char('q'),
            Role::King => f.write_char('k'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn every_role_but_the_pawn_has_a_letter(#[filter(#r != Role::Pawn)] r: Role) {
        let letter = r.letter().unwrap();
        assert!(letter.is_ascii_uppercase());
        assert_eq!(Role::from_letter(letter), Some(r));
    }

    #[test]
    fn pawns_are_not_named() {
        assert_eq!(Role::Pawn.letter(), None);
        assert_eq!(Role::from_letter('P'), None);
    }
}
