use crate::chess::Color;
use derive_more::Display;

/// How a game of chess ended.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    #[display(fmt = "checkmate by the {_0} player")]
    Checkmate(Color),

    #[display(fmt = "king captured by the {_0} player")]
    KingCapture(Color),
}

impl Outcome {
    /// The winning side.
    pub fn winner(&self) -> Color {
        match *self {
            Outcome::Checkmate(c) | Outcome::KingCapture(c) => c,
        }
    }

    /// Whether the game ended by a detected checkmate.
    pub fn is_checkmate(&self) -> bool {
        matches!(self, Outcome::Checkmate(_))
    }
}
