use crate::chess::{Color, Snapshot};
use crate::game::Outcome;
use crate::notation::MoveRecord;

/// Receives notifications from a [`Controller`][`crate::game::Controller`].
///
/// Implemented by whatever presents the game, e.g. a terminal.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// A move was applied to the board, which now looks like `snapshot`.
    fn on_move_applied(&mut self, record: &MoveRecord, snapshot: &Snapshot);

    /// The king of `side` is in check.
    fn on_check(&mut self, side: Color);

    /// The game is over.
    fn on_game_ended(&mut self, outcome: Outcome);

    /// A plain text status message.
    fn on_message(&mut self, text: &str);
}
