use crate::chess::{Board, Color, Role, Snapshot, Square};
use crate::game::{GameState, Observer, Outcome};
use crate::notation::{MoveRecord, SaveError, Scoresheet};
use crate::rules;
use std::{path::Path, time::SystemTime};
use tracing::{debug, instrument};

/// Where the [`Controller`] stands in the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Waiting for the side to move to pick one of its pieces.
    AwaitingSelection,

    /// The piece on this square was picked, waiting for its destination.
    PieceSelected(Square),

    /// The game is over, no more moves are accepted.
    GameOver(Outcome),
}

/// Drives a game of chess played by humans, one square at a time.
#[derive(Debug)]
pub struct Controller<'a, O: Observer> {
    state: &'a mut GameState,
    observer: &'a mut O,
    turn: Color,
    phase: Phase,
    records: Vec<MoveRecord>,
}

impl<'a, O: Observer> Controller<'a, O> {
    /// Starts a game on the live board of a [`GameState`].
    pub fn new(state: &'a mut GameState, observer: &'a mut O) -> Self {
        Controller {
            state,
            observer,
            turn: Color::White,
            phase: Phase::AwaitingSelection,
            records: Vec::new(),
        }
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The current [`Phase`].
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The [`Observer`] being notified.
    pub fn observer_mut(&mut self) -> &mut O {
        self.observer
    }

    /// The moves played so far.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Handles a square picked by the side to move.
    ///
    /// The first square selects one of its pieces, the second is the destination.
    /// Illegal moves silently clear the selection.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), ret)]
    pub fn handle(&mut self, square: Square) -> Phase {
        self.phase = match self.phase {
            Phase::GameOver(o) => Phase::GameOver(o),

            Phase::AwaitingSelection => match self.board()[square] {
                Some(p) if p.color() == self.turn => Phase::PieceSelected(square),
                _ => Phase::AwaitingSelection,
            },

            Phase::PieceSelected(whence) => self.play(whence, square),
        };

        self.phase
    }

    fn play(&mut self, whence: Square, whither: Square) -> Phase {
        let piece = match self.board()[whence] {
            Some(p) if rules::is_legal(p, whence, whither, self.board()) => p,
            _ => {
                debug!(%whence, %whither, "illegal move");
                return Phase::AwaitingSelection;
            }
        };

        let record = MoveRecord::new(
            piece.role(),
            whence,
            self.board()[whither].is_some(),
            whither,
        );

        let captured = self.state.board_mut().apply_raw(whence, whither);
        self.records.push(record);

        let snapshot = Snapshot::from(self.board());
        self.observer.on_move_applied(&record, &snapshot);

        if matches!(captured, Some(p) if p.role() == Role::King) {
            return self.end(Outcome::KingCapture(self.turn));
        }

        let opponent = !self.turn;
        if let Some(king) = rules::find_king(opponent, self.board()) {
            if rules::is_in_check(king, opponent, self.board()) {
                if rules::is_checkmate(opponent, self.board()) {
                    return self.end(Outcome::Checkmate(self.turn));
                }

                self.observer.on_check(opponent);
            }
        }

        self.turn = opponent;
        Phase::AwaitingSelection
    }

    fn end(&mut self, outcome: Outcome) -> Phase {
        self.observer.on_game_ended(outcome);
        Phase::GameOver(outcome)
    }

    /// Starts over from the starting position.
    pub fn new_game(&mut self) {
        self.state.reset();
        self.turn = Color::White;
        self.phase = Phase::AwaitingSelection;
        self.records.clear();
    }

    /// The [`Scoresheet`] of the game so far.
    ///
    /// Only checkmates credit a winner, king captures are left without a result.
    pub fn scoresheet(&self) -> Scoresheet {
        let winner = match self.phase {
            Phase::GameOver(o) if o.is_checkmate() => Some(o.winner()),
            _ => None,
        };

        Scoresheet::new(SystemTime::now(), self.records.clone(), winner)
    }

    /// Saves the [`Scoresheet`] into a directory and reports back to the [`Observer`].
    #[instrument(level = "debug", skip(self))]
    pub fn save(&mut self, dir: &Path) -> Result<(), SaveError> {
        match self.scoresheet().save(dir) {
            Ok(path) => {
                let text = format!("game saved to {}", path.display());
                self.observer.on_message(&text);
                Ok(())
            }

            Err(e @ SaveError::Empty) => {
                self.observer.on_message("there are no moves to save");
                Err(e)
            }

            Err(SaveError::Io(e)) => {
                let text = format!("failed to save the game: {}", e);
                self.observer.on_message(&text);
                Err(SaveError::Io(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MockObserver;
    use mockall::predicate::*;
    use std::fs;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn quiet() -> MockObserver {
        let mut observer = MockObserver::new();
        observer.expect_on_move_applied().return_const(());
        observer.expect_on_check().return_const(());
        observer.expect_on_game_ended().return_const(());
        observer.expect_on_message().return_const(());
        observer
    }

    fn play<O: Observer>(controller: &mut Controller<'_, O>, moves: &[(&str, &str)]) -> Phase {
        for &(whence, whither) in moves {
            controller.handle(sq(whence));
            controller.handle(sq(whither));
        }

        controller.phase()
    }

    #[test]
    fn game_starts_with_white_awaiting_selection() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        let controller = Controller::new(&mut state, &mut observer);

        assert_eq!(controller.turn(), Color::White);
        assert_eq!(controller.phase(), Phase::AwaitingSelection);
        assert!(controller.records().is_empty());
    }

    #[test]
    fn only_pieces_of_the_side_to_move_can_be_selected() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        let mut controller = Controller::new(&mut state, &mut observer);

        assert_eq!(controller.handle(sq("e7")), Phase::AwaitingSelection);
        assert_eq!(controller.handle(sq("e4")), Phase::AwaitingSelection);
        assert_eq!(controller.handle(sq("e2")), Phase::PieceSelected(sq("e2")));
    }

    #[test]
    fn illegal_move_clears_the_selection_without_touching_the_board() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        let mut controller = Controller::new(&mut state, &mut observer);

        controller.handle(sq("e2"));
        assert_eq!(controller.handle(sq("e5")), Phase::AwaitingSelection);
        assert_eq!(controller.board(), &Board::default());
        assert_eq!(controller.turn(), Color::White);
        assert!(controller.records().is_empty());
    }

    #[test]
    fn legal_move_is_applied_and_recorded() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();

        observer
            .expect_on_move_applied()
            .once()
            .withf(|r, s| r.to_string() == "e2-e4" && s[sq("e4")].is_some())
            .return_const(());

        let mut controller = Controller::new(&mut state, &mut observer);

        controller.handle(sq("e2"));
        assert_eq!(controller.handle(sq("e4")), Phase::AwaitingSelection);
        assert_eq!(controller.turn(), Color::Black);
        assert_eq!(controller.records()[0].to_string(), "e2-e4");
        assert!(controller.board()[sq("e2")].is_none());
    }

    #[test]
    fn captures_are_recorded_with_x() {
        let mut state = GameState::default();
        let mut observer = quiet();
        let mut controller = Controller::new(&mut state, &mut observer);

        play(&mut controller, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);

        let records: Vec<_> = controller.records().iter().map(|r| r.to_string()).collect();
        assert_eq!(records, ["e2-e4", "d7-d5", "e4xd5"]);
    }

    #[test]
    fn check_is_notified() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        observer.expect_on_move_applied().return_const(());
        observer
            .expect_on_check()
            .once()
            .with(eq(Color::Black))
            .return_const(());

        let mut controller = Controller::new(&mut state, &mut observer);

        let phase = play(
            &mut controller,
            &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")],
        );

        assert_eq!(phase, Phase::AwaitingSelection);
        assert_eq!(controller.turn(), Color::Black);
    }

    #[test]
    fn checkmate_ends_the_game_crediting_the_mover() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        observer.expect_on_move_applied().times(4).return_const(());
        observer.expect_on_check().never();
        observer
            .expect_on_game_ended()
            .once()
            .with(eq(Outcome::Checkmate(Color::Black)))
            .return_const(());

        let mut controller = Controller::new(&mut state, &mut observer);

        let phase = play(
            &mut controller,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );

        assert_eq!(phase, Phase::GameOver(Outcome::Checkmate(Color::Black)));
        assert_eq!(controller.records()[3].to_string(), "Qd8-h4");
        assert_eq!(controller.scoresheet().winner(), Some(Color::Black));
    }

    #[test]
    fn king_capture_ends_the_game_without_checkmate() {
        let mut state = GameState::default();

        {
            let board = state.board_mut();
            *board = Board::empty();
            board.place(Role::King, Color::White, sq("e1"));
            board.place(Role::Rook, Color::White, sq("e2"));
            board.place(Role::King, Color::Black, sq("e8"));
        }

        let mut observer = quiet();
        let mut controller = Controller::new(&mut state, &mut observer);

        let phase = play(&mut controller, &[("e2", "e8")]);

        assert_eq!(phase, Phase::GameOver(Outcome::KingCapture(Color::White)));
        assert_eq!(controller.records()[0].to_string(), "Re2xe8");
        assert_eq!(controller.scoresheet().winner(), None);
    }

    #[test]
    fn no_moves_are_accepted_once_the_game_is_over() {
        let mut state = GameState::default();
        let mut observer = quiet();
        let mut controller = Controller::new(&mut state, &mut observer);

        play(
            &mut controller,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );

        let board = controller.board().clone();
        let over = Phase::GameOver(Outcome::Checkmate(Color::Black));
        assert_eq!(controller.handle(sq("e2")), over);
        assert_eq!(controller.handle(sq("e4")), over);
        assert_eq!(controller.board(), &board);
    }

    #[test]
    fn new_game_starts_over() {
        let mut state = GameState::default();
        let mut observer = quiet();
        let mut controller = Controller::new(&mut state, &mut observer);

        play(&mut controller, &[("e2", "e4")]);
        controller.new_game();

        assert_eq!(controller.board(), &Board::default());
        assert_eq!(controller.turn(), Color::White);
        assert_eq!(controller.phase(), Phase::AwaitingSelection);
        assert!(controller.records().is_empty());
    }

    #[test]
    fn saving_without_moves_reports_a_message() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        observer
            .expect_on_message()
            .once()
            .withf(|text| text.contains("no moves"))
            .return_const(());

        let mut controller = Controller::new(&mut state, &mut observer);
        let dir = std::env::temp_dir().join("rulebook-controller-empty");

        assert!(matches!(controller.save(&dir), Err(SaveError::Empty)));
    }

    #[test]
    fn saving_writes_the_scoresheet_and_reports_its_path() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        observer.expect_on_move_applied().return_const(());
        observer
            .expect_on_message()
            .once()
            .withf(|text| text.starts_with("game saved to"))
            .return_const(());

        let mut controller = Controller::new(&mut state, &mut observer);
        play(&mut controller, &[("e2", "e4"), ("e7", "e5")]);

        let dir = std::env::temp_dir().join(format!("rulebook-controller-{}", std::process::id()));
        assert!(controller.save(&dir).is_ok());

        let files: Vec<_> = fs::read_dir(&dir).unwrap().filter_map(Result::ok).collect();
        assert_eq!(files.len(), 1);

        let text = fs::read_to_string(files[0].path()).unwrap();
        assert!(text.contains("1. e2-e4 e7-e5"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn saving_into_a_regular_file_reports_the_failure() {
        let mut state = GameState::default();
        let mut observer = MockObserver::new();
        observer.expect_on_move_applied().return_const(());
        observer
            .expect_on_message()
            .once()
            .withf(|text| text.starts_with("failed to save the game"))
            .return_const(());

        let mut controller = Controller::new(&mut state, &mut observer);
        play(&mut controller, &[("e2", "e4")]);

        let parent = std::env::temp_dir().join(format!("rulebook-blocked-{}", std::process::id()));
        fs::create_dir_all(&parent).unwrap();
        let file = parent.join("games");
        fs::write(&file, "").unwrap();

        assert!(matches!(controller.save(&file), Err(SaveError::Io(_))));

        let names: Vec<_> = fs::read_dir(&parent)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["games"]);
        fs::remove_dir_all(&parent).unwrap();
    }
}
