/// Chess domain types.
pub mod chess;
/// Game orchestration, replay and persistence.
pub mod game;
/// Move notations.
pub mod notation;
/// Move legality, check and checkmate.
pub mod rules;
