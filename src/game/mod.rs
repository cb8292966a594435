//! Core Kalah game logic: players, settings, the board contract and its
//! standard implementation with immutable transitions.

mod board;
mod kalah;
mod player;
mod settings;

pub use board::{Board, SearchOutcome};
pub use kalah::{Kalah, MoveEvent};
pub use player::Player;
pub use settings::GameSettings;
