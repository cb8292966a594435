use std::fmt;

use crate::ai::CancelToken;
use crate::error::MoveError;

use super::Player;

/// Outcome of a cancellable machine move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<B> {
    /// The search finished and produced the board after the chosen move.
    Moved(B),
    /// The caller raised the cancel token before the search finished.
    Cancelled,
}

impl<B> SearchOutcome<B> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchOutcome::Cancelled)
    }

    pub fn into_board(self) -> Option<B> {
        match self {
            SearchOutcome::Moved(board) => Some(board),
            SearchOutcome::Cancelled => None,
        }
    }
}

/// Capabilities every Kalah board implementation provides.
///
/// Pits are numbered from 1. The human owns pits `1..=pits_per_player()`
/// followed by their store; the computer owns the next `pits_per_player()`
/// pits followed by the computer store, which is the last index.
///
/// A board value is a snapshot: moves return a new board and never modify
/// the receiver. The search level is the only exception, since it configures
/// future searches rather than the position.
pub trait Board: Clone + fmt::Display + Send {
    /// The player who opened this game.
    fn opening_player(&self) -> Player;

    /// The player whose turn it is.
    fn next(&self) -> Player;

    /// Search depth used by [`Board::machine_move`].
    fn level(&self) -> usize;

    /// Change the search depth in place.
    fn set_level(&mut self, level: usize);

    fn pits_per_player(&self) -> usize;

    fn seeds_per_pit(&self) -> u32;

    /// Seeds in `pit`.
    ///
    /// # Panics
    ///
    /// Panics if `pit` is not a valid pit or store index.
    fn seeds(&self, pit: usize) -> u32;

    /// Seeds in the player's pits plus their store.
    fn seeds_of(&self, player: Player) -> Result<u32, MoveError>;

    /// True once one side has no seeds left outside its store.
    fn is_over(&self) -> bool;

    /// The winner of a finished game, `Player::Nobody` for a tie, or `None`
    /// while the game is still running.
    fn winner(&self) -> Option<Player> {
        if !self.is_over() {
            return None;
        }
        let human = self.seeds_of(Player::Human).ok()?;
        let computer = self.seeds_of(Player::Computer).ok()?;
        Some(match human.cmp(&computer) {
            std::cmp::Ordering::Greater => Player::Human,
            std::cmp::Ordering::Less => Player::Computer,
            std::cmp::Ordering::Equal => Player::Nobody,
        })
    }

    /// Sow the seeds of a human pit and return the resulting board.
    fn human_move(&self, pit: usize) -> Result<Self, MoveError>;

    /// Search for the computer's best move and return the resulting board.
    fn machine_move(&self, cancel: &CancelToken) -> Result<SearchOutcome<Self>, MoveError>;

    fn source_pit_of_last_move(&self) -> Option<usize>;

    fn target_pit_of_last_move(&self) -> Option<usize>;
}
