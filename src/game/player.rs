use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
    /// Absence of a player: the winner of a tied game.
    Nobody,
}

impl Player {
    /// Get the opposing player. `Nobody` is its own opposite.
    pub fn opposite(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
            Player::Nobody => Player::Nobody,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Human => "Human",
            Player::Computer => "Computer",
            Player::Nobody => "Nobody",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
