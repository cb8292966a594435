use crate::game::{Board, Player};

/// Events a front end announces to the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// The computer landed in its store and moves again.
    HumanMiss,
    /// The human landed in their store and moves again.
    ComputerMiss,
    HumanWin,
    ComputerWin,
    Tie,
    /// The human asked for a move the rules do not allow.
    IllegalMove,
}

impl Notification {
    /// The end-of-game notification for `board`, if the game is over.
    pub fn game_over<B: Board>(board: &B) -> Option<Notification> {
        match board.winner()? {
            Player::Human => Some(Notification::HumanWin),
            Player::Computer => Some(Notification::ComputerWin),
            Player::Nobody => Some(Notification::Tie),
        }
    }

    pub fn is_game_over(self) -> bool {
        matches!(
            self,
            Notification::HumanWin | Notification::ComputerWin | Notification::Tie
        )
    }

    /// Text shown to the human, with seed totals taken from `board`.
    pub fn message<B: Board>(self, board: &B) -> String {
        let human = board.seeds_of(Player::Human).unwrap_or(0);
        let computer = board.seeds_of(Player::Computer).unwrap_or(0);
        match self {
            Notification::HumanMiss => "You must miss a turn.".to_string(),
            Notification::ComputerMiss => "Computer must miss a turn.".to_string(),
            Notification::HumanWin => format!(
                "You won with {human} seeds versus {computer} seeds of the machine."
            ),
            Notification::ComputerWin => {
                format!("Machine wins with {computer} seeds versus your {human}.")
            }
            Notification::Tie => format!("Nobody wins. Tie with {human} for each player."),
            Notification::IllegalMove => "Illegal move!".to_string(),
        }
    }
}
