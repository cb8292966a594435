use log::info;

use crate::config::{AppConfig, MachineConfig};
use crate::error::{ConfigError, MoveError};
use crate::game::{Board, GameSettings, Kalah, Player};

use super::worker::{MachineWorker, WorkerUpdate};
use super::Notification;

/// One game against the machine: the current board, the boards before each
/// human move (for undo), and the worker playing the computer's turns.
pub struct GameSession {
    board: Kalah,
    history: Vec<Kalah>,
    machine: MachineConfig,
    worker: Option<MachineWorker>,
}

impl GameSession {
    /// Start a game. If the computer opens, its turn starts right away.
    pub fn new(
        settings: GameSettings,
        opening_player: Player,
        machine: MachineConfig,
    ) -> Result<Self, ConfigError> {
        let mut session = GameSession {
            board: Kalah::new(settings, opening_player)?,
            history: Vec::new(),
            machine,
            worker: None,
        };
        session.start_if_computer_opens();
        Ok(session)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.game.settings(),
            config.game.opening_player,
            config.machine.clone(),
        )
    }

    pub fn board(&self) -> &Kalah {
        &self.board
    }

    /// True while the computer's turn is being played.
    pub fn is_thinking(&self) -> bool {
        self.worker.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Sow a human pit, then hand the turn to the machine worker. A rejected
    /// move leaves the session unchanged.
    pub fn human_move(&mut self, pit: usize) -> Result<(), MoveError> {
        let next = self.board.human_move(pit)?;
        self.stop_worker();
        info!("human sows pit {pit}");
        self.history.push(std::mem::replace(&mut self.board, next));
        self.start_machine_turn();
        Ok(())
    }

    /// Apply everything the worker reported since the last poll.
    pub fn poll(&mut self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        while let Some(update) = self.worker.as_ref().and_then(MachineWorker::try_recv) {
            match update {
                WorkerUpdate::Moved(mut board) => {
                    board.set_level(self.board.level());
                    info!(
                        "computer sows pit {:?}",
                        board.source_pit_of_last_move()
                    );
                    self.board = board;
                }
                WorkerUpdate::Notify(notification) => notifications.push(notification),
                WorkerUpdate::Finished => self.worker = None,
            }
        }
        notifications
    }

    /// Return to the board before the last human move. False if there is no
    /// history left.
    pub fn undo(&mut self) -> bool {
        let Some(mut previous) = self.history.pop() else {
            return false;
        };
        self.stop_worker();
        previous.set_level(self.board.level());
        self.board = previous;
        info!("undo, {} positions left", self.history.len());
        true
    }

    /// Start over with new settings and the same opening player.
    pub fn restart(&mut self, settings: GameSettings) -> Result<(), ConfigError> {
        let opening_player = self.board.opening_player();
        self.reset(Kalah::new(settings, opening_player)?);
        Ok(())
    }

    /// Start over on the same board geometry with the other player opening.
    pub fn switch_sides(&mut self, level: usize) -> Result<(), ConfigError> {
        let settings = GameSettings {
            level,
            ..self.board.settings()
        };
        let opening_player = self.board.opening_player().opposite();
        self.reset(Kalah::new(settings, opening_player)?);
        Ok(())
    }

    /// Change the search depth of the current game. Levels below 1 are
    /// raised to 1.
    pub fn set_level(&mut self, level: usize) {
        self.board.set_level(level.max(1));
    }

    fn reset(&mut self, board: Kalah) {
        self.stop_worker();
        self.history.clear();
        info!(
            "new game: {} pits, {} seeds, level {}, {} opens",
            board.pits_per_player(),
            board.seeds_per_pit(),
            board.level(),
            board.opening_player()
        );
        self.board = board;
        self.start_if_computer_opens();
    }

    fn start_if_computer_opens(&mut self) {
        if self.board.next() == Player::Computer {
            self.start_machine_turn();
        }
    }

    fn start_machine_turn(&mut self) {
        self.worker = Some(MachineWorker::spawn(
            self.board.clone(),
            self.machine.move_delay(),
        ));
    }

    /// Dropping the worker raises its cancel token and discards its channel,
    /// so nothing it computes afterwards reaches this session.
    fn stop_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel();
        }
    }
}
