use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::ai::CancelToken;
use crate::game::{Board, Kalah, Player, SearchOutcome};

use super::Notification;

/// Granularity of the cancellable pause before a machine move.
const DELAY_SLICE: Duration = Duration::from_millis(10);

/// Updates sent from the machine worker thread to its owner.
#[derive(Debug, Clone)]
pub enum WorkerUpdate {
    /// The computer moved; this is the new board.
    Moved(Kalah),
    Notify(Notification),
    /// The worker has nothing more to send.
    Finished,
}

/// Plays the computer's turn on a background thread.
///
/// The worker keeps moving while the computer earns extra turns. Cancelling
/// (or dropping) the worker raises its token; a cancelled worker sends no
/// further boards.
pub struct MachineWorker {
    cancel: CancelToken,
    updates: mpsc::Receiver<WorkerUpdate>,
}

impl MachineWorker {
    pub fn spawn(board: Kalah, delay: Duration) -> Self {
        let cancel = CancelToken::new();
        let (tx, updates) = mpsc::channel();
        let token = cancel.clone();
        thread::spawn(move || play_turn(board, delay, &token, &tx));
        MachineWorker { cancel, updates }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Next pending update without blocking. `Finished` is also returned once
    /// the thread is gone.
    pub fn try_recv(&self) -> Option<WorkerUpdate> {
        match self.updates.try_recv() {
            Ok(update) => Some(update),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(WorkerUpdate::Finished),
        }
    }

    /// Wait up to `timeout` for the next update. `None` on timeout or once
    /// the thread has exited.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerUpdate> {
        self.updates.recv_timeout(timeout).ok()
    }
}

impl Drop for MachineWorker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn play_turn(board: Kalah, delay: Duration, cancel: &CancelToken, tx: &mpsc::Sender<WorkerUpdate>) {
    if let Some(end) = Notification::game_over(&board) {
        let _ = tx.send(WorkerUpdate::Notify(end));
        let _ = tx.send(WorkerUpdate::Finished);
        return;
    }
    if board.next() != Player::Computer {
        let _ = tx.send(WorkerUpdate::Notify(Notification::ComputerMiss));
        let _ = tx.send(WorkerUpdate::Finished);
        return;
    }

    let mut board = board;
    loop {
        if !pause(delay, cancel) {
            debug!("machine worker cancelled while waiting");
            return;
        }
        board = match board.machine_move(cancel) {
            Ok(SearchOutcome::Moved(next)) => next,
            Ok(SearchOutcome::Cancelled) => {
                debug!("machine worker cancelled during search");
                return;
            }
            Err(e) => {
                warn!("machine move rejected: {e}");
                let _ = tx.send(WorkerUpdate::Finished);
                return;
            }
        };
        if cancel.is_cancelled() || tx.send(WorkerUpdate::Moved(board.clone())).is_err() {
            return;
        }

        if let Some(end) = Notification::game_over(&board) {
            let _ = tx.send(WorkerUpdate::Notify(end));
            break;
        }
        if board.next() != Player::Computer {
            break;
        }
        let _ = tx.send(WorkerUpdate::Notify(Notification::HumanMiss));
    }
    let _ = tx.send(WorkerUpdate::Finished);
}

/// Sleep for `delay` unless cancelled first. Returns false on cancellation.
fn pause(delay: Duration, cancel: &CancelToken) -> bool {
    let deadline = Instant::now() + delay;
    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(DELAY_SLICE.min(deadline - now));
    }
}
