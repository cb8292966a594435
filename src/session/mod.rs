//! Game session plumbing for front ends: undo history, notifications, and a
//! background worker that plays the computer's turns.

mod notification;
#[allow(clippy::module_inception)]
mod session;
mod worker;

pub use notification::Notification;
pub use session::GameSession;
pub use worker::{MachineWorker, WorkerUpdate};
