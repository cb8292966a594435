//! Terminal UI for playing Kalah against the machine.

mod app;
mod game_view;

pub use app::App;
