//! # Kalah
//!
//! A Kalah (Mancala) engine with a machine opponent of configurable strength.
//! Boards are immutable values: every move returns a new board. The machine
//! player runs a depth-limited search that can be cancelled from another
//! thread. A terminal UI built with Ratatui drives a game session.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: player, settings, board contract, sowing rules
//! - [`ai`]: Heuristic evaluation, search, cancellation token
//! - [`session`]: Undo history, notifications, background machine worker
//! - [`ui`]: Terminal UI: game view and key handling
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod ui;
