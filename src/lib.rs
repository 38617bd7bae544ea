//! # tomatobox - a Pomodoro timer with a task list
//!
//! A command-line utility for running focused work sessions against a list
//! of tasks and tracking progress toward a daily goal.
//!
//! ## Features
//!
//! - **Timer**: work and break countdowns with pause, resume and mode switching
//! - **Session Ledger**: every finished countdown is recorded; work sessions in
//!   the last 24 hours count toward the daily goal
//! - **Tasks**: priorities, estimates, due dates and a simple status lifecycle
//! - **Categories**: nested categories for organizing tasks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tomatobox::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
