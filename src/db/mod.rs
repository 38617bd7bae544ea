//! SQLite persistence for tasks, categories and work sessions.
//!
//! The repositories (`Tasks`, `Categories`, `Sessions`) borrow a connection and
//! run plain SQL. [`store::Store`] wraps a [`db::Db`] behind a shared lock and
//! exposes the repositories as async operations; everything above the db layer
//! goes through it.
//!
//! ```rust,no_run
//! use tomatobox::db::{db::Db, tasks::{TaskFilter, Tasks}};
//! use tomatobox::libs::task::Task;
//!
//! let db = Db::new()?;
//! let tasks = Tasks::new(&db.conn);
//! tasks.insert(&Task::new("Plan sprint"))?;
//! let open = tasks.fetch(TaskFilter::Open)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup and migration on open.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

pub mod categories;
pub mod sessions;
pub mod tasks;

/// Async, cloneable handle shared by every component.
pub mod store;
