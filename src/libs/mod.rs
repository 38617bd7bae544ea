//! Core library modules for tomatobox.
//!
//! - **Domain**: tasks, categories, work sessions
//! - **Timer**: the countdown state machine and the service that drives it
//! - **Ledger**: session recording and daily goal progress
//! - **Infrastructure**: configuration, data storage, errors, messages
//! - **Presentation**: table views and time formatting
//!
//! ```rust,no_run
//! use tomatobox::db::store::Store;
//! use tomatobox::libs::{registry::TaskRegistry, task::Task};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let registry = TaskRegistry::new(Store::open_default()?);
//! let task = registry.add(Task::new("Review pull request")).await?;
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod ledger;
pub mod messages;
pub mod metadata;
pub mod notify;
pub mod registry;
pub mod session;
pub mod task;
pub mod timer;
pub mod timer_service;
pub mod view;
