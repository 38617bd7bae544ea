//! Typed errors for the timer, ledger, registry and store.
//!
//! Three families, none of them fatal:
//!
//! - [`ValidationError`]: bad input rejected before the store is touched
//! - [`StorageError`]: a read or write against the store failed
//! - [`StateError`]: a timer operation was called in the wrong state
//!
//! Component APIs return [`AppError`], which wraps all three. The command
//! layer converts into `anyhow::Error` like every other failure.

use thiserror::Error;

/// Input rejected before it reaches the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("category name cannot be empty")]
    EmptyCategoryName,

    #[error("duration must be a positive number of minutes")]
    NonPositiveDuration,

    #[error("category {0} does not exist")]
    UnknownCategory(i64),

    #[error("category {category} cannot be moved under {parent}: it would become its own ancestor")]
    CategoryCycle { category: i64, parent: i64 },

    #[error("{entity} has no identifier; store it first")]
    MissingId { entity: &'static str },

    #[error("completion time must be set exactly when the task is completed")]
    InconsistentCompletion,
}

/// Failure of a store operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to run store operation: {0}")]
    Worker(String),

    #[error("failed to open database: {0}")]
    Open(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("unexpected value '{value}' in column {column}")]
    Corrupt { column: &'static str, value: String },
}

/// A timer operation that is not valid in the current state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("cannot {action} while the timer is {state}")]
    InvalidTransition { action: &'static str, state: &'static str },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
