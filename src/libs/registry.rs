//! In-memory projection of the stored task list.
//!
//! [`TaskRegistry::load`] is the only operation that touches the projection;
//! it replaces it wholesale. `add`, `update` and the status transitions write
//! straight through to the store and leave the projection as it was, so
//! [`TaskRegistry::tasks`] lags behind until the next `load`. Callers that
//! need to see their own writes must reload.

use super::category::DEFAULT_CATEGORY_ID;
use super::error::{AppError, StorageError, ValidationError};
use super::task::Task;
use crate::db::store::Store;
use chrono::Local;
use tracing::debug;

pub struct TaskRegistry {
    store: Store,
    tasks: Vec<Task>,
}

impl TaskRegistry {
    pub fn new(store: Store) -> Self {
        TaskRegistry { store, tasks: Vec::new() }
    }

    /// Replaces the projection with the store's full task list.
    pub async fn load(&mut self) -> Result<&[Task], StorageError> {
        self.tasks = self.store.get_all_tasks().await?;
        debug!(count = self.tasks.len(), "task registry loaded");
        Ok(&self.tasks)
    }

    /// Tasks as of the last `load`.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == Some(id))
    }

    /// Reads a task directly from the store, bypassing the projection.
    pub async fn get(&self, id: i64) -> Result<Option<Task>, StorageError> {
        self.store.get_task(id).await
    }

    /// Stores a new task and returns it with its identifier.
    pub async fn add(&self, task: Task) -> Result<Task, AppError> {
        task.validate()?;
        self.check_category(task.category_id).await?;
        Ok(self.store.insert_task(&task).await?)
    }

    /// Replaces the stored task with the same identifier.
    pub async fn update(&self, task: &Task) -> Result<(), AppError> {
        task.validate()?;
        if task.id.is_none() {
            return Err(ValidationError::MissingId { entity: "task" }.into());
        }
        self.check_category(task.category_id).await?;
        Ok(self.store.update_task(task).await?)
    }

    /// Marks the task completed now and persists it.
    ///
    /// Completing twice is allowed and refreshes `completed_at`.
    pub async fn complete(&self, task: &Task) -> Result<Task, AppError> {
        let mut task = task.clone();
        task.mark_completed(Local::now().naive_local());
        self.update(&task).await?;
        Ok(task)
    }

    /// Moves a not-started task into progress. Other statuses are returned unchanged.
    pub async fn start(&self, task: &Task) -> Result<Task, AppError> {
        let mut task = task.clone();
        if task.mark_in_progress() {
            self.update(&task).await?;
        }
        Ok(task)
    }

    pub async fn reopen(&self, task: &Task) -> Result<Task, AppError> {
        let mut task = task.clone();
        task.reopen();
        self.update(&task).await?;
        Ok(task)
    }

    pub async fn remove(&self, id: i64) -> Result<(), StorageError> {
        self.store.delete_task(id).await
    }

    async fn check_category(&self, category_id: i64) -> Result<(), AppError> {
        if category_id == DEFAULT_CATEGORY_ID {
            return Ok(());
        }
        match self.store.get_category(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownCategory(category_id).into()),
        }
    }
}
