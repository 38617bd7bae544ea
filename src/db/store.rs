//! Async handle over the SQLite database.
//!
//! `Store` is the one object through which the ledger, registry and timer
//! service reach durable state. It is cheap to clone; every clone shares the
//! same connection. Operations run on tokio's blocking pool so callers on the
//! async runtime never stall on disk I/O.
//!
//! ```rust,no_run
//! use tomatobox::db::store::Store;
//! use tomatobox::libs::task::Task;
//!
//! # async fn demo() -> Result<(), tomatobox::libs::error::StorageError> {
//! let store = Store::open_in_memory()?;
//! let task = store.insert_task(&Task::new("Write the report")).await?;
//! assert!(task.id.is_some());
//! # Ok(())
//! # }
//! ```

use super::categories::Categories;
use super::db::Db;
use super::sessions::Sessions;
use super::tasks::{TaskFilter, Tasks};
use crate::libs::category::Category;
use crate::libs::error::StorageError;
use crate::libs::session::WorkSession;
use crate::libs::task::Task;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Store {
    db: Arc<Mutex<Db>>,
}

impl Store {
    /// Opens the database in the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::from_db(Db::open_in_memory()?))
    }

    fn from_db(db: Db) -> Self {
        Store { db: Arc::new(Mutex::new(db)) }
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db.lock();
            op(&guard.conn)
        })
        .await
        .map_err(|e| StorageError::Worker(e.to_string()))?
    }

    // Tasks

    /// Inserts `task` and returns it with its new identifier.
    pub async fn insert_task(&self, task: &Task) -> Result<Task, StorageError> {
        let mut task = task.clone();
        self.run(move |conn| {
            let id = Tasks::new(conn).insert(&task)?;
            task.id = Some(id);
            debug!(task_id = id, "task inserted");
            Ok(task)
        })
        .await
    }

    pub async fn update_task(&self, task: &Task) -> Result<(), StorageError> {
        let task = task.clone();
        let id = task.id.ok_or(StorageError::NotFound { entity: "task", id: 0 })?;
        self.run(move |conn| match Tasks::new(conn).update(id, &task)? {
            0 => Err(StorageError::NotFound { entity: "task", id }),
            _ => Ok(()),
        })
        .await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), StorageError> {
        self.run(move |conn| match Tasks::new(conn).delete(id)? {
            0 => Err(StorageError::NotFound { entity: "task", id }),
            _ => Ok(()),
        })
        .await
    }

    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, StorageError> {
        self.run(move |conn| Ok(Tasks::new(conn).get_by_id(id)?)).await
    }

    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, StorageError> {
        self.get_tasks(TaskFilter::All).await
    }

    pub async fn get_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, StorageError> {
        self.run(move |conn| Ok(Tasks::new(conn).fetch(filter)?)).await
    }

    // Categories

    pub async fn insert_category(&self, category: &Category) -> Result<Category, StorageError> {
        let mut category = category.clone();
        self.run(move |conn| {
            let id = Categories::new(conn).insert(&category)?;
            category.id = Some(id);
            Ok(category)
        })
        .await
    }

    pub async fn update_category(&self, category: &Category) -> Result<(), StorageError> {
        let category = category.clone();
        let id = category.id.ok_or(StorageError::NotFound { entity: "category", id: 0 })?;
        self.run(move |conn| match Categories::new(conn).update(id, &category)? {
            0 => Err(StorageError::NotFound { entity: "category", id }),
            _ => Ok(()),
        })
        .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), StorageError> {
        self.run(move |conn| match Categories::new(conn).delete(id)? {
            0 => Err(StorageError::NotFound { entity: "category", id }),
            _ => Ok(()),
        })
        .await
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, StorageError> {
        self.run(move |conn| Ok(Categories::new(conn).get_by_id(id)?)).await
    }

    pub async fn get_all_categories(&self) -> Result<Vec<Category>, StorageError> {
        self.run(|conn| Ok(Categories::new(conn).fetch_all()?)).await
    }

    pub async fn get_root_categories(&self) -> Result<Vec<Category>, StorageError> {
        self.run(|conn| Ok(Categories::new(conn).fetch_roots()?)).await
    }

    pub async fn get_subcategories(&self, parent_id: i64) -> Result<Vec<Category>, StorageError> {
        self.run(move |conn| Ok(Categories::new(conn).fetch_children(parent_id)?)).await
    }

    // Work sessions

    pub async fn insert_session(&self, session: &WorkSession) -> Result<WorkSession, StorageError> {
        let mut session = session.clone();
        self.run(move |conn| {
            let id = Sessions::new(conn).insert(&session)?;
            session.id = Some(id);
            debug!(session_id = id, is_break = session.is_break_session, "work session inserted");
            Ok(session)
        })
        .await
    }

    pub async fn delete_session(&self, id: i64) -> Result<(), StorageError> {
        self.run(move |conn| match Sessions::new(conn).delete(id)? {
            0 => Err(StorageError::NotFound { entity: "work session", id }),
            _ => Ok(()),
        })
        .await
    }

    pub async fn get_session(&self, id: i64) -> Result<Option<WorkSession>, StorageError> {
        self.run(move |conn| Ok(Sessions::new(conn).get_by_id(id)?)).await
    }

    pub async fn get_sessions_since(&self, since: NaiveDateTime) -> Result<Vec<WorkSession>, StorageError> {
        self.run(move |conn| Ok(Sessions::new(conn).fetch_since(since)?)).await
    }

    pub async fn get_sessions_for_task(&self, task_id: i64) -> Result<Vec<WorkSession>, StorageError> {
        self.run(move |conn| Ok(Sessions::new(conn).fetch_for_task(task_id)?)).await
    }

    pub async fn get_all_sessions(&self) -> Result<Vec<WorkSession>, StorageError> {
        self.run(|conn| Ok(Sessions::new(conn).fetch_all()?)).await
    }

    pub async fn count_completed_work_sessions_since(&self, since: NaiveDateTime) -> Result<u32, StorageError> {
        self.run(move |conn| Ok(Sessions::new(conn).count_completed_since(since)?)).await
    }

    pub async fn focus_minutes_for_task(&self, task_id: i64) -> Result<u32, StorageError> {
        self.run(move |conn| Ok(Sessions::new(conn).focus_minutes_for_task(task_id)?)).await
    }
}
