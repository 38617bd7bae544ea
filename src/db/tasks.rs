use crate::libs::error::StorageError;
use crate::libs::task::{Task, TaskPriority, TaskStatus};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Result, Row, ToSql};

const TASK_COLUMNS: &str = "id, title, description, category_id, estimated_minutes, due_at, priority, status, created_at, completed_at";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, category_id, estimated_minutes, due_at, priority, status, created_at, completed_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?1, description = ?2, category_id = ?3, estimated_minutes = ?4, due_at = ?5,
    priority = ?6, status = ?7, created_at = ?8, completed_at = ?9 WHERE id = ?10";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const REASSIGN_CATEGORY: &str = "UPDATE tasks SET category_id = ?2 WHERE category_id = ?1";

#[derive(Debug, Clone, PartialEq)]
pub enum TaskFilter {
    All,
    ByCategory(i64),
    ByStatus(TaskStatus),
    /// Everything that is not completed.
    Open,
}

impl ToSql for TaskPriority {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskPriority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        TaskPriority::from_name(name).ok_or_else(|| corrupt("priority", name))
    }
}

impl ToSql for TaskStatus {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        TaskStatus::from_name(name).ok_or_else(|| corrupt("status", name))
    }
}

fn corrupt(column: &'static str, value: &str) -> FromSqlError {
    FromSqlError::Other(Box::new(StorageError::Corrupt {
        column,
        value: value.to_string(),
    }))
}

fn row_to_task(row: &Row<'_>) -> Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category_id: row.get(3)?,
        estimated_minutes: row.get(4)?,
        due_at: row.get(5)?,
        priority: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
        completed_at: row.get(9)?,
    })
}

/// Task table operations over a borrowed connection.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Tasks { conn }
    }

    /// Inserts `task` and returns its new identifier. Any `id` on the input is ignored.
    pub fn insert(&self, task: &Task) -> Result<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![
                task.title,
                task.description,
                task.category_id,
                task.estimated_minutes,
                task.due_at,
                task.priority,
                task.status,
                task.created_at,
                task.completed_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replaces every column of the row with the same id. Returns rows affected.
    pub fn update(&self, id: i64, task: &Task) -> Result<usize> {
        self.conn.execute(
            UPDATE_TASK,
            params![
                task.title,
                task.description,
                task.category_id,
                task.estimated_minutes,
                task.due_at,
                task.priority,
                task.status,
                task.created_at,
                task.completed_at,
                id
            ],
        )
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        self.conn.execute(DELETE_TASK, params![id])
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(&format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS), params![id], row_to_task)
            .optional()
    }

    pub fn fetch(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let base = format!("SELECT {} FROM tasks", TASK_COLUMNS);
        let order = "ORDER BY id";
        let mut tasks = Vec::new();

        match filter {
            TaskFilter::All => {
                let mut stmt = self.conn.prepare(&format!("{} {}", base, order))?;
                for task in stmt.query_map([], row_to_task)? {
                    tasks.push(task?);
                }
            }
            TaskFilter::ByCategory(category_id) => {
                let mut stmt = self.conn.prepare(&format!("{} WHERE category_id = ?1 {}", base, order))?;
                for task in stmt.query_map(params![category_id], row_to_task)? {
                    tasks.push(task?);
                }
            }
            TaskFilter::ByStatus(status) => {
                let mut stmt = self.conn.prepare(&format!("{} WHERE status = ?1 {}", base, order))?;
                for task in stmt.query_map(params![status], row_to_task)? {
                    tasks.push(task?);
                }
            }
            TaskFilter::Open => {
                let mut stmt = self.conn.prepare(&format!("{} WHERE status != ?1 {}", base, order))?;
                for task in stmt.query_map(params![TaskStatus::Completed], row_to_task)? {
                    tasks.push(task?);
                }
            }
        }

        Ok(tasks)
    }

    /// Moves every task of `from` into `to`. Returns rows affected.
    pub fn reassign_category(&self, from: i64, to: i64) -> Result<usize> {
        self.conn.execute(REASSIGN_CATEGORY, params![from, to])
    }
}
