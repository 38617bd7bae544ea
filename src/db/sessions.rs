use crate::libs::session::WorkSession;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const SELECT_SESSIONS: &str = "SELECT id, task_id, start_time, end_time, is_break_session, duration FROM work_sessions";
const INSERT_SESSION: &str = "INSERT INTO work_sessions (task_id, start_time, end_time, is_break_session, duration) VALUES (?1, ?2, ?3, ?4, ?5)";
const DELETE_SESSION: &str = "DELETE FROM work_sessions WHERE id = ?1";
const COUNT_COMPLETED_SINCE: &str = "SELECT COUNT(*) FROM work_sessions WHERE is_break_session = 0 AND start_time >= ?1";
const FOCUS_MINUTES_FOR_TASK: &str = "SELECT COALESCE(SUM(duration), 0) FROM work_sessions WHERE is_break_session = 0 AND task_id = ?1";

fn row_to_session(row: &Row<'_>) -> Result<WorkSession> {
    Ok(WorkSession {
        id: row.get(0)?,
        task_id: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        is_break_session: row.get(4)?,
        duration: row.get(5)?,
    })
}

pub struct Sessions<'a> {
    conn: &'a Connection,
}

impl<'a> Sessions<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Sessions { conn }
    }

    pub fn insert(&self, session: &WorkSession) -> Result<i64> {
        self.conn.execute(
            INSERT_SESSION,
            params![session.task_id, session.start_time, session.end_time, session.is_break_session, session.duration],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        self.conn.execute(DELETE_SESSION, params![id])
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<WorkSession>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_SESSIONS), params![id], row_to_session)
            .optional()
    }

    /// Sessions of both kinds that started at or after `since`, oldest first.
    pub fn fetch_since(&self, since: NaiveDateTime) -> Result<Vec<WorkSession>> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE start_time >= ?1 ORDER BY start_time", SELECT_SESSIONS))?;
        let sessions = stmt.query_map(params![since], row_to_session)?.collect::<Result<Vec<_>>>()?;
        Ok(sessions)
    }

    pub fn fetch_for_task(&self, task_id: i64) -> Result<Vec<WorkSession>> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE task_id = ?1 ORDER BY start_time", SELECT_SESSIONS))?;
        let sessions = stmt.query_map(params![task_id], row_to_session)?.collect::<Result<Vec<_>>>()?;
        Ok(sessions)
    }

    /// Every session, newest first.
    pub fn fetch_all(&self) -> Result<Vec<WorkSession>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY start_time DESC", SELECT_SESSIONS))?;
        let sessions = stmt.query_map([], row_to_session)?.collect::<Result<Vec<_>>>()?;
        Ok(sessions)
    }

    pub fn count_completed_since(&self, since: NaiveDateTime) -> Result<u32> {
        self.conn.query_row(COUNT_COMPLETED_SINCE, params![since], |row| row.get(0))
    }

    pub fn focus_minutes_for_task(&self, task_id: i64) -> Result<u32> {
        self.conn.query_row(FOCUS_MINUTES_FOR_TASK, params![task_id], |row| row.get(0))
    }
}
