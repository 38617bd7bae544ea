//! Work-session ledger and daily goal progress.
//!
//! The ledger writes one [`WorkSession`] per finished countdown and answers
//! "how many work sessions since T". "Today" is a rolling 24-hour window
//! ending now, not the calendar day: a session finished at 23:50 still counts
//! at 09:00 the next morning.

use super::error::{AppError, StorageError, ValidationError};
use super::session::WorkSession;
use crate::db::store::Store;
use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_DAILY_GOAL: u32 = 4;
pub const DAILY_WINDOW_HOURS: i64 = 24;

/// Progress toward the daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyProgress {
    /// Raw count of work sessions in the window; may exceed `goal`.
    pub completed: u32,
    pub goal: u32,
    /// `completed / goal`, clamped to `[0, 1]`. Zero when `goal` is zero.
    pub ratio: f64,
}

impl DailyProgress {
    pub fn new(completed: u32, goal: u32) -> Self {
        let ratio = if goal == 0 {
            0.0
        } else {
            (f64::from(completed) / f64::from(goal)).clamp(0.0, 1.0)
        };
        DailyProgress { completed, goal, ratio }
    }

    pub fn is_reached(&self) -> bool {
        self.goal > 0 && self.completed >= self.goal
    }
}

/// Start of the rolling "today" window relative to `now`.
pub fn window_start(now: NaiveDateTime) -> NaiveDateTime {
    now - Duration::hours(DAILY_WINDOW_HOURS)
}

/// Start of a window of `hours` ending at `now`, or `None` when it falls
/// outside the representable date range. Negative sizes count as zero.
pub fn hours_before(now: NaiveDateTime, hours: i64) -> Option<NaiveDateTime> {
    Duration::try_hours(hours.max(0)).and_then(|window| now.checked_sub_signed(window))
}

#[derive(Clone)]
pub struct SessionLedger {
    store: Store,
}

impl SessionLedger {
    pub fn new(store: Store) -> Self {
        SessionLedger { store }
    }

    /// Appends a session starting now and lasting `duration_minutes`.
    pub async fn record_session(&self, task_id: Option<i64>, duration_minutes: u32, is_break: bool) -> Result<WorkSession, AppError> {
        if duration_minutes == 0 {
            return Err(ValidationError::NonPositiveDuration.into());
        }
        let session = WorkSession::new(task_id, Local::now().naive_local(), duration_minutes, is_break);
        let stored = self.store.insert_session(&session).await?;
        debug!(?task_id, duration_minutes, is_break, "session recorded");
        Ok(stored)
    }

    /// Non-break sessions with `start_time >= window_start`.
    pub async fn completed_sessions_since(&self, window_start: NaiveDateTime) -> Result<u32, StorageError> {
        self.store.count_completed_work_sessions_since(window_start).await
    }

    /// Start of the current "today" window: 24 hours ago.
    pub fn today_window_start(&self) -> NaiveDateTime {
        window_start(Local::now().naive_local())
    }

    pub async fn completed_today(&self) -> Result<u32, StorageError> {
        self.completed_sessions_since(self.today_window_start()).await
    }

    pub async fn daily_progress(&self, goal: u32) -> Result<DailyProgress, StorageError> {
        Ok(DailyProgress::new(self.completed_today().await?, goal))
    }

    /// Every session of both kinds started at or after `since`, oldest first.
    pub async fn sessions_since(&self, since: NaiveDateTime) -> Result<Vec<WorkSession>, StorageError> {
        self.store.get_sessions_since(since).await
    }

    pub async fn sessions_for_task(&self, task_id: i64) -> Result<Vec<WorkSession>, StorageError> {
        self.store.get_sessions_for_task(task_id).await
    }

    /// Minutes of finished work sessions attributed to `task_id`.
    pub async fn focused_minutes_for_task(&self, task_id: i64) -> Result<u32, StorageError> {
        self.store.focus_minutes_for_task(task_id).await
    }
}
