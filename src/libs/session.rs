//! Work session records and the timer mode they were produced in.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the Pomodoro cycle a countdown belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionMode {
    Work,
    Break,
}

impl SessionMode {
    pub fn toggled(self) -> Self {
        match self {
            SessionMode::Work => SessionMode::Break,
            SessionMode::Break => SessionMode::Work,
        }
    }

    pub fn is_break(self) -> bool {
        self == SessionMode::Break
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Work => f.write_str("work"),
            SessionMode::Break => f.write_str("break"),
        }
    }
}

/// One finished countdown. Non-break sessions count toward the daily goal.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkSession {
    pub id: Option<i64>,
    pub task_id: Option<i64>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub is_break_session: bool,
    /// Requested length in minutes.
    pub duration: u32,
}

impl WorkSession {
    /// Builds a session that starts at `start_time` and lasts `duration` minutes.
    pub fn new(task_id: Option<i64>, start_time: NaiveDateTime, duration: u32, is_break_session: bool) -> Self {
        WorkSession {
            id: None,
            task_id,
            start_time,
            end_time: Some(start_time + Duration::minutes(i64::from(duration))),
            is_break_session,
            duration,
        }
    }

    pub fn mode(&self) -> SessionMode {
        if self.is_break_session {
            SessionMode::Break
        } else {
            SessionMode::Work
        }
    }
}
