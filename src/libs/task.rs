//! Task model and its lifecycle transitions.
//!
//! A task moves through `NotStarted -> InProgress -> Completed`, and may be
//! reopened. The completion timestamp is present exactly when the status is
//! `Completed`; every transition in this module keeps that true.

use super::category::DEFAULT_CATEGORY_ID;
use super::error::ValidationError;
use chrono::{Local, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "LOW" => Some(TaskPriority::Low),
            "MEDIUM" => Some(TaskPriority::Medium),
            "HIGH" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NOT_STARTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NOT_STARTED" => Some(TaskStatus::NotStarted),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "COMPLETED" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Assigned by the store on insert.
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    /// Either an existing category or [`DEFAULT_CATEGORY_ID`].
    pub category_id: i64,
    pub estimated_minutes: Option<u32>,
    pub due_at: Option<NaiveDateTime>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(title: &str) -> Self {
        Task {
            id: None,
            title: title.to_string(),
            description: None,
            category_id: DEFAULT_CATEGORY_ID,
            estimated_minutes: None,
            due_at: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            created_at: Local::now().naive_local(),
            completed_at: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_due(mut self, due_at: NaiveDateTime) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Checks the fields that can be verified without the store.
    ///
    /// `completed_at` must be present exactly when the status is completed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.is_completed() != self.completed_at.is_some() {
            return Err(ValidationError::InconsistentCompletion);
        }
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Marks the task completed at `now`.
    ///
    /// Completing an already completed task refreshes the timestamp; it never
    /// moves backwards even if the wall clock did.
    pub fn mark_completed(&mut self, now: NaiveDateTime) {
        let completed_at = match self.completed_at {
            Some(previous) if previous > now => previous,
            _ => now,
        };
        self.status = TaskStatus::Completed;
        self.completed_at = Some(completed_at);
    }

    /// Moves a not-started task into progress. Returns whether anything changed.
    pub fn mark_in_progress(&mut self) -> bool {
        if self.status == TaskStatus::NotStarted {
            self.status = TaskStatus::InProgress;
            return true;
        }
        false
    }

    pub fn reopen(&mut self) {
        self.status = TaskStatus::NotStarted;
        self.completed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_blank_title_is_rejected() {
        assert_eq!(Task::new("   ").validate(), Err(ValidationError::EmptyTitle));
        assert!(Task::new("Write report").validate().is_ok());
    }

    #[test]
    fn test_completion_time_must_match_status() {
        let mut task = Task::new("Review");
        task.status = TaskStatus::Completed;
        assert_eq!(task.validate(), Err(ValidationError::InconsistentCompletion));

        task.mark_completed(Local::now().naive_local());
        assert!(task.validate().is_ok());

        task.status = TaskStatus::InProgress;
        assert_eq!(task.validate(), Err(ValidationError::InconsistentCompletion));
    }

    #[test]
    fn test_completion_timestamp_never_moves_backwards() {
        let mut task = Task::new("Review");
        let later = Local::now().naive_local();
        let earlier = later - Duration::minutes(5);

        task.mark_completed(later);
        task.mark_completed(earlier);

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(later));
    }

    #[test]
    fn test_reopen_clears_completion() {
        let mut task = Task::new("Review");
        task.mark_completed(Local::now().naive_local());
        task.reopen();
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_in_progress_only_from_not_started() {
        let mut task = Task::new("Plan");
        assert!(task.mark_in_progress());
        assert!(!task.mark_in_progress());

        task.mark_completed(Local::now().naive_local());
        assert!(!task.mark_in_progress());
        assert_eq!(task.status, TaskStatus::Completed);
    }
}
