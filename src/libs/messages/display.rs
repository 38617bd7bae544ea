//! English text for every [`Message`].

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // Tasks
            Message::TaskCreated(id) => format!("Task #{} created", id),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskCompleted(title) => format!("Task '{}' completed", title),
            Message::TaskStarted(title) => format!("Task '{}' is now in progress", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskNotFound(id) => format!("Task #{} not found", id),
            Message::TasksHeader => "Tasks".to_string(),
            Message::NoTasks => "No tasks yet. Add one with `tomatobox task add <title>`".to_string(),
            Message::TaskDetailsHeader(title) => format!("Task: {}", title),
            Message::TaskFocusedMinutes(minutes, sessions) => format!("Focused {} min over {} work session(s)", minutes, sessions),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::NoChangesDetected => "No changes detected".to_string(),
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),

            // Categories
            Message::CategoryCreated(name, id) => format!("Category '{}' created with id {}", name, id),
            Message::CategoryRenamed(name) => format!("Category renamed to '{}'", name),
            Message::ConfirmDeleteCategory(id) => format!("Delete category #{}? Its tasks become uncategorized", id),
            Message::CategoryMoved(name) => format!("Category '{}' moved", name),
            Message::CategoryDeleted(id) => format!("Category #{} deleted; its tasks are now uncategorized", id),
            Message::CategoriesHeader => "Categories".to_string(),
            Message::NoCategories => "No categories yet".to_string(),

            // Timer
            Message::TimerStarted { mode, minutes } => format!("Starting {} session: {} min", mode, minutes),
            Message::TimerStartedForTask { mode, minutes, task } => format!("Starting {} session: {} min on '{}'", mode, minutes, task),
            Message::TimerRemaining(remaining) => format!("⏳ {} remaining", remaining),
            Message::TimerCancelled => "Timer cancelled, session not recorded".to_string(),
            Message::TimerInterruptHint => "Press Enter to pause or resume, Ctrl-C to cancel".to_string(),
            Message::TimerPaused(remaining) => format!("⏸ Paused with {} left", remaining),
            Message::TimerResumed(remaining) => format!("▶ Resumed with {} left", remaining),
            Message::WorkSessionComplete => "Work session complete. Time to take a break!".to_string(),
            Message::BreakComplete => "Break complete. Time to get back to work!".to_string(),
            Message::SessionRecorded(minutes) => format!("Recorded a {} min session", minutes),
            Message::SessionRecordFailed(error) => format!("Failed to record session: {}", error),
            Message::NextModeHint(command) => format!("Next up: {}", command),

            // Goal
            Message::DailyProgress { completed, goal, percent } => {
                format!("Daily goal: {} / {} sessions ({}%) in the last 24 hours", completed, goal, percent)
            }
            Message::DailyGoalReached => "Daily goal reached 🎯".to_string(),
            Message::DailyGoalSet(goal) => format!("Daily goal set to {} sessions", goal),
            Message::SessionsHeader(hours) => format!("Sessions in the last {} hours", hours),
            Message::NoSessions => "No sessions in this window".to_string(),
            Message::InvalidWindow(hours) => format!("A window of {} hours reaches outside the supported date range", hours),

            // Configuration
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults are in effect".to_string(),
            Message::ConfigModulePomodoro => "Pomodoro settings".to_string(),
            Message::PromptWorkMinutes => "Work session length (minutes)".to_string(),
            Message::PromptBreakMinutes => "Break length (minutes)".to_string(),
            Message::PromptDailyGoal => "Daily goal (work sessions)".to_string(),
            Message::PromptSound => "Ring the bell when a session ends?".to_string(),

            // Database
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),

            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", s)
    }
}
