//! Task management commands.
//!
//! ```bash
//! tomatobox task add "Write release notes" --priority high --estimate 50
//! tomatobox task list --open
//! tomatobox task done 3
//! ```

use crate::{
    db::{store::Store, tasks::TaskFilter},
    libs::{
        category::CategoryTree,
        ledger::SessionLedger,
        messages::Message,
        registry::TaskRegistry,
        task::{Task, TaskPriority, TaskStatus},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Add a new task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Category ID
        #[arg(short, long)]
        category: Option<i64>,
        #[arg(short, long, value_enum)]
        priority: Option<TaskPriority>,
        /// Estimated effort in minutes
        #[arg(short, long)]
        estimate: Option<u32>,
        /// Due date, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`
        #[arg(long, value_parser = parse_due)]
        due: Option<NaiveDateTime>,
    },
    /// List tasks
    List {
        /// Only tasks in this category
        #[arg(short, long)]
        category: Option<i64>,
        /// Hide completed tasks
        #[arg(short, long, conflicts_with = "completed")]
        open: bool,
        /// Only completed tasks
        #[arg(long)]
        completed: bool,
    },
    /// Show one task and the focus time spent on it
    Show { id: i64 },
    /// Edit a task. Prompts for title and description when no flags are given.
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<i64>,
        #[arg(short, long, value_enum)]
        priority: Option<TaskPriority>,
        #[arg(short, long)]
        estimate: Option<u32>,
        #[arg(long, value_parser = parse_due)]
        due: Option<NaiveDateTime>,
    },
    /// Mark a task completed
    Done { id: i64 },
    /// Mark a task in progress
    Start { id: i64 },
    /// Move a completed task back to not started
    Reopen { id: i64 },
    /// Delete a task
    Delete {
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let store = Store::open_default()?;
    let registry = TaskRegistry::new(store.clone());

    match args.command {
        TaskCommand::Add {
            title,
            description,
            category,
            priority,
            estimate,
            due,
        } => {
            let mut task = Task::new(&title);
            if let Some(description) = description {
                task = task.with_description(&description);
            }
            if let Some(category) = category {
                task = task.with_category(category);
            }
            if let Some(priority) = priority {
                task = task.with_priority(priority);
            }
            if let Some(minutes) = estimate {
                task = task.with_estimate(minutes);
            }
            if let Some(due) = due {
                task = task.with_due(due);
            }
            let task = registry.add(task).await?;
            msg_success!(Message::TaskCreated(task.id.unwrap_or_default()));
            Ok(())
        }
        TaskCommand::List { category, open, completed } => handle_list(store, category, open, completed).await,
        TaskCommand::Show { id } => handle_show(store, &registry, id).await,
        TaskCommand::Edit {
            id,
            title,
            description,
            category,
            priority,
            estimate,
            due,
        } => {
            let Some(mut task) = find(&registry, id).await? else {
                return Ok(());
            };
            let original = task.clone();

            if title.is_none() && description.is_none() && category.is_none() && priority.is_none() && estimate.is_none() && due.is_none() {
                prompt_edit(&mut task)?;
            } else {
                if let Some(title) = title {
                    task.title = title;
                }
                if let Some(description) = description {
                    task.description = Some(description).filter(|d| !d.trim().is_empty());
                }
                if let Some(category) = category {
                    task.category_id = category;
                }
                if let Some(priority) = priority {
                    task.priority = priority;
                }
                if estimate.is_some() {
                    task.estimated_minutes = estimate;
                }
                if due.is_some() {
                    task.due_at = due;
                }
            }

            if task == original {
                msg_info!(Message::NoChangesDetected);
                return Ok(());
            }
            registry.update(&task).await?;
            msg_success!(Message::TaskUpdated(task.title));
            Ok(())
        }
        TaskCommand::Done { id } => {
            if let Some(task) = find(&registry, id).await? {
                let task = registry.complete(&task).await?;
                msg_success!(Message::TaskCompleted(task.title));
            }
            Ok(())
        }
        TaskCommand::Start { id } => {
            if let Some(task) = find(&registry, id).await? {
                let task = registry.start(&task).await?;
                if task.status == TaskStatus::InProgress {
                    msg_success!(Message::TaskStarted(task.title));
                } else {
                    msg_info!(Message::NoChangesDetected);
                }
            }
            Ok(())
        }
        TaskCommand::Reopen { id } => {
            if let Some(task) = find(&registry, id).await? {
                let task = registry.reopen(&task).await?;
                msg_success!(Message::TaskReopened(task.title));
            }
            Ok(())
        }
        TaskCommand::Delete { id, yes } => {
            let Some(task) = find(&registry, id).await? else {
                return Ok(());
            };
            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
            registry.remove(id).await?;
            msg_success!(Message::TaskDeleted(id));
            Ok(())
        }
    }
}

async fn handle_list(store: Store, category: Option<i64>, open: bool, completed: bool) -> Result<()> {
    let filter = match (category, open, completed) {
        (Some(id), _, _) => TaskFilter::ByCategory(id),
        (None, true, _) => TaskFilter::Open,
        (None, _, true) => TaskFilter::ByStatus(TaskStatus::Completed),
        _ => TaskFilter::All,
    };
    let mut tasks = store.get_tasks(filter).await?;
    if category.is_some() && open {
        tasks.retain(|t| !t.is_completed());
    } else if category.is_some() && completed {
        tasks.retain(|t| t.is_completed());
    }

    if tasks.is_empty() {
        msg_info!(Message::NoTasks);
        return Ok(());
    }

    let categories = CategoryTree::new(store).all().await?;
    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks, &categories)?;
    Ok(())
}

async fn handle_show(store: Store, registry: &TaskRegistry, id: i64) -> Result<()> {
    let Some(task) = find(registry, id).await? else {
        return Ok(());
    };
    let categories = CategoryTree::new(store.clone()).all().await?;
    let ledger = SessionLedger::new(store);
    let minutes = ledger.focused_minutes_for_task(id).await?;
    let sessions = ledger.sessions_for_task(id).await?.into_iter().filter(|s| !s.is_break_session).count();

    msg_print!(Message::TaskDetailsHeader(task.title.clone()), true);
    View::task_details(&task, &categories)?;
    msg_print!(Message::TaskFocusedMinutes(minutes, sessions), true);
    Ok(())
}

/// Looks a task up, printing an error when it does not exist.
async fn find(registry: &TaskRegistry, id: i64) -> Result<Option<Task>> {
    let task = registry.get(id).await?;
    if task.is_none() {
        msg_error!(Message::TaskNotFound(id));
    }
    Ok(task)
}

fn prompt_edit(task: &mut Task) -> Result<()> {
    let theme = ColorfulTheme::default();
    task.title = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(task.title.clone())
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(task.description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    task.description = Some(description).filter(|d| !d.trim().is_empty());
    Ok(())
}

/// Accepts `YYYY-MM-DD HH:MM` or a bare date, which means the end of that day.
pub fn parse_due(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(at) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(at);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()))
        .map_err(|_| format!("invalid due date '{}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM", value))
}
