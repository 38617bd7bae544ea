//! Console tables for tasks, categories and sessions.

use super::category::{flatten_tree, Category, DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME};
use super::formatter::{format_datetime, format_minutes, format_optional_datetime};
use super::session::WorkSession;
use super::task::Task;
use anyhow::Result;
use prettytable::{format, row, Table};
use std::collections::HashMap;

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task], categories: &[Category]) -> Result<()> {
        let names = category_names(categories);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.set_titles(row!["ID", "TITLE", "CATEGORY", "PRIORITY", "STATUS", "ESTIMATE", "DUE"]);
        for task in tasks {
            table.add_row(row![
                task.id.unwrap_or(0),
                task.title,
                category_label(&names, task.category_id),
                task.priority,
                task.status,
                task.estimated_minutes.map(|m| format!("{} min", m)).unwrap_or_default(),
                format_optional_datetime(task.due_at.as_ref()),
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Key/value listing of a single task.
    pub fn task_details(task: &Task, categories: &[Category]) -> Result<()> {
        let names = category_names(categories);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);

        table.add_row(row![b -> "ID", task.id.unwrap_or(0)]);
        table.add_row(row![b -> "Title", task.title]);
        table.add_row(row![b -> "Description", task.description.as_deref().unwrap_or("")]);
        table.add_row(row![b -> "Category", category_label(&names, task.category_id)]);
        table.add_row(row![b -> "Priority", task.priority]);
        table.add_row(row![b -> "Status", task.status]);
        table.add_row(row![
            b -> "Estimate",
            task.estimated_minutes.map(|m| format!("{} min", m)).unwrap_or_default()
        ]);
        table.add_row(row![b -> "Due", format_optional_datetime(task.due_at.as_ref())]);
        table.add_row(row![b -> "Created", format_datetime(&task.created_at)]);
        table.add_row(row![b -> "Completed", format_optional_datetime(task.completed_at.as_ref())]);
        table.printstd();

        Ok(())
    }

    /// Indented tree, children under their parents.
    pub fn categories(categories: &[Category]) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.set_titles(row!["ID", "NAME"]);
        table.add_row(row![DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME]);
        for node in flatten_tree(categories) {
            table.add_row(row![
                node.category.id.unwrap_or(0),
                format!("{}{}", "  ".repeat(node.depth), node.category.name)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn sessions(sessions: &[WorkSession], tasks: &[Task]) -> Result<()> {
        let titles: HashMap<i64, &str> = tasks.iter().filter_map(|t| t.id.map(|id| (id, t.title.as_str()))).collect();
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.set_titles(row!["ID", "START", "END", "MODE", "DURATION", "TASK"]);
        for session in sessions {
            let task = session
                .task_id
                .map(|id| titles.get(&id).map(|t| t.to_string()).unwrap_or_else(|| format!("#{}", id)))
                .unwrap_or_default();
            table.add_row(row![
                session.id.unwrap_or(0),
                format_datetime(&session.start_time),
                format_optional_datetime(session.end_time.as_ref()),
                session.mode(),
                format_minutes(session.duration),
                task,
            ]);
        }
        table.printstd();

        Ok(())
    }
}

fn category_names(categories: &[Category]) -> HashMap<i64, &str> {
    categories.iter().filter_map(|c| c.id.map(|id| (id, c.name.as_str()))).collect()
}

fn category_label(names: &HashMap<i64, &str>, id: i64) -> String {
    if id == DEFAULT_CATEGORY_ID {
        return DEFAULT_CATEGORY_NAME.to_string();
    }
    names.get(&id).map(|n| n.to_string()).unwrap_or_else(|| format!("#{}", id))
}
