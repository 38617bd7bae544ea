use crate::{
    db::store::Store,
    libs::{
        config::Config,
        formatter::percent,
        ledger::{hours_before, SessionLedger},
        messages::Message,
        registry::TaskRegistry,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Window size in hours, ending now
    #[arg(long, default_value_t = 24)]
    hours: i64,
}

pub async fn cmd(args: SessionsArgs) -> Result<()> {
    let store = Store::open_default()?;
    let ledger = SessionLedger::new(store.clone());
    let mut registry = TaskRegistry::new(store);

    let Some(since) = hours_before(Local::now().naive_local(), args.hours) else {
        msg_bail_anyhow!(Message::InvalidWindow(args.hours));
    };
    let sessions = ledger.sessions_since(since).await?;
    if sessions.is_empty() {
        msg_info!(Message::NoSessions);
    } else {
        let tasks = registry.load().await?;
        msg_print!(Message::SessionsHeader(args.hours), true);
        View::sessions(&sessions, tasks)?;
    }

    let progress = ledger.daily_progress(Config::read()?.pomodoro().daily_goal).await?;
    msg_info!(Message::DailyProgress {
        completed: progress.completed,
        goal: progress.goal,
        percent: percent(progress.ratio),
    });
    Ok(())
}
