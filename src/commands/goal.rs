use crate::{
    db::store::Store,
    libs::{
        config::Config,
        formatter::{percent, progress_bar},
        ledger::SessionLedger,
        messages::Message,
    },
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Args)]
pub struct GoalArgs {
    /// New daily goal in work sessions; shows progress when omitted
    goal: Option<u32>,
}

pub async fn cmd(args: GoalArgs) -> Result<()> {
    let mut config = Config::read()?;
    let mut pomodoro = config.pomodoro();

    if let Some(goal) = args.goal {
        pomodoro.daily_goal = goal;
        config.pomodoro = Some(pomodoro.clone());
        config.save()?;
        msg_success!(Message::DailyGoalSet(goal));
    }

    let progress = SessionLedger::new(Store::open_default()?).daily_progress(pomodoro.daily_goal).await?;
    msg_print!(format!(
        "{} {}",
        progress_bar(progress.ratio, BAR_WIDTH),
        Message::DailyProgress {
            completed: progress.completed,
            goal: progress.goal,
            percent: percent(progress.ratio),
        }
    ));
    if progress.is_reached() {
        msg_success!(Message::DailyGoalReached);
    }
    Ok(())
}
