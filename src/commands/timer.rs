//! Foreground Pomodoro countdown.
//!
//! Runs one work session (or a break with `--break`) in the terminal, showing
//! the remaining time. When the countdown finishes the session is recorded and
//! daily progress is printed.
//!
//! ## Controls
//!
//! - **Enter**: pause a running countdown, or resume a paused one
//! - **Ctrl-C**: stop the countdown without recording
//!
//! When stdin is closed (piped input, background jobs) only Ctrl-C is available.

use crate::{
    db::store::Store,
    libs::{
        config::Config,
        formatter::{format_remaining, percent},
        ledger::SessionLedger,
        messages::{macros::is_debug_mode, Message},
        notify::{ConsoleNotifier, Silent, SoundPlayer, TerminalBell},
        registry::TaskRegistry,
        session::SessionMode,
        timer_service::{TimerEvent, TimerService},
    },
    msg_debug, msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Args)]
pub struct TimerArgs {
    /// Run a break instead of a work session
    #[arg(short = 'b', long = "break")]
    rest: bool,

    /// Override the configured length
    #[arg(short, long)]
    minutes: Option<u32>,

    /// Attribute the session to a task; a not-started task is moved into progress
    #[arg(short, long)]
    task: Option<i64>,
}

pub async fn cmd(args: TimerArgs) -> Result<()> {
    let pomodoro = Config::read()?.pomodoro();
    let durations = pomodoro.durations()?;

    let store = Store::open_default()?;
    let ledger = SessionLedger::new(store.clone());
    let registry = TaskRegistry::new(store);

    let mode = if args.rest { SessionMode::Break } else { SessionMode::Work };
    let minutes = durations.session_minutes(mode, args.minutes)?;

    let task = match args.task {
        Some(id) => match registry.get(id).await? {
            Some(task) => Some(task),
            None => {
                msg_error!(Message::TaskNotFound(id));
                return Ok(());
            }
        },
        None => None,
    };

    let sound: Arc<dyn SoundPlayer> = if pomodoro.sound { Arc::new(TerminalBell) } else { Arc::new(Silent) };
    let service = TimerService::new(durations, ledger.clone(), Arc::new(ConsoleNotifier), sound);
    let mut events = service.subscribe();

    service.start(mode, minutes, task.as_ref().and_then(|t| t.id))?;
    let task = match task {
        Some(task) if mode == SessionMode::Work => Some(registry.start(&task).await?),
        other => other,
    };
    match &task {
        Some(task) => msg_print!(Message::TimerStartedForTask {
            mode: mode.to_string(),
            minutes,
            task: task.title.clone(),
        }),
        None => msg_print!(Message::TimerStarted {
            mode: mode.to_string(),
            minutes
        }),
    }
    msg_info!(Message::TimerInterruptHint);
    show_remaining(u64::from(minutes) * 60);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut keys = spawn_key_reader();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                service.cancel();
                finish_line();
                msg_warning!(Message::TimerCancelled);
                return Ok(());
            }
            key = keys.recv(), if stdin_open => match key {
                Some(()) => toggle(&service),
                None => stdin_open = false,
            },
            event = events.recv() => match event {
                Some(TimerEvent::Tick { remaining, .. }) => show_remaining(remaining),
                Some(TimerEvent::SessionRecorded(session)) => {
                    msg_success!(Message::SessionRecorded(session.duration));
                    break;
                }
                Some(TimerEvent::RecordFailed(error)) => {
                    msg_error!(Message::SessionRecordFailed(error));
                    break;
                }
                Some(TimerEvent::Completed(_)) => finish_line(),
                Some(_) => {}
                None => break,
            },
        }
    }

    if mode == SessionMode::Work {
        let progress = ledger.daily_progress(pomodoro.daily_goal).await?;
        msg_info!(Message::DailyProgress {
            completed: progress.completed,
            goal: progress.goal,
            percent: percent(progress.ratio),
        });
        if progress.is_reached() {
            msg_success!(Message::DailyGoalReached);
        }
    }

    let next = match mode.toggled() {
        SessionMode::Work => "tomatobox timer",
        SessionMode::Break => "tomatobox timer --break",
    };
    msg_print!(Message::NextModeHint(next.to_string()));
    Ok(())
}

fn show_remaining(remaining: u64) {
    if is_debug_mode() {
        if remaining % 60 == 0 {
            msg_debug!(Message::TimerRemaining(format_remaining(remaining)));
        }
        return;
    }
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "\r{}   ", Message::TimerRemaining(format_remaining(remaining)));
    let _ = stdout.flush();
}

/// Forwards each line read from stdin. Runs on a plain thread so a pending
/// read never holds up runtime shutdown.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

fn toggle(service: &TimerService) {
    match service.toggle_pause() {
        Ok(paused) => {
            let remaining = format_remaining(service.snapshot().state.remaining());
            if paused {
                msg_info!(Message::TimerPaused(remaining));
            } else {
                msg_info!(Message::TimerResumed(remaining));
            }
        }
        Err(e) => msg_debug!(e.to_string()),
    }
}

fn finish_line() {
    if !is_debug_mode() {
        println!();
    }
}
