//! Completion side effects: user notification and sound.
//!
//! Both collaborators are fire-and-forget. A notifier cannot fail; a sound
//! player may, and its error is logged and dropped by the caller.

use super::messages::Message;
use super::session::SessionMode;
use crate::msg_success;
use anyhow::Result;
use std::io::Write;

pub trait Notifier: Send + Sync {
    fn notify_completion(&self, mode: SessionMode);
}

pub trait SoundPlayer: Send + Sync {
    fn play_completion_sound(&self) -> Result<()>;
}

/// Prints a completion banner through the message macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_completion(&self, mode: SessionMode) {
        match mode {
            SessionMode::Work => msg_success!(Message::WorkSessionComplete, true),
            SessionMode::Break => msg_success!(Message::BreakComplete, true),
        }
    }
}

/// Rings the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play_completion_sound(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify_completion(&self, _mode: SessionMode) {}
}

impl SoundPlayer for Silent {
    fn play_completion_sound(&self) -> Result<()> {
        Ok(())
    }
}
