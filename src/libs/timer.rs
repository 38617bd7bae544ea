//! Pomodoro countdown state machine.
//!
//! The machine is purely synchronous: it never sleeps and never touches the
//! store. [`PomodoroTimer::tick`] is called once per elapsed second by whatever
//! drives it (the [`TimerService`](super::timer_service::TimerService) in
//! production, a plain loop in tests) and reports a [`Completion`] when the
//! countdown reaches zero.
//!
//! ## States
//!
//! ```text
//!            start()                      tick() x remaining
//!   Idle ─────────────▶ Running ──────────────────────────▶ Completed
//!    ▲  ◀── pause() ───   │                                    │
//!    │  ─── resume() ──▶  │                                    │
//!    └──────────────── switch_mode() (from any state) ◀────────┘
//! ```
//!
//! `remaining` is in whole seconds and never goes below zero.

use super::error::{StateError, ValidationError};
use super::session::SessionMode;
use serde::Serialize;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Canonical length of each mode, used by `switch_mode` and as the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerDurations {
    fn default() -> Self {
        TimerDurations {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerDurations {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Result<Self, ValidationError> {
        if work_minutes == 0 || break_minutes == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        Ok(TimerDurations { work_minutes, break_minutes })
    }

    pub fn minutes_for(&self, mode: SessionMode) -> u32 {
        match mode {
            SessionMode::Work => self.work_minutes,
            SessionMode::Break => self.break_minutes,
        }
    }

    /// Length of the next session: `requested` when given, otherwise the
    /// canonical length of `mode`. Zero is rejected.
    pub fn session_minutes(&self, mode: SessionMode, requested: Option<u32>) -> Result<u32, ValidationError> {
        match requested.unwrap_or_else(|| self.minutes_for(mode)) {
            0 => Err(ValidationError::NonPositiveDuration),
            minutes => Ok(minutes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimerState {
    Idle { remaining: u64, mode: SessionMode },
    Running { remaining: u64, mode: SessionMode },
    Completed { mode: SessionMode },
}

impl TimerState {
    pub fn mode(&self) -> SessionMode {
        match *self {
            TimerState::Idle { mode, .. } | TimerState::Running { mode, .. } | TimerState::Completed { mode } => mode,
        }
    }

    pub fn remaining(&self) -> u64 {
        match *self {
            TimerState::Idle { remaining, .. } | TimerState::Running { remaining, .. } => remaining,
            TimerState::Completed { .. } => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimerState::Idle { .. } => "idle",
            TimerState::Running { .. } => "running",
            TimerState::Completed { .. } => "completed",
        }
    }
}

/// Emitted when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub mode: SessionMode,
    /// Length originally requested by `start`, not the time since the last resume.
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running or had nothing left; nothing changed.
    Ignored,
    Ticked { remaining: u64 },
    Completed(Completion),
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    state: TimerState,
    durations: TimerDurations,
    requested_minutes: u32,
    elapsed_ticks: u64,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(TimerDurations::default())
    }
}

impl PomodoroTimer {
    pub fn new(durations: TimerDurations) -> Self {
        PomodoroTimer {
            state: TimerState::Idle {
                remaining: minutes_to_seconds(durations.work_minutes),
                mode: SessionMode::Work,
            },
            durations,
            requested_minutes: durations.work_minutes,
            elapsed_ticks: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    /// Minutes requested for the current (or last) countdown.
    pub fn requested_minutes(&self) -> u32 {
        self.requested_minutes
    }

    /// Total number of seconds ever counted down by this timer.
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Changes the canonical durations. The current countdown is left alone.
    pub fn set_durations(&mut self, durations: TimerDurations) {
        self.durations = durations;
    }

    /// Begins a fresh countdown, discarding whatever state came before.
    pub fn start(&mut self, mode: SessionMode, duration_minutes: u32) -> Result<(), ValidationError> {
        if duration_minutes == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        self.requested_minutes = duration_minutes;
        self.state = TimerState::Running {
            remaining: minutes_to_seconds(duration_minutes),
            mode,
        };
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), StateError> {
        match self.state {
            TimerState::Running { remaining, mode } => {
                self.state = TimerState::Idle { remaining, mode };
                Ok(())
            }
            other => Err(StateError::InvalidTransition {
                action: "pause",
                state: other.name(),
            }),
        }
    }

    pub fn resume(&mut self) -> Result<(), StateError> {
        match self.state {
            TimerState::Idle { remaining, mode } if remaining > 0 => {
                self.state = TimerState::Running { remaining, mode };
                Ok(())
            }
            other => Err(StateError::InvalidTransition {
                action: "resume",
                state: other.name(),
            }),
        }
    }

    /// Counts down one second.
    pub fn tick(&mut self) -> TickOutcome {
        let TimerState::Running { remaining, mode } = self.state else {
            return TickOutcome::Ignored;
        };
        if remaining == 0 {
            return TickOutcome::Ignored;
        }

        let remaining = remaining - 1;
        self.elapsed_ticks += 1;

        if remaining == 0 {
            self.state = TimerState::Completed { mode };
            return TickOutcome::Completed(Completion {
                mode,
                duration_minutes: self.requested_minutes,
            });
        }

        self.state = TimerState::Running { remaining, mode };
        TickOutcome::Ticked { remaining }
    }

    /// Flips between work and break and loads the canonical duration of the new mode.
    pub fn switch_mode(&mut self) -> SessionMode {
        let mode = self.state.mode().toggled();
        let minutes = self.durations.minutes_for(mode);
        self.requested_minutes = minutes;
        self.state = TimerState::Idle {
            remaining: minutes_to_seconds(minutes),
            mode,
        };
        mode
    }
}

fn minutes_to_seconds(minutes: u32) -> u64 {
    u64::from(minutes) * 60
}
