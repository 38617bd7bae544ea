//! Configuration management for tomatobox.
//!
//! Settings live in `config.json` in the platform data directory (see
//! [`DataStorage`]). A missing file is not an error: every section falls back
//! to its defaults, so the application works with no setup at all.
//!
//! ## Configuration Structure
//!
//! The file holds one optional section per module. Today there is one:
//!
//! - **`pomodoro`** ([`PomodoroConfig`]): work and break lengths, the daily
//!   goal and whether to ring the bell on completion
//!
//! ```json
//! {
//!   "pomodoro": {
//!     "work_minutes": 25,
//!     "break_minutes": 5,
//!     "daily_goal": 4,
//!     "sound": true
//!   }
//! }
//! ```
//!
//! ## Defaults and Partial Files
//!
//! - **Missing file**: [`Config::read`] returns [`Config::default`]
//! - **Missing section**: [`Config::pomodoro`] fills in [`PomodoroConfig::default`]
//! - **Missing field**: `#[serde(default)]` takes that field from the defaults
//! - **Malformed JSON**: an error, never silently replaced
//!
//! Lengths are validated when they are turned into [`TimerDurations`], not
//! when the file is read, so a hand-edited zero surfaces as a
//! [`ValidationError`] at the moment a timer would use it.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use tomatobox::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! let mut pomodoro = config.pomodoro();
//! pomodoro.daily_goal = 6;
//! config.pomodoro = Some(pomodoro);
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::error::ValidationError;
use super::ledger::DEFAULT_DAILY_GOAL;
use super::timer::{TimerDurations, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Timer lengths, daily goal and completion sound.
///
/// Every field has a default, so any subset of them may appear in the file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PomodoroConfig {
    /// Length of a work session in minutes.
    pub work_minutes: u32,

    /// Length of a break in minutes.
    pub break_minutes: u32,

    /// Work sessions per rolling 24 hours the user aims for.
    pub daily_goal: u32,

    /// Ring the terminal bell when a countdown finishes.
    pub sound: bool,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        PomodoroConfig {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            daily_goal: DEFAULT_DAILY_GOAL,
            sound: true,
        }
    }
}

impl PomodoroConfig {
    /// Canonical timer lengths.
    ///
    /// ## Errors
    ///
    /// [`ValidationError::NonPositiveDuration`] when either length is zero.
    pub fn durations(&self) -> Result<TimerDurations, ValidationError> {
        TimerDurations::new(self.work_minutes, self.break_minutes)
    }
}

/// Root of `config.json`. Absent sections are left out when saving.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pomodoro: Option<PomodoroConfig>,
}

impl Config {
    /// Loads `config.json`, or the defaults when it does not exist yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the whole file as pretty-printed JSON, replacing what was there.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Effective Pomodoro settings, defaults filled in.
    pub fn pomodoro(&self) -> PomodoroConfig {
        self.pomodoro.clone().unwrap_or_default()
    }

    /// Interactive setup wizard.
    ///
    /// ## Flow
    ///
    /// 1. Reads the current file; an unreadable one counts as empty
    /// 2. Prompts for each Pomodoro field, offering the current value as the default
    /// 3. Rejects zero lengths at the prompt and asks again
    ///
    /// The result is returned, not saved. The caller decides whether to
    /// [`save`](Config::save) it.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.pomodoro();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModulePomodoro);
        let pomodoro = PomodoroConfig {
            work_minutes: Input::with_theme(&theme)
                .with_prompt(Message::PromptWorkMinutes.to_string())
                .default(default.work_minutes)
                .validate_with(|value: &u32| positive(*value))
                .interact_text()?,
            break_minutes: Input::with_theme(&theme)
                .with_prompt(Message::PromptBreakMinutes.to_string())
                .default(default.break_minutes)
                .validate_with(|value: &u32| positive(*value))
                .interact_text()?,
            daily_goal: Input::with_theme(&theme)
                .with_prompt(Message::PromptDailyGoal.to_string())
                .default(default.daily_goal)
                .interact_text()?,
            sound: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptSound.to_string())
                .default(default.sound)
                .interact()?,
        };

        config.pomodoro = Some(pomodoro);
        Ok(config)
    }
}

/// Prompt validator for lengths in minutes.
fn positive(value: u32) -> Result<(), String> {
    if value == 0 {
        Err(ValidationError::NonPositiveDuration.to_string())
    } else {
        Ok(())
    }
}
