//! Printing macros with debug-mode routing.
//!
//! Every user-facing line in tomatobox goes through one of these macros. They
//! take anything that implements `Display`, normally a [`Message`] variant,
//! and decide at runtime whether it becomes a plain terminal line or a
//! `tracing` event.
//!
//! [`Message`]: crate::libs::messages::Message
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either environment variable is present:
//! - **`TOMATOBOX_DEBUG`**: application-specific switch
//! - **`RUST_LOG`**: standard filter, also read by the subscriber in `main`
//!
//! The check runs once per process and is cached in a `OnceLock`.
//!
//! ## Output Routing
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Macro Call    │    │  Debug Mode?    │    │   Output        │
//! │   msg_info!()   │───▶│  (cached)       │───▶│                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │
//!                 ┌───────────────┴───────────────┐
//!                 ▼                               ▼
//!       ┌─────────────────┐             ┌─────────────────┐
//!       │ yes: tracing    │             │ no: println! /  │
//!       │ info!/warn!/... │             │ eprintln!       │
//!       └─────────────────┘             └─────────────────┘
//! ```
//!
//! ## Macro Categories
//!
//! ### Display Macros
//! - **`msg_print!`**: plain line, no prefix
//! - **`msg_success!`**: ✅ prefix
//! - **`msg_info!`**: ℹ️ prefix
//! - **`msg_warning!`**: ⚠️ prefix
//!
//! Passing `true` as a second argument surrounds the line with blank lines,
//! which the list commands use for headers.
//!
//! ### Error Macros
//! - **`msg_error!`**: ❌ prefix, written to stderr outside debug mode
//! - **`msg_error_anyhow!`**: builds an `anyhow::Error` with the same prefix
//! - **`msg_bail_anyhow!`**: returns that error from the enclosing function
//!
//! ### Debug Macros
//! - **`msg_debug!`**: 🔍 prefix, dropped entirely outside debug mode
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use tomatobox::{msg_error, msg_info, msg_success};
//! use tomatobox::libs::messages::Message;
//!
//! msg_success!(Message::TaskCreated(1));
//! msg_info!(Message::TimerInterruptHint);
//! msg_error!(Message::TaskNotFound(42), true);
//! ```
//!
//! ### Error Handling
//!
//! ```rust,no_run
//! use tomatobox::msg_bail_anyhow;
//! use tomatobox::libs::messages::Message;
//!
//! fn window(hours: i64) -> anyhow::Result<i64> {
//!     if hours > 24 * 365 {
//!         msg_bail_anyhow!(Message::InvalidWindow(hours));
//!     }
//!     Ok(hours)
//! }
//! ```

use std::sync::OnceLock;

/// Cached result of [`is_debug_mode`].
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether debug output is enabled.
///
/// ## Detection Logic
///
/// Returns `true` when `TOMATOBOX_DEBUG` or `RUST_LOG` is set, whatever the
/// value. The first call reads the environment and later calls return the
/// cached answer, so changing either variable after startup has no effect.
///
/// The binary also uses this to decide whether to install a
/// `tracing_subscriber`, and the timer command to decide between redrawing
/// one countdown line and logging once a minute.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TOMATOBOX_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a message with no prefix.
///
/// ## Forms
///
/// - `msg_print!(msg)`: one line
/// - `msg_print!(msg, true)`: one line with a blank line before and after
///
/// In debug mode both forms log at `INFO`.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a message with the ✅ prefix. Accepts the same two forms as
/// [`msg_print!`].
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Reports an error with the ❌ prefix.
///
/// Outside debug mode the line goes to stderr so it survives redirecting
/// stdout. In debug mode it is logged at `ERROR`. This does not return or
/// propagate anything; use [`msg_bail_anyhow!`] for that.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

/// Prints a message with the ⚠️ prefix, or logs it at `WARN`.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
}

/// Prints a message with the ℹ️ prefix. Accepts the same two forms as
/// [`msg_print!`].
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Logs at `DEBUG` with the 🔍 prefix. Prints nothing outside debug mode,
/// and the message expression is not evaluated there either.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` whose text is the message with the ❌ prefix.
///
/// Nothing is printed here. The error is shown once, by `main`, when it
/// reaches the top of the command.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with [`msg_error_anyhow!`]. Only usable in functions that
/// return `anyhow::Result`.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
