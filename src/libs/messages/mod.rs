//! User-facing text and the macros that print it.
//!
//! All strings shown to the user come from [`Message`] so wording stays in one
//! place. The `msg_*` macros route output to `tracing` in debug mode and to
//! stdout/stderr otherwise.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
