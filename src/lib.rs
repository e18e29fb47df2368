//! ttyctl - terminal mode lifecycle control
//!
//! Interactive text applications flip the terminal into special modes (raw
//! input, alternate screen, mouse tracking, bracketed paste) and must flip
//! every one of them back before the process dies, including on panics and
//! signals. ttyctl owns that lifecycle:
//!
//! - [`init_terminal`] enables startup input modes (bracketed paste)
//! - [`disable_mouse_tracking`] silences mouse reporting mid-session
//! - [`restore_terminal`] is the single authoritative teardown, safe to
//!   call from every exit path, any number of times
//!
//! Cleanup writes go through a fallback chain: the controlling terminal
//! device first (so redirected stdout cannot block restoration), then
//! stdout if it is interactive, otherwise the write is silently dropped.
//! Nothing in this crate returns an error to the caller; a terminal that
//! cannot be restored is a degraded environment, not a crash.
//!
//! # Quick Start
//!
//! ```no_run
//! use ttyctl::{init_terminal, install_panic_hook, restore_terminal, RestoreGuard};
//!
//! install_panic_hook();
//! init_terminal();
//! let _guard = RestoreGuard::new();
//! // ... interactive session ...
//! restore_terminal();
//! ```

mod config;
mod controller;
mod error;
mod guard;
mod sequences;
mod writer;

pub use config::Capabilities;
pub use controller::{
    disable_mouse_tracking, init_terminal, restore_terminal, ModeController, RawModeControl,
    StdinRawMode,
};
pub use error::ConfigError;
pub use guard::{install_panic_hook, RestoreGuard};
pub use sequences::{
    BRACKETED_PASTE_DISABLE, BRACKETED_PASTE_ENABLE, EXIT_ALT_SCREEN, MOUSE_DISABLE, SHOW_CURSOR,
};
pub use writer::{write_through, DeviceSink, SequenceSink, StdoutSink, DEFAULT_DEVICE};
