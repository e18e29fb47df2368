//! Best-effort delivery of control sequences to the terminal.
//!
//! Cleanup sequences must reach the terminal even when standard output has
//! been redirected, and must never fail loudly: restore code runs inside
//! exit and panic handlers where an error would mask the original failure.
//! The fallback is modeled as an ordered chain of candidate sinks, tried in
//! sequence until one accepts the write; when none does, the write is
//! silently dropped.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crossterm::tty::IsTty;

/// Default controlling-terminal device path on Unix.
pub const DEFAULT_DEVICE: &str = "/dev/tty";

/// One candidate destination for a control sequence.
///
/// `try_write` reports whether the sink accepted the write. A refusal moves
/// the chain on to the next candidate. Errors after acceptance are
/// swallowed and never surfaced to the caller.
pub trait SequenceSink {
    fn try_write(&mut self, seq: &str) -> bool;
}

/// Writes through the controlling terminal device, bypassing any
/// redirection of the standard streams.
///
/// The device handle lives only for the duration of one write: opened,
/// written, and closed before `try_write` returns, on success and failure
/// alike. Any failure (no controlling terminal, permission denied, short
/// write) counts as a refusal so the chain can fall back.
pub struct DeviceSink {
    path: PathBuf,
}

impl DeviceSink {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DEVICE),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_once(&self, seq: &str) -> io::Result<()> {
        let mut device = OpenOptions::new().write(true).open(&self.path)?;
        device.write_all(seq.as_bytes())?;
        device.flush()
    }
}

impl Default for DeviceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceSink for DeviceSink {
    fn try_write(&mut self, seq: &str) -> bool {
        self.write_once(seq).is_ok()
    }
}

/// Writes to the process's standard output, but only when it is attached
/// to an interactive terminal. A redirected stdout refuses the write so
/// the chain can drop it instead of polluting a pipe or file.
pub struct StdoutSink;

impl SequenceSink for StdoutSink {
    fn try_write(&mut self, seq: &str) -> bool {
        let mut stdout = io::stdout();
        if !stdout.is_tty() {
            return false;
        }
        // Interactivity decides acceptance. Write errors after that are
        // swallowed: falling through to another sink could double-emit on
        // terminals where both fds alias the same device.
        let _ = stdout.write_all(seq.as_bytes());
        let _ = stdout.flush();
        true
    }
}

/// Try each sink in order, stopping at the first that accepts the
/// sequence. When no sink accepts, the write is dropped without error.
pub fn write_through(chain: &mut [Box<dyn SequenceSink>], seq: &str) {
    for sink in chain.iter_mut() {
        if sink.try_write(seq) {
            return;
        }
    }
}
