//! Terminal mode lifecycle: enable input modes at startup, scoped mouse
//! disable mid-session, full restore on shutdown.
//!
//! The controller is stateless between calls. Restore re-emits the full
//! teardown burst every time; disable sequences for inactive modes are
//! no-ops at the terminal, which is what makes repeated and out-of-order
//! calls safe without tracking mode state.

use std::io;

use crossterm::terminal;
use crossterm::tty::IsTty;
use tracing::debug;

use crate::config::Capabilities;
use crate::sequences::{
    BRACKETED_PASTE_DISABLE, BRACKETED_PASTE_ENABLE, EXIT_ALT_SCREEN, MOUSE_DISABLE, SHOW_CURSOR,
};
use crate::writer::{write_through, DeviceSink, SequenceSink, StdoutSink};

/// Raw/cooked mode switching on the input stream.
///
/// Injected so the controller can be exercised without a real terminal.
pub trait RawModeControl {
    /// Whether the input stream is an interactive terminal that supports
    /// mode switching at all.
    fn is_interactive(&self) -> bool;

    /// Return the input stream to cooked mode. Best-effort: failures
    /// (stream already closed, switching unsupported) are swallowed.
    fn exit_raw_mode(&mut self);
}

/// Raw-mode control backed by crossterm and the process's stdin.
pub struct StdinRawMode;

impl RawModeControl for StdinRawMode {
    fn is_interactive(&self) -> bool {
        io::stdin().is_tty()
    }

    fn exit_raw_mode(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Controls the terminal modes for one session.
///
/// `init` turns on startup input modes, `disable_mouse_tracking` silences
/// mouse reporting mid-session, and `restore` is the single authoritative
/// teardown. None of these return errors: every failure is an environmental
/// limitation (no controlling terminal, redirected streams) and is handled
/// by fallback or silent skip.
pub struct ModeController {
    /// Fallback chain for cleanup writes: device first, then stdout.
    chain: Vec<Box<dyn SequenceSink>>,
    /// Direct stdout path for startup sequences that must be observed by
    /// the same stream the application reads rendered input from.
    stdout: Box<dyn SequenceSink>,
    raw_mode: Box<dyn RawModeControl>,
    caps: Capabilities,
}

impl ModeController {
    /// A controller wired to the real terminal with default capabilities.
    pub fn with_defaults() -> Self {
        Self::with_capabilities(Capabilities::default())
    }

    /// A controller wired to the real terminal.
    pub fn with_capabilities(caps: Capabilities) -> Self {
        let mut chain: Vec<Box<dyn SequenceSink>> = Vec::new();
        if caps.device_fallback {
            chain.push(Box::new(match caps.device_path.as_deref() {
                Some(path) => DeviceSink::with_path(path),
                None => DeviceSink::new(),
            }));
        }
        chain.push(Box::new(StdoutSink));
        Self {
            chain,
            stdout: Box::new(StdoutSink),
            raw_mode: Box::new(StdinRawMode),
            caps,
        }
    }

    /// Fully injected constructor, for tests and embedders that supply
    /// their own terminal handles.
    pub fn new(
        chain: Vec<Box<dyn SequenceSink>>,
        stdout: Box<dyn SequenceSink>,
        raw_mode: Box<dyn RawModeControl>,
        caps: Capabilities,
    ) -> Self {
        Self {
            chain,
            stdout,
            raw_mode,
            caps,
        }
    }

    /// Enable startup input modes (bracketed paste).
    ///
    /// Goes straight to stdout rather than through the device chain: the
    /// paste markers must be seen by the same consumer that will later read
    /// paste-delimited input. A non-interactive stdout is a normal no-op,
    /// not a failure.
    pub fn init(&mut self) {
        if !self.caps.bracketed_paste {
            return;
        }
        debug!("enabling bracketed paste");
        let _ = self.stdout.try_write(BRACKETED_PASTE_ENABLE);
    }

    /// Silence all mouse reporting modes without touching the alternate
    /// screen or cursor state. Usable mid-session, e.g. before handing the
    /// terminal to a nested prompt. Idempotent.
    pub fn disable_mouse_tracking(&mut self) {
        debug!("disabling mouse tracking");
        write_through(&mut self.chain, MOUSE_DISABLE);
    }

    /// Restore the terminal to its pre-session state: cooked input,
    /// primary screen buffer, visible cursor, paste reporting off.
    ///
    /// Safe to call multiple times, safe without a prior `init`, and safe
    /// from panic and signal handlers: it never returns an error and never
    /// panics. This must run before the process exits, on every exit path.
    pub fn restore(&mut self) {
        if self.raw_mode.is_interactive() {
            self.raw_mode.exit_raw_mode();
        }

        // One combined write so teardown lands atomically even when the
        // process is about to die.
        let mut seq = String::with_capacity(72);
        seq.push_str(MOUSE_DISABLE);
        seq.push_str(EXIT_ALT_SCREEN);
        seq.push_str(SHOW_CURSOR);
        if self.caps.bracketed_paste {
            seq.push_str(BRACKETED_PASTE_DISABLE);
        }
        debug!("restoring terminal modes");
        write_through(&mut self.chain, &seq);
    }
}

// The boundary functions honor the user capability config; a missing or
// broken config file silently yields the full-featured defaults.

/// Enable terminal input modes for the session. Call once at startup,
/// after the renderer has taken over standard output.
pub fn init_terminal() {
    ModeController::with_capabilities(Capabilities::load()).init();
}

/// Disable common mouse reporting modes to prevent stray events from
/// reaching whatever reads the terminal next.
pub fn disable_mouse_tracking() {
    ModeController::with_capabilities(Capabilities::load()).disable_mouse_tracking();
}

/// Restore the terminal to a sane state. Call from every exit path:
/// normal completion, panic hooks, and signal handlers.
pub fn restore_terminal() {
    ModeController::with_capabilities(Capabilities::load()).restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeSink {
        accept: bool,
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl SequenceSink for FakeSink {
        fn try_write(&mut self, seq: &str) -> bool {
            if !self.accept {
                return false;
            }
            self.writes.borrow_mut().push(seq.to_string());
            true
        }
    }

    struct FakeRawMode {
        interactive: bool,
        exits: Rc<RefCell<u32>>,
    }

    impl RawModeControl for FakeRawMode {
        fn is_interactive(&self) -> bool {
            self.interactive
        }

        fn exit_raw_mode(&mut self) {
            *self.exits.borrow_mut() += 1;
        }
    }

    struct Harness {
        chain_writes: Rc<RefCell<Vec<String>>>,
        stdout_writes: Rc<RefCell<Vec<String>>>,
        raw_exits: Rc<RefCell<u32>>,
    }

    fn controller(
        stdout_interactive: bool,
        stdin_interactive: bool,
        caps: Capabilities,
    ) -> (ModeController, Harness) {
        let chain_writes = Rc::new(RefCell::new(Vec::new()));
        let stdout_writes = Rc::new(RefCell::new(Vec::new()));
        let raw_exits = Rc::new(RefCell::new(0));
        let ctl = ModeController::new(
            vec![Box::new(FakeSink {
                accept: true,
                writes: Rc::clone(&chain_writes),
            })],
            Box::new(FakeSink {
                accept: stdout_interactive,
                writes: Rc::clone(&stdout_writes),
            }),
            Box::new(FakeRawMode {
                interactive: stdin_interactive,
                exits: Rc::clone(&raw_exits),
            }),
            caps,
        );
        (
            ctl,
            Harness {
                chain_writes,
                stdout_writes,
                raw_exits,
            },
        )
    }

    const FULL_RESTORE: &str = "\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1005l\x1b[?1006l\x1b[?1015l\x1b[?1049l\x1b[?25h\x1b[?2004l";

    #[test]
    fn test_init_writes_paste_enable_to_stdout_only() {
        let (mut ctl, h) = controller(true, true, Capabilities::default());
        ctl.init();
        assert_eq!(*h.stdout_writes.borrow(), vec!["\x1b[?2004h".to_string()]);
        assert!(h.chain_writes.borrow().is_empty());
    }

    #[test]
    fn test_init_is_noop_on_non_interactive_stdout() {
        let (mut ctl, h) = controller(false, true, Capabilities::default());
        ctl.init();
        assert!(h.stdout_writes.borrow().is_empty());
        assert!(h.chain_writes.borrow().is_empty());
    }

    #[test]
    fn test_init_respects_paste_capability() {
        let caps = Capabilities {
            bracketed_paste: false,
            ..Capabilities::default()
        };
        let (mut ctl, h) = controller(true, true, caps);
        ctl.init();
        assert!(h.stdout_writes.borrow().is_empty());
    }

    #[test]
    fn test_disable_mouse_is_one_write_through_the_chain() {
        let (mut ctl, h) = controller(true, true, Capabilities::default());
        ctl.disable_mouse_tracking();
        assert_eq!(
            *h.chain_writes.borrow(),
            vec!["\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1005l\x1b[?1006l\x1b[?1015l".to_string()]
        );
        assert!(h.stdout_writes.borrow().is_empty());
    }

    #[test]
    fn test_restore_emits_combined_sequence_in_order() {
        let (mut ctl, h) = controller(true, true, Capabilities::default());
        ctl.restore();
        assert_eq!(*h.chain_writes.borrow(), vec![FULL_RESTORE.to_string()]);
        assert_eq!(*h.raw_exits.borrow(), 1);
    }

    #[test]
    fn test_restore_twice_emits_the_same_bytes() {
        let (mut ctl, h) = controller(true, true, Capabilities::default());
        ctl.restore();
        ctl.restore();
        let writes = h.chain_writes.borrow();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], writes[1]);
    }

    #[test]
    fn test_restore_skips_raw_toggle_when_stdin_not_interactive() {
        let (mut ctl, h) = controller(true, false, Capabilities::default());
        ctl.restore();
        assert_eq!(*h.raw_exits.borrow(), 0);
        // The combined write still goes out.
        assert_eq!(h.chain_writes.borrow().len(), 1);
    }

    #[test]
    fn test_restore_without_prior_init_is_safe() {
        let (mut ctl, h) = controller(true, true, Capabilities::default());
        ctl.restore();
        assert_eq!(*h.chain_writes.borrow(), vec![FULL_RESTORE.to_string()]);
    }

    #[test]
    fn test_restore_without_paste_capability_keeps_teardown_core() {
        let caps = Capabilities {
            bracketed_paste: false,
            ..Capabilities::default()
        };
        let (mut ctl, h) = controller(true, true, caps);
        ctl.restore();
        assert_eq!(
            *h.chain_writes.borrow(),
            vec![
                "\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1005l\x1b[?1006l\x1b[?1015l\x1b[?1049l\x1b[?25h"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_restore_drops_silently_when_no_sink_accepts() {
        let writes = Rc::new(RefCell::new(Vec::new()));
        let exits = Rc::new(RefCell::new(0));
        let mut ctl = ModeController::new(
            vec![Box::new(FakeSink {
                accept: false,
                writes: Rc::clone(&writes),
            })],
            Box::new(FakeSink {
                accept: false,
                writes: Rc::clone(&writes),
            }),
            Box::new(FakeRawMode {
                interactive: false,
                exits: Rc::clone(&exits),
            }),
            Capabilities::default(),
        );
        ctl.restore();
        ctl.disable_mouse_tracking();
        assert!(writes.borrow().is_empty());
    }

    #[test]
    fn test_device_fallback_capability_controls_chain_shape() {
        let with_device = ModeController::with_capabilities(Capabilities::default());
        assert_eq!(with_device.chain.len(), 2);

        let without_device = ModeController::with_capabilities(Capabilities {
            device_fallback: false,
            ..Capabilities::default()
        });
        assert_eq!(without_device.chain.len(), 1);
    }
}
