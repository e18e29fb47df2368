//! Exit-path coverage: RAII restore and a chained panic hook.
//!
//! `restore_terminal` must run before the process dies no matter how it
//! dies. The guard covers normal return and unwinding; the panic hook
//! covers aborting panic reports; signal handlers installed by the host
//! can call `restore_terminal` directly.

use std::marker::PhantomData;
use std::panic;

use tracing::debug;

use crate::controller::restore_terminal;

/// Restores the terminal when dropped.
///
/// Hold one for the lifetime of the interactive session. Extra explicit
/// `restore_terminal` calls elsewhere are harmless since restore is
/// idempotent.
pub struct RestoreGuard {
    // One controlling terminal per process; keep the guard on one thread.
    _not_send: PhantomData<*const ()>,
}

impl RestoreGuard {
    pub fn new() -> Self {
        debug!("terminal restore guard armed");
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Default for RestoreGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Install a panic hook that restores the terminal before the previous
/// hook prints, so the report lands on a cooked, primary-screen terminal.
///
/// Call before entering any terminal modes.
pub fn install_panic_hook() {
    let original = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original(info);
    }));
}
