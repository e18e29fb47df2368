//! ttyctl - terminal mode lifecycle demo
//!
//! Drives the library end to end against a real terminal: enables startup
//! input modes, enters raw mode and the alternate screen, then restores
//! everything on the way out, including when the session panics.
//!
//! # Quick Start
//!
//! ```text
//! ttyctl             # Run the demo session
//! ttyctl --no-mouse  # Skip mouse capture
//! ```
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | q / Esc | Quit |
//! | m | Disable mouse tracking mid-session |
//! | p | Panic, to exercise the restore hook |

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo};
use crossterm::event::{self, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ttyctl::{
    disable_mouse_tracking, init_terminal, install_panic_hook, restore_terminal, RestoreGuard,
};

/// Demo configuration
struct Config {
    /// Capture mouse events during the session
    mouse: bool,
}

fn parse_args() -> Result<Config, String> {
    let mut config = Config { mouse: true };
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--no-mouse" => config.mouse = false,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(config)
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("ttyctl {}", VERSION);
}

fn print_help() {
    eprintln!("ttyctl {} - terminal mode lifecycle demo", VERSION);
    eprintln!();
    eprintln!("Usage: ttyctl [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --no-mouse             Do not capture mouse events");
    eprintln!("  -h, --help             Show this help");
    eprintln!("  -V, --version          Show version");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  q, Esc                 Quit");
    eprintln!("  m                      Disable mouse tracking mid-session");
    eprintln!("  p                      Panic (terminal should still be restored)");
}

fn main() -> anyhow::Result<()> {
    let config = match parse_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    // Initialize logging to file; stderr would corrupt the session screen.
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from);

    let log_path = home
        .map(|h| h.join(".ttyctl").join("ttyctl.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("ttyctl.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    info!("ttyctl demo starting...");

    // Must be installed before any mode is enabled.
    install_panic_hook();

    run_session(config)
}

fn run_session(config: Config) -> anyhow::Result<()> {
    // Armed before any mode is enabled: the `?` returns below must also
    // leave a restored terminal. Restore is idempotent and safe without a
    // prior init, so the explicit restore at the end stays.
    let _guard = RestoreGuard::new();

    init_terminal();
    terminal::enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        MoveTo(0, 0)
    )?;
    if config.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let result = run_loop(config.mouse);

    restore_terminal();
    result
}

fn run_loop(mouse: bool) -> anyhow::Result<()> {
    let poll_timeout = Duration::from_millis(100);
    let mut stdout = io::stdout();
    let mut mouse_active = mouse;
    let mut mouse_events: u64 = 0;

    loop {
        execute!(stdout, MoveTo(0, 0), Clear(ClearType::CurrentLine))?;
        write!(
            stdout,
            "ttyctl demo | q quits, m drops mouse tracking, p panics | mouse: {} ({} events)",
            if mouse_active { "on" } else { "off" },
            mouse_events
        )?;
        stdout.flush()?;

        if !event::poll(poll_timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('m') => {
                    disable_mouse_tracking();
                    mouse_active = false;
                    info!("mouse tracking disabled mid-session");
                }
                KeyCode::Char('p') => panic!("deliberate panic to exercise terminal restore"),
                _ => {}
            },
            Event::Mouse(_) => mouse_events += 1,
            _ => {}
        }
    }

    info!("session ended normally");
    Ok(())
}
