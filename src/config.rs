//! Capability configuration.
//!
//! Terminal-control builds differ in which optional features they carry:
//! bracketed paste support and the controlling-device write fallback.
//! `Capabilities` makes those variants configuration instead of separate
//! code paths, loaded from `~/.ttyctl/config.toml` when present.
//!
//! # Configuration File
//!
//! ```toml
//! # Emit bracketed-paste enable/disable sequences
//! bracketed_paste = true
//!
//! # Try the controlling terminal device before falling back to stdout
//! device_fallback = true
//!
//! # Override the device path (defaults to /dev/tty)
//! device_path = "/dev/tty"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Optional capabilities of the mode controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Emit bracketed-paste enable/disable sequences.
    pub bracketed_paste: bool,
    /// Try the controlling terminal device before falling back to stdout.
    pub device_fallback: bool,
    /// Controlling terminal device path. `None` uses the platform default.
    pub device_path: Option<String>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            bracketed_paste: true,
            device_fallback: true,
            device_path: None,
        }
    }
}

impl Capabilities {
    /// Load from the user config file, falling back to defaults on any
    /// failure. A missing or malformed file is not an error for a
    /// component that has to keep working in degraded environments.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(caps) = toml::from_str(&content) {
                        return caps;
                    }
                }
            }
        }
        Self::default()
    }

    /// Load from an explicit path, surfacing what went wrong. For tooling
    /// that validates a config rather than silently defaulting.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn config_path() -> Option<PathBuf> {
        Some(home_dir()?.join(".ttyctl").join("config.toml"))
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
