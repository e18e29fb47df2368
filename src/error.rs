//! Error types for the configuration surface.
//!
//! The lifecycle operations themselves expose no error type: every failure
//! there is a non-fatal environmental limitation handled by fallback or
//! silent drop, because restore runs where raising would mask the original
//! failure or keep the process from exiting.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
