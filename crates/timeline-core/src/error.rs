//! Core error types for timeline-core.
//!
//! Every operation in the core either succeeds or is a safe no-op, so the
//! taxonomy is narrow: malformed time text, unknown event ids, invalid
//! construction values and configuration I/O.

use std::path::PathBuf;
use thiserror::Error;

use crate::timeline::EventId;

/// Core error type for timeline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed time text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Mutation referencing an unknown event
    #[error("Event not found: {id}")]
    NotFound { id: EventId },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced while parsing `HH:MM` time text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or whitespace only
    #[error("time is empty")]
    Empty,

    /// Input has no `:` separator
    #[error("missing ':' in time '{input}' (expected HH:MM)")]
    MissingColon { input: String },

    /// Hour component is not a number
    #[error("invalid hour in time '{input}'")]
    InvalidHour { input: String },

    /// Minute component is not a number
    #[error("invalid minute in time '{input}'")]
    InvalidMinute { input: String },

    /// Components parsed but describe no time of day
    #[error("time '{input}' is out of range (00:00-23:59, or 24:00)")]
    OutOfRange { input: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Day index outside the week
    #[error("Invalid day index {0}: expected 0 (Mon) through 6 (Sun)")]
    InvalidDay(u8),

    /// Window bounds that cannot form a timeline
    #[error("Invalid time window: start {start}, end {end}, step {step}")]
    InvalidWindow { start: i32, end: i32, step: i32 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home/config directory could not be resolved or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
