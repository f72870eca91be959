//! Error types for cairn operations.
//!
//! This module defines [`CairnError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CairnError` for domain-specific errors that need distinct handling
//! - Probe-level failures (tool missing, version unparseable) live in
//!   [`crate::version::ProbeError`] and are recovered into validation
//!   results rather than propagated
//! - Use `anyhow::Error` (via `CairnError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cairn operations.
#[derive(Debug, Error)]
pub enum CairnError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A remediation action for a dependency did not complete.
    #[error("Remediation for '{dependency}' failed: {message}")]
    RemediationFailed {
        dependency: String,
        message: String,
    },

    /// A generation entry point could not be launched at all.
    #[error("Generation entry point could not be launched ({script}): {message}")]
    GenerationUnavailable { script: PathBuf, message: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Download did not produce the expected content.
    #[error("Download from {url} failed: {message}")]
    DownloadFailed { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CairnError {
    /// Exit code for an error that escapes to the process boundary.
    ///
    /// Configuration problems exit 2, matching the "no usable config"
    /// code, so callers can tell them apart from runtime failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigValidationError { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for cairn operations.
pub type Result<T> = std::result::Result<T, CairnError>;
