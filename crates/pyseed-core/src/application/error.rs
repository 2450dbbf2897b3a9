//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the outside world
//! the ports talk to. Layout rule violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("Failed to fetch {url}: {reason}")]
    FetchFailed {
        url: String,
        reason: String,
        retryable: bool,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// The body was not valid UTF-8 text.
    #[error("Response from {url} is not valid UTF-8: {reason}")]
    DecodeFailed { url: String, reason: String },

    /// External program is not installed or not on `PATH`.
    #[error("Command not found: {program}")]
    CommandNotFound { program: String },

    /// External program ran and exited unsuccessfully.
    #[error("Command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "pyseed never modifies an existing directory".into(),
            ],
            Self::FetchFailed { url, .. } => vec![
                format!("Could not reach {}", url),
                "Check your network connection or proxy settings".into(),
                "Raise network.timeout_secs if the connection is slow".into(),
            ],
            Self::HttpStatus { url, status } => vec![
                format!("{} answered with HTTP {}", url, status),
                "The upstream file may have moved; point sources.* at a mirror".into(),
            ],
            Self::DecodeFailed { url, .. } => vec![
                format!("{} did not return plain text", url),
                "Check that the configured source URL serves a raw file".into(),
            ],
            Self::CommandNotFound { program } => vec![
                format!("'{}' is not installed or not on PATH", program),
                "Install git or set git.executable in the config file".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("`{}` exited unsuccessfully", command),
                "Check the command output above for details".into(),
                "git commit needs user.name and user.email to be configured".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FetchFailed { .. }
            | Self::HttpStatus { .. }
            | Self::DecodeFailed { .. }
            | Self::CommandNotFound { .. }
            | Self::CommandFailed { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }

    /// Transient failures worth one more attempt: transport errors flagged by
    /// the adapter, server errors, and rate limiting.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::FetchFailed { retryable, .. } => *retryable,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
