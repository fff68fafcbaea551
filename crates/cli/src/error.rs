// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Grader error types.
///
/// Everything here is fatal to a grading run. Per-check problems are
/// reported through [`CheckFailure`] instead and never surface as `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration document missing, malformed, or incomplete.
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A check entry names a type with no registered constructor.
    #[error("unknown check: {name}")]
    UnknownCheck { name: String },

    /// Project root does not exist or is not a directory.
    #[error("project root does not exist: {}", .path.display())]
    ProjectRoot { path: PathBuf },

    /// The isolated environment could not be provisioned.
    #[error("environment setup failed: {message}")]
    Environment { message: String },

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Shorthand for a config error not tied to a file.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Shorthand for an environment setup error.
    pub fn environment(message: impl Into<String>) -> Self {
        Error::Environment {
            message: message.into(),
        }
    }
}

/// Result type using grader Error
pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a single check's execution.
///
/// The runner converts it into a degraded result; it never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CheckFailure {
    message: String,
}

impl CheckFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Run completed (degraded checks included)
    Success = 0,
    /// Isolated environment could not be built
    EnvironmentError = 1,
    /// Configuration or project root error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. }
            | Error::UnknownCheck { .. }
            | Error::ProjectRoot { .. } => ExitCode::ConfigError,
            Error::Environment { .. } => ExitCode::EnvironmentError,
            Error::Io { .. } => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
