// src/errors.rs

//! Crate-wide error type.
//!
//! The three runner operations only ever fail with [`RunnerError::Launch`],
//! [`RunnerError::Cancelled`] or, if the OS misbehaves on a running child,
//! [`RunnerError::Io`]. A non-zero exit code is never an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    /// The child process could not be created. No process exists.
    #[error("failed to launch '{program}': {reason}")]
    Launch {
        program: String,
        #[source]
        reason: LaunchFailure,
    },

    /// A streamed wait was abandoned because the caller cancelled it.
    #[error("wait for '{program}' was cancelled")]
    Cancelled { program: String },

    #[error("I/O error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Why a launch failed.
#[derive(Error, Debug)]
pub enum LaunchFailure {
    #[error("executable not found")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("working directory {0:?} is not an existing directory")]
    InvalidWorkingDirectory(PathBuf),

    #[error(transparent)]
    Spawn(io::Error),
}

impl LaunchFailure {
    /// Classify an error returned by `Command::spawn`.
    pub fn from_spawn_error(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => LaunchFailure::NotFound,
            io::ErrorKind::PermissionDenied => LaunchFailure::PermissionDenied,
            _ => LaunchFailure::Spawn(err),
        }
    }
}

impl RunnerError {
    pub fn is_launch(&self) -> bool {
        matches!(self, RunnerError::Launch { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunnerError::Cancelled { .. })
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;
