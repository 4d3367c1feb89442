//! Error types for bugtrail operations.

use crate::domain::{CommandKind, IssueId, IssueType, State};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for bugtrail operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A command was built with missing or contradictory fields.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A fresh issue was created with invalid arguments.
    #[error("Invalid issue: {0}")]
    InvalidIssue(String),

    /// A persisted issue violates a cross-field invariant or uses an unknown token.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The command is not legal for the issue's current state and type.
    ///
    /// The issue is left unchanged.
    #[error("Illegal transition: cannot {command} a {issue_type} in state {state}: {reason}")]
    IllegalTransition {
        /// State the issue was in.
        state: State,
        /// Type of the issue.
        issue_type: IssueType,
        /// Command that was rejected.
        command: CommandKind,
        /// Which guard failed.
        reason: &'static str,
    },

    /// A state name outside the lifecycle was encountered.
    #[error("Invalid state: '{0}'")]
    InvalidState(String),

    /// The data file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Issue not found.
    #[error("Issue not found: {0}")]
    IssueNotFound(IssueId),

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The record codec rejected the data.
    #[error("Record format error: {0}")]
    Format(String),

    /// The data file could not be read to the end.
    #[error("Data file could not be read past line {line_number}: {error}")]
    ReadFailed {
        /// Line at which reading stopped.
        line_number: usize,
        /// The underlying I/O error.
        error: String,
    },

    /// The configured backend name is not known.
    #[error("Unknown storage backend '{0}' (expected 'file' or 'memory')")]
    UnknownBackend(String),
}

/// Errors raised while locating or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.bugtrail/` directory was found.
    #[error("Not a bugtrail repository (or any parent directory). Run 'bugtrail init' first")]
    NotInitialized,

    /// `init` was run where a repository already exists.
    #[error("Bugtrail is already initialized here. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The configuration file could not be parsed or written.
    #[error("Configuration error: {0}")]
    Parse(String),
}

impl From<bugtrail_records::Error> for Error {
    fn from(err: bugtrail_records::Error) -> Self {
        match err {
            bugtrail_records::Error::Io(io_err) => Error::Io(io_err),
            other @ bugtrail_records::Error::InvalidFormat { .. } => {
                StorageError::Format(other.to_string()).into()
            }
        }
    }
}

/// A specialized Result type for bugtrail operations.
pub type Result<T> = std::result::Result<T, Error>;
