//! Storage abstraction layer for bugtrail.
//!
//! A store persists a whole list of issues at once. It has no notion of
//! commands or transitions: the application loads every issue into an
//! [`IssueCollection`](crate::collection::IssueCollection), mutates it, and
//! saves the full list back.
//!
//! - **Record file**: the line-oriented text format from `bugtrail-records`
//! - **In-memory**: ephemeral, for tests and throwaway sessions
//!
//! # Example
//!
//! ```no_run
//! use bugtrail::storage::{StorageBackend, create_store};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = create_store(StorageBackend::File(".bugtrail/issues.txt".into()));
//!     let (issues, warnings) = store.load().await?;
//!     println!("{} issues, {} warnings", issues.len(), warnings.len());
//!     store.save(&issues).await?;
//!     Ok(())
//! }
//! ```

use crate::domain::Issue;
use crate::error::{Result, StorageError};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod in_memory;
pub mod record_file;

pub use in_memory::InMemoryStore;
pub use record_file::RecordFileStore;

/// Whole-list persistence for issues.
///
/// Implementations must be `Send + Sync` so a boxed store can live inside
/// the async application context.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Loads every issue that can be restored.
    ///
    /// Records that cannot be turned into a valid issue are skipped and
    /// reported as [`LoadWarning`]s instead of failing the whole load.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` when a file-backed store's data file is
    /// missing, `Error::Io` if it cannot be opened, or
    /// `StorageError::ReadFailed` if reading stops partway through.
    async fn load(&self) -> Result<(Vec<Issue>, Vec<LoadWarning>)>;

    /// Replaces the stored issues with `issues`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written. A file-backed store
    /// leaves the previous file intact in that case.
    async fn save(&self, issues: &[Issue]) -> Result<()>;
}

/// Non-fatal problems found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The text of a record could not be parsed. Nothing was loaded from it.
    MalformedRecord {
        /// Line where the problem was found.
        line_number: usize,
        /// What was wrong.
        error: String,
    },

    /// A record parsed but did not describe a valid issue.
    InvalidIssueData {
        /// Id written in the record header.
        issue_id: u32,
        /// 1-based position among the parsed records (not a file line).
        record_number: usize,
        /// What was wrong.
        error: String,
    },

    /// A non-blank line outside of any record was ignored.
    StrayLine {
        /// The ignored line.
        line_number: usize,
    },

    /// Two records used the same id. The later one was dropped.
    DuplicateId {
        /// The repeated id.
        issue_id: u32,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MalformedRecord { line_number, error } => {
                write!(f, "line {line_number}: {error}")
            }
            LoadWarning::InvalidIssueData {
                issue_id,
                record_number,
                error,
            } => write!(f, "record {record_number} (issue {issue_id}): {error}"),
            LoadWarning::StrayLine { line_number } => {
                write!(f, "line {line_number}: ignored text outside of any record")
            }
            LoadWarning::DuplicateId { issue_id } => {
                write!(f, "issue {issue_id} appears more than once; later copy skipped")
            }
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Ephemeral storage, lost when the process exits.
    InMemory,

    /// Record file at the given path.
    File(PathBuf),
}

impl StorageBackend {
    /// The data file path, for file-backed stores.
    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StorageBackend::File(path) => Some(path),
            StorageBackend::InMemory => None,
        }
    }
}

/// Backend name as written in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// `file`
    File,
    /// `memory`
    Memory,
}

impl FromStr for BackendKind {
    type Err = StorageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "file" => Ok(BackendKind::File),
            "memory" => Ok(BackendKind::Memory),
            other => Err(StorageError::UnknownBackend(other.to_string())),
        }
    }
}

/// Creates a store for the given backend.
#[must_use]
pub fn create_store(backend: StorageBackend) -> Box<dyn IssueStore> {
    match backend {
        StorageBackend::InMemory => Box::new(InMemoryStore::new()),
        StorageBackend::File(path) => Box::new(RecordFileStore::new(path)),
    }
}
