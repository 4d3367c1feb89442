//! Record-file persistence.
//!
//! Issues are stored in the text format handled by `bugtrail-records`:
//!
//! ```text
//! *1,Working,Bug,Crash on save,alice,true,
//! -[New] Reported by QA
//! -[New] Reproduced
//! -[Confirmed] Taking it
//! ```
//!
//! Loading is done in two passes. The record reader first skips anything it
//! cannot parse; each surviving record is then decoded into domain tokens and
//! restored through [`Issue::restore`], which rejects invariant violations.
//! Both kinds of failure become [`LoadWarning`]s.
//!
//! A file that cannot be read to the end fails the whole load. Returning a
//! partial list would let the next save drop the unread records.

use super::{IssueStore, LoadWarning};
use crate::domain::{Issue, IssueSnapshot};
use crate::error::{Error, Result, StorageError};
use async_trait::async_trait;
use bugtrail_records::{read_records_resilient, write_records_atomic, Record, Warning};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// A store backed by a single record file.
#[derive(Debug, Clone)]
pub struct RecordFileStore {
    path: PathBuf,
}

impl RecordFileStore {
    /// Creates a store for the file at `path`. Nothing is read until
    /// [`IssueStore::load`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IssueStore for RecordFileStore {
    async fn load(&self) -> Result<(Vec<Issue>, Vec<LoadWarning>)> {
        let (records, record_warnings) =
            read_records_resilient(&self.path)
                .await
                .map_err(|e| match e {
                    bugtrail_records::Error::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        Error::FileNotFound(self.path.clone())
                    }
                    other => other.into(),
                })?;

        let mut warnings = Vec::with_capacity(record_warnings.len());
        for warning in record_warnings {
            match warning {
                Warning::MalformedRecord { line_number, error } => {
                    warnings.push(LoadWarning::MalformedRecord { line_number, error });
                }
                Warning::SkippedLine { line_number, .. } => {
                    warnings.push(LoadWarning::StrayLine { line_number });
                }
                Warning::ReadFailed { line_number, error } => {
                    tracing::error!(path = %self.path.display(), line_number, %error, "Data file read failed");
                    return Err(StorageError::ReadFailed { line_number, error }.into());
                }
            }
        }

        let mut seen = HashSet::new();
        let mut issues = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let issue_id = record.id;
            if !seen.insert(issue_id) {
                warnings.push(LoadWarning::DuplicateId { issue_id });
                continue;
            }
            match record_to_issue(record) {
                Ok(issue) => issues.push(issue),
                Err(e) => warnings.push(LoadWarning::InvalidIssueData {
                    issue_id,
                    record_number: index + 1,
                    error: e.to_string(),
                }),
            }
        }

        for warning in &warnings {
            tracing::warn!(path = %self.path.display(), %warning, "Skipped record while loading");
        }
        tracing::info!(
            path = %self.path.display(),
            issues = issues.len(),
            warnings = warnings.len(),
            "Loaded issues"
        );

        Ok((issues, warnings))
    }

    async fn save(&self, issues: &[Issue]) -> Result<()> {
        let records: Vec<Record> = issues.iter().map(issue_to_record).collect();
        write_records_atomic(&self.path, &records).await?;
        tracing::info!(path = %self.path.display(), issues = records.len(), "Saved issues");
        Ok(())
    }
}

/// Decodes a record's tokens and restores the issue it describes.
///
/// # Errors
///
/// Returns `Error::InvalidState` for an unknown state token,
/// `Error::InvalidRecord` for an unknown type or resolution token, and any
/// error from [`Issue::restore`].
pub fn record_to_issue(record: Record) -> Result<Issue> {
    let Record {
        id,
        state,
        issue_type,
        summary,
        owner,
        confirmed,
        resolution,
        notes,
    } = record;

    Issue::restore(IssueSnapshot {
        id,
        state: state.parse()?,
        issue_type: issue_type.parse()?,
        summary,
        owner,
        confirmed,
        resolution: resolution.as_deref().map(str::parse).transpose()?,
        notes,
    })
}

/// Encodes an issue as a record using the canonical tokens.
#[must_use]
pub fn issue_to_record(issue: &Issue) -> Record {
    let snapshot = issue.snapshot();
    Record {
        id: snapshot.id,
        state: snapshot.state.as_str().to_string(),
        issue_type: snapshot.issue_type.as_str().to_string(),
        summary: snapshot.summary,
        owner: snapshot.owner,
        confirmed: snapshot.confirmed,
        resolution: snapshot.resolution.map(|r| r.as_str().to_string()),
        notes: snapshot.notes,
    }
}
