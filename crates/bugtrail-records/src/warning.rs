//! Warning types for non-fatal errors during record processing.
//!
//! When loading a data file it is usually better to keep every readable
//! record than to reject the whole file because of one bad entry. The
//! [`Warning`] type describes what was skipped, and the [`WarningCollector`]
//! accumulates warnings while a stream is being consumed.
//!
//! # Examples
//!
//! ```
//! use bugtrail_records::warning::{Warning, WarningCollector};
//!
//! let collector = WarningCollector::new();
//!
//! collector.add(Warning::MalformedRecord {
//!     line_number: 5,
//!     error: "invalid issue id 'x'".to_string(),
//! });
//!
//! collector.add(Warning::SkippedLine {
//!     line_number: 10,
//!     reason: "line is outside of any record".to_string(),
//! });
//!
//! let warnings = collector.into_warnings();
//! assert_eq!(warnings.len(), 2);
//! ```

use std::sync::{Arc, Mutex};

/// A non-fatal warning that occurred during record processing.
///
/// Each variant carries the line number where the problem was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A record header or note layout could not be parsed.
    ///
    /// The whole record is skipped and reading continues with the next one.
    MalformedRecord {
        /// The 1-based line number of the record header.
        line_number: usize,
        /// A description of the parse error.
        error: String,
    },

    /// A line was skipped because it did not belong to any record.
    SkippedLine {
        /// The 1-based line number that was skipped.
        line_number: usize,
        /// The reason the line was skipped.
        reason: String,
    },

    /// Reading stopped early because the underlying reader failed.
    ReadFailed {
        /// The 1-based line number that could not be read.
        line_number: usize,
        /// A description of the I/O error.
        error: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use bugtrail_records::warning::Warning;
    ///
    /// let warning = Warning::MalformedRecord {
    ///     line_number: 42,
    ///     error: "unexpected token".to_string(),
    /// };
    /// assert_eq!(warning.line_number(), 42);
    /// ```
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedRecord { line_number, .. }
            | Self::SkippedLine { line_number, .. }
            | Self::ReadFailed { line_number, .. } => *line_number,
        }
    }

    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedRecord { line_number, error } => {
                format!("line {line_number}: malformed record: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => format!("line {line_number}: skipped: {reason}"),
            Self::ReadFailed { line_number, error } => {
                format!("line {line_number}: read failed: {error}")
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use bugtrail_records::warning::Warning;
    ///
    /// let warning = Warning::SkippedLine {
    ///     line_number: 10,
    ///     reason: "stray".to_string(),
    /// };
    /// assert_eq!(warning.kind(), "skipped_line");
    /// ```
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "malformed_record",
            Self::SkippedLine { .. } => "skipped_line",
            Self::ReadFailed { .. } => "read_failed",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

/// A thread-safe collector for accumulating warnings during record processing.
///
/// Cloning a collector yields a handle to the same underlying list, which is
/// how a stream and its consumer share it.
///
/// # Mutex Poisoning
///
/// All methods panic if the internal mutex is poisoned, which only happens if
/// another thread panicked while holding the lock.
#[derive(Debug, Clone, Default)]
pub struct WarningCollector {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl WarningCollector {
    /// Creates a new empty `WarningCollector`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning to the collector.
    pub fn add(&self, warning: Warning) {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .push(warning);
    }

    /// Returns the number of warnings collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .len()
    }

    /// Returns `true` if no warnings have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of all collected warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .clone()
    }

    /// Consumes the collector and returns the collected warnings.
    ///
    /// If other clones are still alive, the warnings are copied instead of moved.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        match Arc::try_unwrap(self.warnings) {
            Ok(mutex) => mutex
                .into_inner()
                .expect("warning collector mutex should not be poisoned"),
            Err(shared) => shared
                .lock()
                .expect("warning collector mutex should not be poisoned")
                .clone(),
        }
    }

    /// Removes all collected warnings.
    pub fn clear(&self) {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .clear();
    }
}
