//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute so bad input
//! is rejected at parse time, before the repository is opened. They also
//! keep out text the record file cannot store.

use crate::domain::IssueId;

/// Validate an issue id: a positive integer, optionally written as `#12`.
pub fn validate_issue_id(s: &str) -> Result<IssueId, String> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    digits
        .parse::<IssueId>()
        .map_err(|_| format!("Invalid issue id '{s}'. Expected a positive number such as 12"))
}

/// Validate an issue summary: non-empty, single line.
pub fn validate_summary(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Summary cannot be empty".to_string());
    }
    if s.contains(['\n', '\r']) {
        return Err("Summary cannot contain newline characters".to_string());
    }

    Ok(s.to_string())
}

/// Validate an owner name: non-empty, no commas, single line.
pub fn validate_owner(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Owner cannot be empty".to_string());
    }
    if s.contains(',') {
        return Err("Owner cannot contain commas".to_string());
    }
    if s.contains(['\n', '\r']) {
        return Err("Owner cannot contain newline characters".to_string());
    }

    Ok(s.to_string())
}

/// Validate a note.
///
/// A note may span several lines, but a continuation line must not be
/// blank or start with `-` or `*`, since those would read back as a new
/// note or a new record.
pub fn validate_note(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Note cannot be empty".to_string());
    }
    if s.contains('\r') {
        return Err("Note cannot contain carriage returns".to_string());
    }
    for line in s.lines().skip(1) {
        if line.trim().is_empty() {
            return Err("Note cannot contain blank lines".to_string());
        }
        if line.starts_with(['-', '*']) {
            return Err("Note lines after the first cannot start with '-' or '*'".to_string());
        }
    }

    Ok(s.to_string())
}
