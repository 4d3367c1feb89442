//! The record layout: one header line plus zero or more note lines.
//!
//! ```text
//! *<id>,<state>,<type>,<summary>,<owner>,<confirmed>,<resolution>
//! -<note>
//! ```
//!
//! The summary is the only free-text header field allowed to contain commas:
//! the id, state and type are taken from the front of the header and the
//! owner, confirmed flag and resolution from the back. Every other field is
//! trimmed when parsed. Note text is kept byte-for-byte.
//!
//! A note containing a newline is written as a `-` line followed by
//! continuation lines. A continuation line is any non-blank line that does not
//! start with `-` or `*`, so note text must not put either character at the
//! start of a line, and must not contain blank lines.
//! [`Record::validate_for_write`] rejects records that would not read back
//! unchanged.

use crate::error::{Error, Result};
use crate::reader::RecordBlock;
use std::fmt;

/// Marker that opens a record header line.
pub const DELIMITER: char = '*';

/// Marker that opens a note line.
pub const NOTE_MARKER: char = '-';

/// Number of comma-separated header fields, counting the summary as one.
const HEADER_FIELDS: usize = 7;

/// One issue as it appears in a data file.
///
/// State, type and resolution are kept as raw tokens; the caller decides what
/// they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Issue identifier.
    pub id: u32,
    /// Lifecycle state token (e.g. `Working`).
    pub state: String,
    /// Issue type token (e.g. `Bug`).
    pub issue_type: String,
    /// One-line summary. May contain commas.
    pub summary: String,
    /// Owner, absent when the field is empty.
    pub owner: Option<String>,
    /// Confirmation flag.
    pub confirmed: bool,
    /// Resolution token, absent when the field is empty.
    pub resolution: Option<String>,
    /// Note log in stored order.
    pub notes: Vec<String>,
}

impl Record {
    /// Builds a record from a block read by [`RecordReader`](crate::RecordReader).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] when the header does not have the
    /// expected fields, the id is not a non-negative integer, the confirmed flag
    /// is not `true`/`false`, a line of the block is not valid UTF-8, or a
    /// continuation line appears before any note.
    pub fn from_block(block: &RecordBlock) -> Result<Self> {
        if let Some(&line_number) = block.undecodable_lines.first() {
            return Err(Error::invalid_format(line_number, "line is not valid UTF-8"));
        }
        let mut record = Self::parse_header(block.line_number, &block.header)?;

        for (line_number, line) in &block.body {
            if let Some(note) = line.strip_prefix(NOTE_MARKER) {
                record.notes.push(note.to_string());
            } else if let Some(last) = record.notes.last_mut() {
                last.push('\n');
                last.push_str(line);
            } else {
                return Err(Error::invalid_format(
                    *line_number,
                    format!("expected a note line starting with '{NOTE_MARKER}'"),
                ));
            }
        }

        Ok(record)
    }

    /// Parses a header line (without its leading `*`) into a record with no notes.
    ///
    /// # Errors
    ///
    /// See [`Record::from_block`].
    pub fn parse_header(line_number: usize, header: &str) -> Result<Self> {
        let fields: Vec<&str> = header.split(',').collect();
        if fields.len() < HEADER_FIELDS {
            return Err(Error::invalid_format(
                line_number,
                format!(
                    "expected {HEADER_FIELDS} comma-separated header fields, found {}",
                    fields.len()
                ),
            ));
        }

        let tail = fields.len() - 3;
        let id_field = fields[0].trim();
        let id = id_field.parse::<u32>().map_err(|_| {
            Error::invalid_format(line_number, format!("invalid issue id '{id_field}'"))
        })?;

        let confirmed_field = fields[tail + 1].trim();
        let confirmed = if confirmed_field.eq_ignore_ascii_case("true") {
            true
        } else if confirmed_field.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(Error::invalid_format(
                line_number,
                format!("invalid confirmed flag '{confirmed_field}'"),
            ));
        };

        Ok(Self {
            id,
            state: fields[1].trim().to_string(),
            issue_type: fields[2].trim().to_string(),
            summary: fields[3..tail].join(","),
            owner: non_empty(fields[tail]),
            confirmed,
            resolution: non_empty(fields[tail + 2]),
            notes: Vec::new(),
        })
    }

    /// Checks that writing this record would produce a file that reads back
    /// to the same record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] (with line number 0) when:
    ///
    /// - a header field contains a line break, or a field other than the
    ///   summary contains a comma;
    /// - the owner or resolution has leading or trailing whitespace, which the
    ///   reader would trim away;
    /// - a note contains `\r`, or has a line after its first that is blank or
    ///   starts with `-` or `*`.
    pub fn validate_for_write(&self) -> Result<()> {
        let fixed_fields = [
            ("state", Some(self.state.as_str())),
            ("issue type", Some(self.issue_type.as_str())),
            ("owner", self.owner.as_deref()),
            ("resolution", self.resolution.as_deref()),
        ];
        for (name, value) in fixed_fields {
            if let Some(value) = value
                && value.contains([',', '\n', '\r'])
            {
                return Err(Error::invalid_format(
                    0,
                    format!("record {}: {name} '{value}' cannot contain commas or line breaks", self.id),
                ));
            }
        }
        for (name, value) in [("owner", &self.owner), ("resolution", &self.resolution)] {
            if let Some(value) = value
                && (value.trim() != value.as_str() || value.is_empty())
            {
                return Err(Error::invalid_format(
                    0,
                    format!("record {}: {name} '{value}' would not survive trimming", self.id),
                ));
            }
        }
        if self.summary.contains(['\n', '\r']) {
            return Err(Error::invalid_format(
                0,
                format!("record {}: summary cannot contain line breaks", self.id),
            ));
        }
        for (index, note) in self.notes.iter().enumerate() {
            if let Err(reason) = check_note(note) {
                return Err(Error::invalid_format(
                    0,
                    format!("record {}: note {}: {reason}", self.id, index + 1),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    /// Formats the record exactly as it is stored, including the trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{DELIMITER}{},{},{},{},{},{},{}",
            self.id,
            self.state,
            self.issue_type,
            self.summary,
            self.owner.as_deref().unwrap_or_default(),
            self.confirmed,
            self.resolution.as_deref().unwrap_or_default(),
        )?;
        for note in &self.notes {
            writeln!(f, "{NOTE_MARKER}{note}")?;
        }
        Ok(())
    }
}

/// Checks that `note` reads back as a single, unchanged note.
fn check_note(note: &str) -> std::result::Result<(), &'static str> {
    if note.contains('\r') {
        return Err("carriage returns cannot be stored");
    }
    for line in note.split('\n').skip(1) {
        if line.trim().is_empty() {
            return Err("continuation lines cannot be blank");
        }
        if line.starts_with([NOTE_MARKER, DELIMITER]) {
            return Err("continuation lines cannot start with '-' or '*'");
        }
    }
    Ok(())
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn block(header: &str, body: &[&str]) -> RecordBlock {
        RecordBlock {
            line_number: 1,
            header: header.to_string(),
            body: body
                .iter()
                .enumerate()
                .map(|(i, line)| (i + 2, (*line).to_string()))
                .collect(),
            undecodable_lines: Vec::new(),
        }
    }

    fn writable(owner: Option<&str>, summary: &str, notes: &[&str]) -> Record {
        Record {
            id: 1,
            state: "New".to_string(),
            issue_type: "Bug".to_string(),
            summary: summary.to_string(),
            owner: owner.map(str::to_string),
            confirmed: false,
            resolution: None,
            notes: notes.iter().map(|n| (*n).to_string()).collect(),
        }
    }

    #[test]
    fn parses_full_header() {
        let record = Record::parse_header(1, "7,Working,Bug,Crash on save,alice,true,").unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.state, "Working");
        assert_eq!(record.issue_type, "Bug");
        assert_eq!(record.summary, "Crash on save");
        assert_eq!(record.owner.as_deref(), Some("alice"));
        assert!(record.confirmed);
        assert_eq!(record.resolution, None);
        assert!(record.notes.is_empty());
    }

    #[test]
    fn summary_may_contain_commas() {
        let record =
            Record::parse_header(1, "2,Closed,Enhancement,Faster, smaller, better,,false,WONTFIX")
                .unwrap();
        assert_eq!(record.summary, "Faster, smaller, better");
        assert_eq!(record.owner, None);
        assert_eq!(record.resolution.as_deref(), Some("WONTFIX"));
    }

    #[test]
    fn fixed_fields_are_trimmed() {
        let record = Record::parse_header(1, " 3 , New , Bug ,S, , FALSE , ").unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.state, "New");
        assert_eq!(record.issue_type, "Bug");
        assert!(!record.confirmed);
        assert_eq!(record.owner, None);
        assert_eq!(record.resolution, None);
    }

    #[rstest]
    #[case::too_few_fields("1,New,Bug,S,,false")]
    #[case::non_numeric_id("one,New,Bug,S,,false,")]
    #[case::negative_id("-1,New,Bug,S,,false,")]
    #[case::bad_confirmed_flag("1,New,Bug,S,,maybe,")]
    fn malformed_headers_are_rejected(#[case] header: &str) {
        let err = Record::parse_header(4, header).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { line_number: 4, .. }));
    }

    #[test]
    fn notes_keep_their_text_verbatim() {
        let record = Record::from_block(&block(
            "1,New,Bug,S,,false,",
            &["-[New] first", "-[Confirmed]  spaced  "],
        ))
        .unwrap();
        assert_eq!(record.notes, vec!["[New] first", "[Confirmed]  spaced  "]);
    }

    #[test]
    fn continuation_lines_join_the_previous_note() {
        let record = Record::from_block(&block(
            "1,New,Bug,S,,false,",
            &["-[New] line one", "line two"],
        ))
        .unwrap();
        assert_eq!(record.notes, vec!["[New] line one\nline two"]);
    }

    #[test]
    fn continuation_before_any_note_is_rejected() {
        let err = Record::from_block(&block("1,New,Bug,S,,false,", &["orphan"])).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { line_number: 2, .. }));
    }

    #[test]
    fn display_writes_the_stored_layout() {
        let record = Record {
            id: 14,
            state: "Verifying".to_string(),
            issue_type: "Enhancement".to_string(),
            summary: "Dark mode".to_string(),
            owner: Some("bob".to_string()),
            confirmed: false,
            resolution: Some("FIXED".to_string()),
            notes: vec!["[New] asked".to_string(), "[Working] done".to_string()],
        };
        assert_eq!(
            record.to_string(),
            "*14,Verifying,Enhancement,Dark mode,bob,false,FIXED\n-[New] asked\n-[Working] done\n"
        );
    }

    #[test]
    fn undecodable_block_is_rejected_at_the_bad_line() {
        let mut bad = block("1,New,Bug,S,,false,", &["-[New] b\u{fffd}"]);
        bad.undecodable_lines = vec![2];
        let err = Record::from_block(&bad).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { line_number: 2, .. }));
    }

    #[rstest]
    #[case::comma_in_owner(Some("a,b"), "S", &["[New] n"])]
    #[case::newline_in_owner(Some("a\nb"), "S", &["[New] n"])]
    #[case::padded_owner(Some(" bob "), "S", &["[New] n"])]
    #[case::newline_in_summary(None, "two\nlines", &["[New] n"])]
    #[case::header_injected_by_note(None, "S", &["[New] first\n*99,Closed,Bug,Injected,,false,WONTFIX"])]
    #[case::note_line_injected_by_note(None, "S", &["[New] a\n-b"])]
    #[case::blank_continuation(None, "S", &["[New] x\n\ny"])]
    #[case::trailing_newline(None, "S", &["[New] x\n"])]
    #[case::carriage_return(None, "S", &["[New] x\r"])]
    fn unwritable_records_are_detected(
        #[case] owner: Option<&str>,
        #[case] summary: &str,
        #[case] notes: &[&str],
    ) {
        assert!(writable(owner, summary, notes).validate_for_write().is_err());
    }

    #[test]
    fn multi_line_note_survives_display_and_parse() {
        let record = writable(Some("bob"), "S", &["[New] one\ntwo", "[Confirmed]  spaced  "]);
        record.validate_for_write().unwrap();

        let text = record.to_string();
        let mut lines = text.lines();
        let header = lines.next().unwrap().strip_prefix(DELIMITER).unwrap();
        let body: Vec<&str> = lines.collect();
        let parsed = Record::from_block(&block(header, &body)).unwrap();
        assert_eq!(parsed, record);
    }
}
