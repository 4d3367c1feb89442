//! Record reading operations.
//!
//! This module provides async functionality for reading record files
//! line-by-line with line number tracking for error reporting, plus a
//! resilient stream that skips malformed records instead of failing.

use crate::error::{Error, Result};
use crate::record::{Record, DELIMITER};
use crate::warning::{Warning, WarningCollector};
use futures::stream::{self, Stream, StreamExt};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// The raw lines of one record, before any field is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBlock {
    /// 1-based line number of the header line.
    pub line_number: usize,
    /// Header text with the leading `*` removed.
    pub header: String,
    /// Non-blank lines following the header, with their line numbers.
    pub body: Vec<(usize, String)>,
    /// Lines of this block that were not valid UTF-8.
    ///
    /// Such lines are decoded lossily so the block boundaries stay intact,
    /// but the record built from the block is rejected.
    pub undecodable_lines: Vec<usize>,
}

/// Async reader for record files.
///
/// `RecordReader` wraps an async reader and splits its content into
/// [`RecordBlock`]s. Each block starts at a line beginning with `*` and runs
/// until the next such line. Non-blank lines that appear before the first
/// header are skipped and remembered so the caller can report them.
///
/// Lines are read as raw bytes and decoded one at a time, so a line that is
/// not valid UTF-8 only spoils the block it belongs to.
///
/// # Examples
///
/// ```no_run
/// use bugtrail_records::RecordReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("issues.txt").await?;
/// let mut reader = RecordReader::new(file);
/// while let Some(record) = reader.read_record().await? {
///     println!("{} has {} notes", record.id, record.notes.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct RecordReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Current line number (1-based counting, 0 before any lines are read).
    line_number: usize,
    /// Header line read while finishing the previous block.
    pending_header: Option<(usize, String, bool)>,
    /// Line numbers of stray lines not yet handed to the caller.
    skipped_lines: Vec<usize>,
}

impl<R: AsyncRead + Unpin> RecordReader<R> {
    /// Creates a new `RecordReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            pending_header: None,
            skipped_lines: Vec::new(),
        }
    }

    /// Returns the 1-based number of the last line read, or 0 before any read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Takes the line numbers of stray lines skipped since the last call.
    pub fn take_skipped_lines(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.skipped_lines)
    }

    /// Reads one line, stripping the trailing `\n` or `\r\n`.
    ///
    /// The flag is `false` when the line was not valid UTF-8 and had to be
    /// decoded lossily.
    async fn read_line(&mut self) -> Result<Option<(String, bool)>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes).await? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        match String::from_utf8(bytes) {
            Ok(line) => Ok(Some((line, true))),
            Err(e) => {
                tracing::debug!(line_number = self.line_number, "Line is not valid UTF-8");
                Ok(Some((String::from_utf8_lossy(e.as_bytes()).into_owned(), false)))
            }
        }
    }

    /// Reads the next record block, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying reader fails.
    pub async fn read_block(&mut self) -> Result<Option<RecordBlock>> {
        let mut undecodable_lines = Vec::new();
        let (line_number, header) = loop {
            let (number, line, valid) = match self.pending_header.take() {
                Some(pending) => pending,
                None => match self.read_line().await? {
                    Some((line, valid)) => (self.line_number, line, valid),
                    None => return Ok(None),
                },
            };
            if let Some(header) = line.strip_prefix(DELIMITER) {
                if !valid {
                    undecodable_lines.push(number);
                }
                break (number, header.to_string());
            }
            if !line.trim().is_empty() {
                tracing::debug!(line_number = number, "Skipping line outside of any record");
                self.skipped_lines.push(number);
            }
        };

        let mut body = Vec::new();
        while let Some((line, valid)) = self.read_line().await? {
            if line.starts_with(DELIMITER) {
                self.pending_header = Some((self.line_number, line, valid));
                break;
            }
            if !valid {
                undecodable_lines.push(self.line_number);
            }
            if !line.trim().is_empty() {
                body.push((self.line_number, line));
            }
        }

        Ok(Some(RecordBlock {
            line_number,
            header,
            body,
            undecodable_lines,
        }))
    }

    /// Reads and parses the next record, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and on the first malformed record.
    pub async fn read_record(&mut self) -> Result<Option<Record>> {
        match self.read_block().await? {
            Some(block) => Record::from_block(&block).map(Some),
            None => Ok(None),
        }
    }

    /// Converts the reader into a stream of well-formed records.
    ///
    /// Malformed records (including ones with undecodable bytes) and stray
    /// lines are reported to `collector` and skipped. An I/O error from the
    /// underlying reader ends the stream after being reported as
    /// [`Warning::ReadFailed`].
    pub fn stream_resilient(self, collector: WarningCollector) -> impl Stream<Item = Record> {
        stream::unfold(Some(self), move |state| {
            let collector = collector.clone();
            async move {
                let mut reader = state?;
                loop {
                    let next = reader.read_block().await;
                    for line_number in reader.take_skipped_lines() {
                        collector.add(Warning::SkippedLine {
                            line_number,
                            reason: "line is outside of any record".to_string(),
                        });
                    }
                    match next {
                        Ok(Some(block)) => match Record::from_block(&block) {
                            Ok(record) => return Some((record, Some(reader))),
                            Err(e) => collector.add(Warning::MalformedRecord {
                                line_number: block.line_number,
                                error: e.to_string(),
                            }),
                        },
                        Ok(None) => return None,
                        Err(e) => {
                            collector.add(Warning::ReadFailed {
                                line_number: reader.line_number() + 1,
                                error: e.to_string(),
                            });
                            return None;
                        }
                    }
                }
            }
        })
    }
}

/// Reads every well-formed record from a file, collecting warnings for the rest.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened. A missing file surfaces
/// as an I/O error of kind [`std::io::ErrorKind::NotFound`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> bugtrail_records::Result<()> {
/// let (records, warnings) = bugtrail_records::read_records_resilient("issues.txt").await?;
/// for warning in &warnings {
///     eprintln!("{warning}");
/// }
/// println!("loaded {} records", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn read_records_resilient<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<Record>, Vec<Warning>)> {
    let path = path.as_ref();
    let file = File::open(path).await.map_err(Error::Io)?;
    let collector = WarningCollector::new();

    let records: Vec<Record> = RecordReader::new(file)
        .stream_resilient(collector.clone())
        .collect()
        .await;

    let warnings = collector.into_warnings();
    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        warnings = warnings.len(),
        "Read record file"
    );
    Ok((records, warnings))
}
