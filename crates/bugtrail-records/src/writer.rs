//! Record writing operations.

use crate::error::Result;
use crate::record::Record;
use std::borrow::Borrow;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Async writer for record files.
///
/// Each record is written as its header line followed by its note lines.
/// Records are checked with [`Record::validate_for_write`] first so that a
/// file written here always reads back to the same records.
///
/// # Examples
///
/// ```no_run
/// use bugtrail_records::{Record, RecordWriter};
/// use tokio::fs::File;
///
/// # async fn example(records: Vec<Record>) -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::create("issues.txt").await?;
/// let mut writer = RecordWriter::new(file);
/// writer.write_all(&records).await?;
/// writer.flush().await?;
/// # Ok(())
/// # }
/// ```
pub struct RecordWriter<W> {
    /// Buffered writer wrapping the underlying async writer.
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> RecordWriter<W> {
    /// Creates a new `RecordWriter` wrapping the given async writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Writes a single record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`](crate::Error::InvalidFormat) if the
    /// record cannot be represented, or an I/O error from the underlying writer.
    pub async fn write(&mut self, record: &Record) -> Result<()> {
        record.validate_for_write()?;
        self.writer.write_all(record.to_string().as_bytes()).await?;
        Ok(())
    }

    /// Writes every record from an iterator, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first record that fails; see [`RecordWriter::write`].
    pub async fn write_all<T, I>(&mut self, records: I) -> Result<()>
    where
        T: Borrow<Record>,
        I: IntoIterator<Item = T>,
    {
        for record in records {
            self.write(record.borrow()).await?;
        }
        Ok(())
    }

    /// Flushes buffered data to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the flush fails.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Returns a reference to the underlying buffered writer.
    #[must_use]
    pub fn get_ref(&self) -> &BufWriter<W> {
        &self.writer
    }

    /// Consumes the writer, returning the underlying buffered writer.
    ///
    /// This does not flush. Call [`flush`](Self::flush) first.
    #[must_use]
    pub fn into_inner(self) -> BufWriter<W> {
        self.writer
    }
}
