//! Atomic write operations for record files.
//!
//! Data is first written to a temporary file next to the target, flushed,
//! and then renamed over the target. On POSIX systems a rename within one
//! filesystem is atomic, so a crash never leaves a half-written data file.
//! A stale temporary file may be left behind; the next successful write
//! replaces it.

use crate::{Record, RecordWriter, Result};
use std::borrow::Borrow;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Atomically replaces the file at `path` with the given records.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, a record cannot
/// be written, or the rename fails. On failure the original file is unchanged.
///
/// # Examples
///
/// ```no_run
/// use bugtrail_records::{write_records_atomic, Record};
///
/// # async fn example(records: Vec<Record>) -> Result<(), Box<dyn std::error::Error>> {
/// write_records_atomic("issues.txt", &records).await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_records_atomic<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    write_records_atomic_iter(path, records.iter()).await
}

/// Atomically replaces the file at `path` with records from an iterator.
///
/// # Errors
///
/// See [`write_records_atomic`].
pub async fn write_records_atomic_iter<T, I, P>(path: P, records: I) -> Result<()>
where
    T: Borrow<Record>,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, records).await {
        // Best-effort cleanup
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    tracing::debug!(path = %path.display(), "Replaced record file");
    Ok(())
}

/// Appends `.tmp` to the file extension (or uses `tmp` when there is none).
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file<T, I>(temp_path: &Path, records: I) -> Result<()>
where
    T: Borrow<Record>,
    I: IntoIterator<Item = T>,
{
    let file = File::create(temp_path).await?;
    let mut writer = RecordWriter::new(file);
    writer.write_all(records).await?;
    writer.flush().await?;
    Ok(())
}
