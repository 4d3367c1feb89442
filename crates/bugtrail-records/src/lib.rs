//! Reader and writer for the bugtrail text record format.
//!
//! A bugtrail data file holds one record per issue. Each record opens with a
//! header line introduced by `*`, followed by one line per note introduced by
//! `-`:
//!
//! ```text
//! *3,Working,Bug,Crash on save,alice,true,
//! -[New] Reported by QA
//! -[Confirmed] Reproduced on main
//! ```
//!
//! This crate knows the record *layout* only. Interpreting the state, type and
//! resolution tokens is left to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod record;
pub mod warning;
pub mod writer;

pub use atomic::{write_records_atomic, write_records_atomic_iter};
pub use error::{Error, Result};
pub use reader::{read_records_resilient, RecordBlock, RecordReader};
pub use record::{Record, DELIMITER, NOTE_MARKER};
pub use warning::{Warning, WarningCollector};
pub use writer::RecordWriter;
