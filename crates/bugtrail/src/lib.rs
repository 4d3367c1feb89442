//! Bugtrail - a small issue tracker built around a lifecycle state machine.
//!
//! Issues are bugs or enhancements that move through a fixed lifecycle
//! (`New` → `Confirmed`/`Working` → `Verifying` → `Closed`, with reopen paths)
//! in response to [`Command`](domain::Command)s. This crate provides both the
//! library and the `bugtrail` CLI.
//!
//! # Example
//!
//! ```
//! use bugtrail::collection::IssueCollection;
//! use bugtrail::domain::{Command, IssueType, Resolution, State};
//!
//! # fn main() -> bugtrail::error::Result<()> {
//! let mut issues = IssueCollection::new();
//! let id = issues.create(IssueType::Bug, "Crash on save", "Reported by QA")?;
//!
//! issues.execute(id, &Command::confirm("Reproduced")?)?;
//! issues.execute(id, &Command::assign("alice", "Taking it")?)?;
//! issues.execute(id, &Command::resolve(Resolution::Fixed, "Patched")?)?;
//!
//! let issue = issues.get(id).expect("issue exists");
//! assert_eq!(issue.state(), State::Verifying);
//! assert_eq!(issue.notes().len(), 4);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod collection;
pub mod domain;
pub mod error;
pub mod storage;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub mod app;
pub mod output;
