//! Core domain types for bugtrail.
//!
//! An [`Issue`] moves through the lifecycle only by having a [`Command`]
//! applied to it. The legal moves live in [`transition`].

mod command;
mod issue;
pub mod transition;
mod vocabulary;

pub use command::Command;
pub use issue::{Issue, IssueId, IssueSnapshot};
pub use transition::{Change, Transition};
pub use vocabulary::{CommandKind, IssueType, Resolution, State};
