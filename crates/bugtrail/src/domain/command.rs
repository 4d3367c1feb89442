//! Validated, immutable instructions to change an issue.

use super::vocabulary::{CommandKind, Resolution};
use crate::error::{Error, Result};
use serde::Serialize;

/// An instruction that may advance an issue through its lifecycle.
///
/// A `Command` can only be obtained through [`Command::new`] or one of the
/// shorthand constructors, all of which enforce:
///
/// - `Assign` carries a non-empty owner,
/// - `Resolve` carries a resolution,
/// - every command carries a non-empty note.
///
/// The owner is stored trimmed; an owner that is blank after trimming is
/// treated as absent.
///
/// Whether the command is *legal* for a given issue is decided later by
/// [`Issue::apply`](super::Issue::apply).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    kind: CommandKind,
    owner: Option<String>,
    resolution: Option<Resolution>,
    note: String,
}

impl Command {
    /// Builds a command, checking its fields against its kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCommand`] when an `Assign` has no owner (or a
    /// blank one), a `Resolve` has no resolution, or the note is empty.
    pub fn new(
        kind: CommandKind,
        owner: Option<String>,
        resolution: Option<Resolution>,
        note: impl Into<String>,
    ) -> Result<Self> {
        let note = note.into();
        let owner = owner
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());

        if kind == CommandKind::Assign && owner.is_none() {
            return Err(Error::InvalidCommand(
                "assign requires a non-empty owner".to_string(),
            ));
        }
        if kind == CommandKind::Resolve && resolution.is_none() {
            return Err(Error::InvalidCommand(
                "resolve requires a resolution".to_string(),
            ));
        }
        if note.is_empty() {
            return Err(Error::InvalidCommand(format!("{kind} requires a note")));
        }

        Ok(Self {
            kind,
            owner,
            resolution,
            note,
        })
    }

    /// Shorthand for an `Assign` command.
    ///
    /// # Errors
    ///
    /// See [`Command::new`].
    pub fn assign(owner: impl Into<String>, note: impl Into<String>) -> Result<Self> {
        Self::new(CommandKind::Assign, Some(owner.into()), None, note)
    }

    /// Shorthand for a `Confirm` command.
    ///
    /// # Errors
    ///
    /// See [`Command::new`].
    pub fn confirm(note: impl Into<String>) -> Result<Self> {
        Self::new(CommandKind::Confirm, None, None, note)
    }

    /// Shorthand for a `Resolve` command.
    ///
    /// # Errors
    ///
    /// See [`Command::new`].
    pub fn resolve(resolution: Resolution, note: impl Into<String>) -> Result<Self> {
        Self::new(CommandKind::Resolve, None, Some(resolution), note)
    }

    /// Shorthand for a `Verify` command confirming a FIXED resolution.
    ///
    /// # Errors
    ///
    /// See [`Command::new`].
    pub fn verify(note: impl Into<String>) -> Result<Self> {
        Self::new(CommandKind::Verify, None, Some(Resolution::Fixed), note)
    }

    /// Shorthand for a `Reopen` command.
    ///
    /// # Errors
    ///
    /// See [`Command::new`].
    pub fn reopen(note: impl Into<String>) -> Result<Self> {
        Self::new(CommandKind::Reopen, None, None, note)
    }

    /// The command kind.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// The owner, if one was given.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// The resolution, if one was given.
    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// The note text, without any state tag.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }
}
