//! Enumerated vocabulary shared by commands, issues and the data file.
//!
//! Every enum here maps to one canonical external token. Those tokens are
//! what the data file stores and what JSON output shows, so they must never
//! change. Note the `WorksForMe` resolution token: unlike the other
//! resolutions it is not upper-case.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// Freshly reported, not yet triaged.
    New,
    /// A bug that has been reproduced.
    Confirmed,
    /// Someone owns the issue and is working on it.
    Working,
    /// Resolved as fixed, waiting for verification.
    Verifying,
    /// Finished. May still be reopened.
    Closed,
}

impl State {
    /// All states, in lifecycle order.
    pub const ALL: [State; 5] = [
        State::New,
        State::Confirmed,
        State::Working,
        State::Verifying,
        State::Closed,
    ];

    /// Canonical state name (`New`, `Confirmed`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            State::New => "New",
            State::Confirmed => "Confirmed",
            State::Working => "Working",
            State::Verifying => "Verifying",
            State::Closed => "Closed",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| Error::InvalidState(s.to_string()))
    }
}

/// Kind of issue. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    /// A defect.
    Bug,
    /// A feature request.
    Enhancement,
}

impl IssueType {
    /// Canonical type name (`Bug` or `Enhancement`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IssueType::Bug => "Bug",
            IssueType::Enhancement => "Enhancement",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bug" => Ok(IssueType::Bug),
            "Enhancement" => Ok(IssueType::Enhancement),
            other => Err(Error::InvalidRecord(format!("unknown issue type '{other}'"))),
        }
    }
}

/// Disposition recorded when an issue is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// The problem was fixed.
    #[serde(rename = "FIXED")]
    Fixed,
    /// Another issue already tracks this.
    #[serde(rename = "DUPLICATE")]
    Duplicate,
    /// Will not be addressed.
    #[serde(rename = "WONTFIX")]
    WontFix,
    /// Could not be reproduced.
    #[serde(rename = "WorksForMe")]
    WorksForMe,
}

impl Resolution {
    /// All resolutions.
    pub const ALL: [Resolution; 4] = [
        Resolution::Fixed,
        Resolution::Duplicate,
        Resolution::WontFix,
        Resolution::WorksForMe,
    ];

    /// Canonical resolution token (`FIXED`, `DUPLICATE`, `WONTFIX`, `WorksForMe`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Resolution::Fixed => "FIXED",
            Resolution::Duplicate => "DUPLICATE",
            Resolution::WontFix => "WONTFIX",
            Resolution::WorksForMe => "WorksForMe",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|resolution| resolution.as_str() == s)
            .ok_or_else(|| Error::InvalidRecord(format!("unknown resolution '{s}'")))
    }
}

/// Kind of command that can be applied to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Give the issue an owner.
    Assign,
    /// Mark a bug as reproduced.
    Confirm,
    /// Record a resolution.
    Resolve,
    /// Accept a fix.
    Verify,
    /// Send the issue back into the lifecycle.
    Reopen,
}

impl CommandKind {
    /// All command kinds.
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Assign,
        CommandKind::Confirm,
        CommandKind::Resolve,
        CommandKind::Verify,
        CommandKind::Reopen,
    ];

    /// Lower-case command name, as typed on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandKind::Assign => "assign",
            CommandKind::Confirm => "confirm",
            CommandKind::Resolve => "resolve",
            CommandKind::Verify => "verify",
            CommandKind::Reopen => "reopen",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidCommand(format!("unknown command '{s}'")))
    }
}
