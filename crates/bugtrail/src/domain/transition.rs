//! The issue lifecycle transition table.
//!
//! [`plan`] looks at an issue and a command and decides, without touching the
//! issue, what the next state and field values would be. [`Issue::apply`]
//! commits a planned [`Transition`]; an illegal command never reaches the
//! commit step, so a rejected command leaves the issue exactly as it was.
//!
//! | From      | Command | Guard                                         | To        |
//! |-----------|---------|-----------------------------------------------|-----------|
//! | New       | confirm | bug                                           | Confirmed |
//! | New       | assign  | enhancement                                   | Working   |
//! | New       | resolve | not FIXED; not WorksForMe on an enhancement   | Closed    |
//! | Confirmed | assign  |                                               | Working   |
//! | Confirmed | resolve | WONTFIX                                       | Closed    |
//! | Working   | resolve | FIXED                                         | Verifying |
//! | Working   | resolve | DUPLICATE, WONTFIX, or WorksForMe on a bug    | Closed    |
//! | Verifying | verify  | command resolution FIXED                      | Closed    |
//! | Verifying | reopen  |                                               | Working   |
//! | Closed    | reopen  | owner kept and allowed to work                | Working   |
//! | Closed    | reopen  | no owner, confirmed bug                       | Confirmed |
//! | Closed    | reopen  | otherwise                                     | New       |
//!
//! Every other pairing is an [`Error::IllegalTransition`].

use super::command::Command;
use super::issue::Issue;
use super::vocabulary::{CommandKind, IssueType, Resolution, State};
use crate::error::{Error, Result};

/// What happens to an optional field during a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T> {
    /// Leave the current value.
    Keep,
    /// Replace the current value.
    Set(T),
    /// Remove the current value.
    Clear,
}

impl<T> Change<T> {
    pub(crate) fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Change::Keep => {}
            Change::Set(value) => *slot = Some(value),
            Change::Clear => *slot = None,
        }
    }
}

/// A legal transition, planned but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State the issue moves to.
    pub next: State,
    /// Effect on the owner.
    pub owner: Change<String>,
    /// New confirmation flag, if it changes.
    pub confirmed: Option<bool>,
    /// Effect on the resolution.
    pub resolution: Change<Resolution>,
}

impl Transition {
    fn to(next: State) -> Self {
        Self {
            next,
            owner: Change::Keep,
            confirmed: None,
            resolution: Change::Keep,
        }
    }

    fn owner(mut self, owner: &str) -> Self {
        self.owner = Change::Set(owner.to_string());
        self
    }

    fn clear_owner(mut self) -> Self {
        self.owner = Change::Clear;
        self
    }

    fn confirm(mut self) -> Self {
        self.confirmed = Some(true);
        self
    }

    fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Change::Set(resolution);
        self
    }

    fn clear_resolution(mut self) -> Self {
        self.resolution = Change::Clear;
        self
    }
}

/// Decides the transition `command` would cause on `issue`.
///
/// # Errors
///
/// Returns [`Error::IllegalTransition`] when the command is not legal for the
/// issue's current state and type.
pub fn plan(issue: &Issue, command: &Command) -> Result<Transition> {
    use CommandKind::{Assign, Confirm, Reopen, Resolve, Verify};
    use State::{Closed, Confirmed, New, Verifying, Working};

    let reject = |reason: &'static str| Error::IllegalTransition {
        state: issue.state(),
        issue_type: issue.issue_type(),
        command: command.kind(),
        reason,
    };

    match (issue.state(), command.kind()) {
        (New, Confirm) => match issue.issue_type() {
            IssueType::Bug => Ok(Transition::to(Confirmed).confirm()),
            IssueType::Enhancement => Err(reject("enhancements are never confirmed")),
        },
        (New, Assign) => match issue.issue_type() {
            IssueType::Enhancement => Ok(Transition::to(Working).owner(required_owner(command)?)),
            IssueType::Bug => Err(reject("a bug must be confirmed before it is assigned")),
        },
        (New, Resolve) => match (required_resolution(command)?, issue.issue_type()) {
            (Resolution::Fixed, _) => Err(reject("nothing has been fixed yet")),
            (Resolution::WorksForMe, IssueType::Enhancement) => {
                Err(reject("WorksForMe only applies to bugs"))
            }
            (resolution, _) => Ok(Transition::to(Closed).resolution(resolution)),
        },

        (Confirmed, Assign) => Ok(Transition::to(Working).owner(required_owner(command)?)),
        (Confirmed, Resolve) => match required_resolution(command)? {
            Resolution::WontFix => Ok(Transition::to(Closed).resolution(Resolution::WontFix)),
            _ => Err(reject("a confirmed issue can only be resolved as WONTFIX")),
        },

        (Working, Resolve) => match (required_resolution(command)?, issue.issue_type()) {
            (Resolution::Fixed, _) => Ok(Transition::to(Verifying).resolution(Resolution::Fixed)),
            (Resolution::WorksForMe, IssueType::Enhancement) => {
                Err(reject("WorksForMe only applies to bugs"))
            }
            (resolution, _) => Ok(Transition::to(Closed).resolution(resolution)),
        },

        (Verifying, Verify) => {
            let fix_claimed = command.resolution() == Some(Resolution::Fixed);
            if fix_claimed && issue.resolution() == Some(Resolution::Fixed) {
                Ok(Transition::to(Closed))
            } else {
                Err(reject("only a FIXED resolution can be verified"))
            }
        }
        (Verifying, Reopen) => Ok(Transition::to(Working).clear_resolution()),

        (Closed, Reopen) => Ok(reopen_closed(issue)),

        (_, Assign | Confirm | Resolve | Verify | Reopen) => {
            Err(reject("the command is not accepted in this state"))
        }
    }
}

/// Routes a closed issue back into the lifecycle.
///
/// An owner means the issue had reached `Working`, so it goes back there.
/// A bug that was never confirmed cannot be `Working`, so if one somehow
/// carries an owner it drops the owner and restarts at `New`.
fn reopen_closed(issue: &Issue) -> Transition {
    let confirmed_bug = issue.issue_type() == IssueType::Bug && issue.is_confirmed();
    let may_work = issue.issue_type() == IssueType::Enhancement || issue.is_confirmed();

    if issue.owner().is_some() && may_work {
        Transition::to(State::Working).clear_resolution()
    } else if confirmed_bug {
        Transition::to(State::Confirmed)
            .clear_owner()
            .clear_resolution()
    } else {
        Transition::to(State::New).clear_owner().clear_resolution()
    }
}

fn required_owner(command: &Command) -> Result<&str> {
    command
        .owner()
        .ok_or_else(|| Error::InvalidCommand("assign requires a non-empty owner".to_string()))
}

fn required_resolution(command: &Command) -> Result<Resolution> {
    command
        .resolution()
        .ok_or_else(|| Error::InvalidCommand("resolve requires a resolution".to_string()))
}
