//! The issue entity and its invariants.

use super::command::Command;
use super::transition;
use super::vocabulary::{IssueType, Resolution, State};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Positive identifier of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(NonZeroU32);

impl IssueId {
    /// Wraps `value`, or returns `None` for 0.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// The numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IssueId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(IssueId::new)
            .ok_or_else(|| Error::InvalidIssue(format!("'{s}' is not a positive issue id")))
    }
}

/// Plain field values of an issue, used to persist and restore it.
///
/// A snapshot is not checked; [`Issue::restore`] is where the invariants
/// are enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSnapshot {
    /// Raw identifier; must be positive to restore.
    pub id: u32,
    /// Lifecycle state.
    pub state: State,
    /// Bug or enhancement.
    pub issue_type: IssueType,
    /// One-line description.
    pub summary: String,
    /// Owner; a blank value restores as no owner.
    pub owner: Option<String>,
    /// Whether the issue was ever confirmed.
    pub confirmed: bool,
    /// Resolution, if resolved.
    pub resolution: Option<Resolution>,
    /// Tagged notes, oldest first.
    pub notes: Vec<String>,
}

/// A tracked bug or enhancement.
///
/// The fields are private. Outside code can only change an issue through
/// [`Issue::apply`], which keeps every invariant listed on
/// [`Issue::check_invariants`] true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    id: IssueId,
    issue_type: IssueType,
    state: State,
    summary: String,
    owner: Option<String>,
    confirmed: bool,
    resolution: Option<Resolution>,
    notes: Vec<String>,
}

impl Issue {
    /// Creates a new issue in the `New` state.
    ///
    /// The first note becomes `"[New] <note>"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIssue`] if `id` is 0, or if `summary` or
    /// `note` is empty.
    pub fn new(
        id: u32,
        issue_type: IssueType,
        summary: impl Into<String>,
        note: impl AsRef<str>,
    ) -> Result<Self> {
        let id = IssueId::new(id)
            .ok_or_else(|| Error::InvalidIssue("issue id must be positive".to_string()))?;
        let summary = summary.into();
        let note = note.as_ref();

        if summary.trim().is_empty() {
            return Err(Error::InvalidIssue("summary cannot be empty".to_string()));
        }
        if note.is_empty() {
            return Err(Error::InvalidIssue("note cannot be empty".to_string()));
        }

        tracing::debug!(issue_id = %id, %issue_type, "Created issue");

        Ok(Self {
            id,
            issue_type,
            state: State::New,
            summary,
            owner: None,
            confirmed: false,
            resolution: None,
            notes: vec![tagged_note(State::New, note)],
        })
    }

    /// Rebuilds an issue from persisted field values.
    ///
    /// An empty owner is read as "no owner". Notes are taken as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if the id is 0, the summary is empty,
    /// there are no notes, or the fields break an invariant.
    pub fn restore(snapshot: IssueSnapshot) -> Result<Self> {
        let IssueSnapshot {
            id,
            state,
            issue_type,
            summary,
            owner,
            confirmed,
            resolution,
            notes,
        } = snapshot;

        let id = IssueId::new(id)
            .ok_or_else(|| Error::InvalidRecord("issue id must be positive".to_string()))?;
        if summary.trim().is_empty() {
            return Err(Error::InvalidRecord(format!("issue {id}: summary is empty")));
        }
        if notes.is_empty() {
            return Err(Error::InvalidRecord(format!("issue {id}: has no notes")));
        }

        let issue = Self {
            id,
            issue_type,
            state,
            summary,
            owner: owner.filter(|o| !o.trim().is_empty()),
            confirmed,
            resolution,
            notes,
        };
        issue
            .check_invariants()
            .map_err(|violation| Error::InvalidRecord(format!("issue {id}: {violation}")))?;
        Ok(issue)
    }

    /// Copies the field values out for persistence.
    #[must_use]
    pub fn snapshot(&self) -> IssueSnapshot {
        IssueSnapshot {
            id: self.id.get(),
            state: self.state,
            issue_type: self.issue_type,
            summary: self.summary.clone(),
            owner: self.owner.clone(),
            confirmed: self.confirmed,
            resolution: self.resolution,
            notes: self.notes.clone(),
        }
    }

    /// Applies a command, moving the issue through its lifecycle.
    ///
    /// On success exactly one note is appended, tagged with the state the
    /// issue was in *before* the command: `"[Working] patched the parser"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalTransition`] when the command is not legal
    /// for the current state and type. The issue is not modified.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        let transition::Transition {
            next,
            owner,
            confirmed,
            resolution,
        } = transition::plan(self, command)?;

        let origin = self.state;
        self.state = next;
        owner.apply_to(&mut self.owner);
        if let Some(confirmed) = confirmed {
            self.confirmed = confirmed;
        }
        resolution.apply_to(&mut self.resolution);
        self.notes.push(tagged_note(origin, command.note()));

        tracing::debug!(
            issue_id = %self.id,
            command = %command.kind(),
            from = %origin,
            to = %next,
            "Applied command"
        );
        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// Checks the cross-field rules every issue must satisfy.
    ///
    /// - an enhancement is never `Confirmed` and never has `confirmed` set,
    /// - a bug in `Working` is confirmed,
    /// - `Working` and `Verifying` issues have an owner,
    /// - `New` and `Confirmed` issues have no owner,
    /// - `Verifying` and `Closed` issues have a resolution, others have none,
    /// - `Verifying` always means `FIXED`,
    /// - there is at least one note.
    ///
    /// # Errors
    ///
    /// Returns a description of the first rule that does not hold.
    pub fn check_invariants(&self) -> std::result::Result<(), &'static str> {
        use State::{Closed, Confirmed, New, Verifying, Working};

        if self.issue_type == IssueType::Enhancement {
            if self.state == Confirmed {
                return Err("an enhancement cannot be in the Confirmed state");
            }
            if self.confirmed {
                return Err("an enhancement cannot be confirmed");
            }
        }
        if self.issue_type == IssueType::Bug && self.state == Working && !self.confirmed {
            return Err("a bug in the Working state must be confirmed");
        }

        let has_owner = self.owner.as_deref().is_some_and(|o| !o.trim().is_empty());
        match self.state {
            Working | Verifying if !has_owner => {
                return Err("Working and Verifying issues must have an owner");
            }
            New | Confirmed if self.owner.is_some() => {
                return Err("New and Confirmed issues cannot have an owner");
            }
            _ => {}
        }

        match (self.state, self.resolution) {
            (Verifying | Closed, None) => {
                return Err("Verifying and Closed issues must have a resolution");
            }
            (New | Confirmed | Working, Some(_)) => {
                return Err("only Verifying and Closed issues can have a resolution");
            }
            (Verifying, Some(resolution)) if resolution != Resolution::Fixed => {
                return Err("an issue in the Verifying state must be resolved as FIXED");
            }
            _ => {}
        }

        if self.notes.is_empty() {
            return Err("an issue must have at least one note");
        }
        Ok(())
    }

    /// The issue id.
    #[must_use]
    pub fn id(&self) -> IssueId {
        self.id
    }

    /// Bug or enhancement.
    #[must_use]
    pub fn issue_type(&self) -> IssueType {
        self.issue_type
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Canonical name of the current state.
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.state.as_str()
    }

    /// One-line description given at creation.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Current owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Whether the issue was ever confirmed. Never true for enhancements.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Resolution, present only in `Verifying` and `Closed`.
    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Notes in chronological order, each tagged with a state.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

fn tagged_note(state: State, note: &str) -> String {
    format!("[{state}] {note}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bug() -> Issue {
        Issue::new(1, IssueType::Bug, "Crash on save", "Reported by QA").unwrap()
    }

    fn enhancement() -> Issue {
        Issue::new(2, IssueType::Enhancement, "Dark mode", "Requested").unwrap()
    }

    fn snapshot() -> IssueSnapshot {
        IssueSnapshot {
            id: 7,
            state: State::Working,
            issue_type: IssueType::Bug,
            summary: "Summary".to_string(),
            owner: Some("ann".to_string()),
            confirmed: true,
            resolution: None,
            notes: vec!["[New] first".to_string()],
        }
    }

    #[test]
    fn new_issue_starts_clean() {
        let issue = bug();
        assert_eq!(issue.id().get(), 1);
        assert_eq!(issue.state(), State::New);
        assert_eq!(issue.state_name(), "New");
        assert_eq!(issue.summary(), "Crash on save");
        assert_eq!(issue.owner(), None);
        assert!(!issue.is_confirmed());
        assert_eq!(issue.resolution(), None);
        assert_eq!(issue.notes(), ["[New] Reported by QA"]);
    }

    #[rstest]
    #[case::zero_id(0, "Summary", "note")]
    #[case::empty_summary(1, "", "note")]
    #[case::blank_summary(1, "   ", "note")]
    #[case::empty_note(1, "Summary", "")]
    fn new_rejects_bad_arguments(#[case] id: u32, #[case] summary: &str, #[case] note: &str) {
        let err = Issue::new(id, IssueType::Bug, summary, note).unwrap_err();
        assert!(matches!(err, Error::InvalidIssue(_)), "got {err:?}");
    }

    #[test]
    fn bug_goes_through_the_full_lifecycle() {
        let mut issue = bug();
        issue.apply(&Command::confirm("Reproduced").unwrap()).unwrap();
        assert_eq!(issue.state(), State::Confirmed);
        assert!(issue.is_confirmed());

        issue.apply(&Command::assign("alice", "Taking it").unwrap()).unwrap();
        assert_eq!(issue.state(), State::Working);
        assert_eq!(issue.owner(), Some("alice"));

        issue
            .apply(&Command::resolve(Resolution::Fixed, "Patched").unwrap())
            .unwrap();
        assert_eq!(issue.state(), State::Verifying);
        assert_eq!(issue.resolution(), Some(Resolution::Fixed));

        issue.apply(&Command::verify("Looks good").unwrap()).unwrap();
        assert_eq!(issue.state(), State::Closed);
        assert_eq!(issue.owner(), Some("alice"));
        assert_eq!(issue.resolution(), Some(Resolution::Fixed));

        assert_eq!(
            issue.notes(),
            [
                "[New] Reported by QA",
                "[New] Reproduced",
                "[Confirmed] Taking it",
                "[Working] Patched",
                "[Verifying] Looks good",
            ]
        );
    }

    #[test]
    fn enhancement_is_assigned_straight_from_new() {
        let mut issue = enhancement();
        issue.apply(&Command::assign("bob", "Mine").unwrap()).unwrap();
        assert_eq!(issue.state(), State::Working);
        assert_eq!(issue.owner(), Some("bob"));
        assert!(!issue.is_confirmed());
        assert_eq!(issue.notes().last().map(String::as_str), Some("[New] Mine"));
    }

    #[test]
    fn confirming_an_enhancement_changes_nothing() {
        let mut issue = enhancement();
        let before = issue.clone();
        let err = issue.apply(&Command::confirm("Seen it").unwrap()).unwrap_err();
        assert!(matches!(err, Error::IllegalTransition { .. }));
        assert_eq!(issue, before);
    }

    #[test]
    fn fixed_cannot_close_a_new_bug() {
        let mut issue = bug();
        let before = issue.clone();
        assert!(
            issue
                .apply(&Command::resolve(Resolution::Fixed, "done").unwrap())
                .is_err()
        );
        assert_eq!(issue, before);
    }

    #[test]
    fn reopen_from_verifying_keeps_owner() {
        let mut issue = bug();
        issue.apply(&Command::confirm("c").unwrap()).unwrap();
        issue.apply(&Command::assign("alice", "a").unwrap()).unwrap();
        issue
            .apply(&Command::resolve(Resolution::Fixed, "f").unwrap())
            .unwrap();
        issue.apply(&Command::reopen("Still broken").unwrap()).unwrap();

        assert_eq!(issue.state(), State::Working);
        assert_eq!(issue.owner(), Some("alice"));
        assert_eq!(issue.resolution(), None);
        assert_eq!(
            issue.notes().last().map(String::as_str),
            Some("[Verifying] Still broken")
        );
    }

    #[test]
    fn reopen_closed_duplicate_goes_back_to_new() {
        let mut issue = bug();
        issue
            .apply(&Command::resolve(Resolution::Duplicate, "dup of #3").unwrap())
            .unwrap();
        assert_eq!(issue.state(), State::Closed);

        issue.apply(&Command::reopen("Not a dup").unwrap()).unwrap();
        assert_eq!(issue.state(), State::New);
        assert_eq!(issue.owner(), None);
        assert_eq!(issue.resolution(), None);
    }

    #[test]
    fn reopen_closed_wontfix_confirmed_bug_goes_back_to_confirmed() {
        let mut issue = bug();
        issue.apply(&Command::confirm("c").unwrap()).unwrap();
        issue
            .apply(&Command::resolve(Resolution::WontFix, "no").unwrap())
            .unwrap();
        issue.apply(&Command::reopen("Reconsider").unwrap()).unwrap();
        assert_eq!(issue.state(), State::Confirmed);
        assert!(issue.is_confirmed());
    }

    #[test]
    fn verify_after_close_is_illegal() {
        let mut issue = enhancement();
        issue.apply(&Command::assign("bob", "a").unwrap()).unwrap();
        issue
            .apply(&Command::resolve(Resolution::Fixed, "f").unwrap())
            .unwrap();
        issue.apply(&Command::verify("v").unwrap()).unwrap();
        let before = issue.clone();
        assert!(issue.apply(&Command::verify("again").unwrap()).is_err());
        assert_eq!(issue, before);
    }

    #[test]
    fn snapshot_restores_to_an_equal_issue() {
        let mut issue = bug();
        issue.apply(&Command::confirm("c").unwrap()).unwrap();
        issue.apply(&Command::assign("alice", "a").unwrap()).unwrap();
        let restored = Issue::restore(issue.snapshot()).unwrap();
        assert_eq!(restored, issue);
    }

    #[test]
    fn restore_treats_blank_owner_as_absent() {
        let mut snap = snapshot();
        snap.state = State::New;
        snap.confirmed = false;
        snap.owner = Some(String::new());
        let issue = Issue::restore(snap).unwrap();
        assert_eq!(issue.owner(), None);
    }

    #[rstest]
    #[case::zero_id(|s: &mut IssueSnapshot| s.id = 0)]
    #[case::empty_summary(|s: &mut IssueSnapshot| s.summary.clear())]
    #[case::no_notes(|s: &mut IssueSnapshot| s.notes.clear())]
    #[case::working_without_owner(|s: &mut IssueSnapshot| s.owner = None)]
    #[case::unconfirmed_working_bug(|s: &mut IssueSnapshot| s.confirmed = false)]
    #[case::working_with_resolution(|s: &mut IssueSnapshot| s.resolution = Some(Resolution::Fixed))]
    #[case::confirmed_enhancement(|s: &mut IssueSnapshot| {
        s.issue_type = IssueType::Enhancement;
        s.state = State::Confirmed;
        s.owner = None;
        s.confirmed = false;
    })]
    #[case::enhancement_with_confirmed_flag(|s: &mut IssueSnapshot| s.issue_type = IssueType::Enhancement)]
    #[case::new_with_owner(|s: &mut IssueSnapshot| s.state = State::New)]
    #[case::verifying_wontfix(|s: &mut IssueSnapshot| {
        s.state = State::Verifying;
        s.resolution = Some(Resolution::WontFix);
    })]
    #[case::closed_without_resolution(|s: &mut IssueSnapshot| s.state = State::Closed)]
    fn restore_rejects_invariant_violations(#[case] corrupt: fn(&mut IssueSnapshot)) {
        let mut snap = snapshot();
        corrupt(&mut snap);
        let err = Issue::restore(snap).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)), "got {err:?}");
    }

    #[test]
    fn issue_id_parsing() {
        assert_eq!("12".parse::<IssueId>().unwrap().get(), 12);
        assert!("0".parse::<IssueId>().is_err());
        assert!("-3".parse::<IssueId>().is_err());
        assert!("abc".parse::<IssueId>().is_err());
        assert_eq!(IssueId::new(5).unwrap().to_string(), "5");
    }
}
