//! An ordered, caller-owned set of issues.

use crate::domain::{Command, Issue, IssueId, IssueType, State};
use crate::error::Result;

/// Issues in insertion order, plus the counter that hands out new ids.
///
/// Ids are never reused while the collection lives: `next_id` only grows,
/// and bulk-loaded issues push it past the largest id they carry.
#[derive(Debug, Clone)]
pub struct IssueCollection {
    issues: Vec<Issue>,
    next_id: u32,
}

impl Default for IssueCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueCollection {
    /// An empty collection whose first issue will get id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a `New` issue with the next id and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIssue`](crate::error::Error::InvalidIssue) if
    /// the summary or note is empty. The counter is not advanced in that case.
    pub fn create(
        &mut self,
        issue_type: IssueType,
        summary: impl Into<String>,
        note: impl AsRef<str>,
    ) -> Result<IssueId> {
        let issue = Issue::new(self.next_id, issue_type, summary, note)?;
        let id = issue.id();
        self.issues.push(issue);
        self.next_id += 1;
        Ok(id)
    }

    /// Appends issues that already carry ids, such as ones loaded from disk.
    ///
    /// An issue whose id is already in the collection is skipped. Returns the
    /// ids that were skipped.
    pub fn add_issues(&mut self, issues: impl IntoIterator<Item = Issue>) -> Vec<IssueId> {
        let mut skipped = Vec::new();
        for issue in issues {
            let id = issue.id();
            if self.contains(id) {
                tracing::warn!(issue_id = %id, "Skipping issue with duplicate id");
                skipped.push(id);
                continue;
            }
            self.next_id = self.next_id.max(id.get().saturating_add(1));
            self.issues.push(issue);
        }
        skipped
    }

    /// Looks up an issue by id.
    #[must_use]
    pub fn get(&self, id: IssueId) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id() == id)
    }

    fn contains(&self, id: IssueId) -> bool {
        self.get(id).is_some()
    }

    /// All issues, in insertion order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues of the given type, in insertion order.
    pub fn filter_by_type(&self, issue_type: IssueType) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(move |issue| issue.issue_type() == issue_type)
    }

    /// Issues in the given state, in insertion order.
    pub fn filter_by_state(&self, state: State) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.state() == state)
    }

    /// Applies `command` to the issue with `id`.
    ///
    /// Returns `Ok(false)` without doing anything when no such issue exists.
    ///
    /// # Errors
    ///
    /// Propagates [`Issue::apply`] errors; the issue is then unchanged.
    pub fn execute(&mut self, id: IssueId, command: &Command) -> Result<bool> {
        match self.issues.iter_mut().find(|issue| issue.id() == id) {
            Some(issue) => {
                issue.apply(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes and returns the issue with `id`, if present.
    pub fn delete(&mut self, id: IssueId) -> Option<Issue> {
        let index = self.issues.iter().position(|issue| issue.id() == id)?;
        Some(self.issues.remove(index))
    }

    /// Drops every issue and resets the id counter to 1.
    pub fn clear(&mut self) {
        self.issues.clear();
        self.next_id = 1;
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when there are no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// The id the next [`create`](Self::create) will use.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueSnapshot, Resolution};
    use crate::error::Error;
    use rstest::{fixture, rstest};

    fn id(value: u32) -> IssueId {
        IssueId::new(value).unwrap()
    }

    fn loaded(value: u32) -> Issue {
        Issue::restore(IssueSnapshot {
            id: value,
            state: State::New,
            issue_type: IssueType::Enhancement,
            summary: format!("Loaded {value}"),
            owner: None,
            confirmed: false,
            resolution: None,
            notes: vec!["[New] loaded".to_string()],
        })
        .unwrap()
    }

    #[fixture]
    fn populated() -> IssueCollection {
        let mut issues = IssueCollection::new();
        issues.create(IssueType::Bug, "First bug", "n").unwrap();
        issues.create(IssueType::Enhancement, "An idea", "n").unwrap();
        issues.create(IssueType::Bug, "Second bug", "n").unwrap();
        issues
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let mut issues = IssueCollection::new();
        assert_eq!(issues.next_id(), 1);
        let first = issues.create(IssueType::Bug, "a", "n").unwrap();
        let second = issues.create(IssueType::Bug, "b", "n").unwrap();
        assert_eq!(first, id(1));
        assert_eq!(second, id(2));
        assert_eq!(issues.next_id(), 3);
    }

    #[test]
    fn failed_create_keeps_counter() {
        let mut issues = IssueCollection::new();
        assert!(matches!(
            issues.create(IssueType::Bug, "", "n"),
            Err(Error::InvalidIssue(_))
        ));
        assert_eq!(issues.next_id(), 1);
        assert!(issues.is_empty());
    }

    #[rstest]
    fn filters_keep_insertion_order(populated: IssueCollection) {
        let bugs: Vec<_> = populated
            .filter_by_type(IssueType::Bug)
            .map(Issue::summary)
            .collect();
        assert_eq!(bugs, ["First bug", "Second bug"]);
        assert_eq!(populated.filter_by_state(State::New).count(), 3);
        assert_eq!(populated.filter_by_state(State::Closed).count(), 0);
    }

    #[rstest]
    fn execute_dispatches_by_id(mut populated: IssueCollection) {
        let applied = populated
            .execute(id(1), &Command::confirm("Reproduced").unwrap())
            .unwrap();
        assert!(applied);
        assert_eq!(populated.get(id(1)).unwrap().state(), State::Confirmed);
        assert_eq!(populated.get(id(3)).unwrap().state(), State::New);
    }

    #[rstest]
    fn execute_on_missing_id_is_a_no_op(mut populated: IssueCollection) {
        let applied = populated
            .execute(id(42), &Command::confirm("x").unwrap())
            .unwrap();
        assert!(!applied);
        assert_eq!(populated.len(), 3);
    }

    #[rstest]
    fn execute_propagates_illegal_transition(mut populated: IssueCollection) {
        let err = populated
            .execute(id(2), &Command::resolve(Resolution::Fixed, "x").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::IllegalTransition { .. }));
        assert_eq!(populated.get(id(2)).unwrap().notes().len(), 1);
    }

    #[rstest]
    fn delete_removes_only_the_match(mut populated: IssueCollection) {
        let removed = populated.delete(id(2)).unwrap();
        assert_eq!(removed.summary(), "An idea");
        assert_eq!(populated.len(), 2);
        assert!(populated.delete(id(2)).is_none());
        assert_eq!(populated.next_id(), 4);
    }

    #[rstest]
    fn clear_resets_counter(mut populated: IssueCollection) {
        populated.clear();
        assert!(populated.is_empty());
        assert_eq!(populated.next_id(), 1);
    }

    #[test]
    fn add_issues_keeps_ids_and_advances_counter() {
        let mut issues = IssueCollection::new();
        let skipped = issues.add_issues([loaded(4), loaded(9), loaded(2)]);
        assert!(skipped.is_empty());
        assert_eq!(issues.next_id(), 10);

        let created = issues.create(IssueType::Bug, "fresh", "n").unwrap();
        assert_eq!(created, id(10));
        let ids: Vec<_> = issues.issues().iter().map(|i| i.id().get()).collect();
        assert_eq!(ids, [4, 9, 2, 10]);
    }

    #[test]
    fn add_issues_skips_existing_ids() {
        let mut issues = IssueCollection::new();
        issues.add_issues([loaded(1)]);
        let skipped = issues.add_issues([loaded(1), loaded(2)]);
        assert_eq!(skipped, [id(1)]);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues.get(id(1)).unwrap().summary(), "Loaded 1");
    }
}
