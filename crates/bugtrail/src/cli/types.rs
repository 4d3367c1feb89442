//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::{IssueType, Resolution, State};

/// Issue type for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueTypeArg {
    /// A defect
    Bug,
    /// A feature request
    #[value(alias = "enh")]
    Enhancement,
}

impl From<IssueTypeArg> for IssueType {
    fn from(arg: IssueTypeArg) -> Self {
        match arg {
            IssueTypeArg::Bug => IssueType::Bug,
            IssueTypeArg::Enhancement => IssueType::Enhancement,
        }
    }
}

/// Lifecycle state for CLI filters
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateArg {
    /// Not yet triaged
    New,
    /// Reproduced bug
    Confirmed,
    /// Owned and in progress
    Working,
    /// Fixed, awaiting verification
    Verifying,
    /// Finished
    Closed,
}

impl From<StateArg> for State {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::New => State::New,
            StateArg::Confirmed => State::Confirmed,
            StateArg::Working => State::Working,
            StateArg::Verifying => State::Verifying,
            StateArg::Closed => State::Closed,
        }
    }
}

/// Resolution for the `resolve` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionArg {
    /// The problem was fixed
    Fixed,
    /// Another issue already tracks this
    Duplicate,
    /// Will not be addressed
    #[value(name = "wontfix", alias = "wont-fix")]
    WontFix,
    /// Could not be reproduced
    #[value(name = "worksforme", alias = "works-for-me")]
    WorksForMe,
}

impl From<ResolutionArg> for Resolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Fixed => Resolution::Fixed,
            ResolutionArg::Duplicate => Resolution::Duplicate,
            ResolutionArg::WontFix => Resolution::WontFix,
            ResolutionArg::WorksForMe => Resolution::WorksForMe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fixed", Resolution::Fixed)]
    #[case("duplicate", Resolution::Duplicate)]
    #[case("wontfix", Resolution::WontFix)]
    #[case("wont-fix", Resolution::WontFix)]
    #[case("worksforme", Resolution::WorksForMe)]
    #[case("works-for-me", Resolution::WorksForMe)]
    fn resolution_names(#[case] name: &str, #[case] expected: Resolution) {
        let arg = ResolutionArg::from_str(name, false).unwrap();
        assert_eq!(Resolution::from(arg), expected);
    }

    #[test]
    fn state_names_are_lowercase() {
        let arg = StateArg::from_str("verifying", false).unwrap();
        assert_eq!(State::from(arg), State::Verifying);
        assert!(StateArg::from_str("in_progress", false).is_err());
    }

    #[test]
    fn issue_type_alias() {
        let arg = IssueTypeArg::from_str("enh", false).unwrap();
        assert_eq!(IssueType::from(arg), IssueType::Enhancement);
    }
}
