//! CLI argument structs for all commands.

use clap::Parser;

use super::types::{IssueTypeArg, ResolutionArg, StateArg};
use super::validators::{validate_issue_id, validate_note, validate_owner, validate_summary};
use crate::domain::IssueId;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `create` command
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// One-line summary of the issue
    #[arg(value_parser = validate_summary)]
    pub summary: String,

    /// Issue type
    #[arg(short = 't', long = "type", value_enum, default_value = "bug")]
    pub issue_type: IssueTypeArg,

    /// First note, describing the report
    #[arg(short = 'm', long, value_parser = validate_note)]
    pub note: String,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Filter by issue type
    #[arg(short = 't', long = "type", value_enum)]
    pub issue_type: Option<IssueTypeArg>,

    /// Filter by lifecycle state
    #[arg(short, long, value_enum)]
    pub state: Option<StateArg>,

    /// Filter by owner
    #[arg(short, long)]
    pub owner: Option<String>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Issue id to display
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: IssueId,
}

/// Arguments for the `assign` command
#[derive(Parser, Debug, Clone)]
pub struct AssignArgs {
    /// Issue id
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: IssueId,

    /// Who will work on the issue
    #[arg(value_parser = validate_owner)]
    pub owner: String,

    /// Note recorded with the change
    #[arg(short = 'm', long, value_parser = validate_note)]
    pub note: String,
}

/// Arguments for commands that only need an issue and a note
/// (`confirm`, `verify`, `reopen`)
#[derive(Parser, Debug, Clone)]
pub struct NoteArgs {
    /// Issue id
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: IssueId,

    /// Note recorded with the change
    #[arg(short = 'm', long, value_parser = validate_note)]
    pub note: String,
}

/// Arguments for the `resolve` command
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Issue id
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: IssueId,

    /// How the issue was resolved
    #[arg(value_enum)]
    pub resolution: ResolutionArg,

    /// Note recorded with the change
    #[arg(short = 'm', long, value_parser = validate_note)]
    pub note: String,
}

/// Arguments for the `delete` command
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Issue id to delete
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: IssueId,
}
