//! Command execution logic.

use anyhow::Result;

use super::args::{
    AssignArgs, CreateArgs, DeleteArgs, InfoArgs, InitArgs, ListArgs, NoteArgs, ResolveArgs,
    ShowArgs,
};
use crate::app::App;
use crate::domain::{Command, Issue, IssueId, IssueType, State};
use crate::error::Error;
use crate::output::{self, OutputConfig, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir).await?;

    if !args.quiet {
        println!("Initialized bugtrail in {}", result.bugtrail_dir.display());
        println!("  Config: {}", result.config_file.display());
        println!("  Issues: {}", result.issues_file.display());
    }

    Ok(())
}

/// Execute the info command
pub fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let collection = app.collection();
    let counts: Vec<(State, usize)> = State::ALL
        .into_iter()
        .map(|state| (state, collection.filter_by_state(state).count()))
        .collect();
    let data_file = app
        .backend()
        .data_path()
        .map(|p| p.display().to_string());

    match output_mode {
        OutputMode::Json => {
            let by_state: serde_json::Map<String, serde_json::Value> = counts
                .iter()
                .map(|(state, count)| (state.as_str().to_string(), (*count).into()))
                .collect();
            output::print_json(&serde_json::json!({
                "bugtrail_dir": app.bugtrail_dir().display().to_string(),
                "data_file": data_file,
                "next_id": collection.next_id(),
                "warnings": app.warnings().len(),
                "issues": {
                    "total": collection.len(),
                    "by_state": by_state,
                }
            }))?;
        }
        OutputMode::Text => {
            println!("Bugtrail Repository Information");
            println!("===============================");
            println!();
            println!("Directory:  {}", app.bugtrail_dir().display());
            println!(
                "Data file:  {}",
                data_file.as_deref().unwrap_or("(in memory)")
            );
            println!("Next id:    {}", collection.next_id());
            println!();
            let breakdown: Vec<String> = counts
                .iter()
                .map(|(state, count)| format!("{count} {state}"))
                .collect();
            println!(
                "Issues: {} total ({})",
                collection.len(),
                breakdown.join(", ")
            );
            output::print_load_warnings(app.warnings())?;
        }
    }

    Ok(())
}

/// Execute the create command
pub async fn execute_create(app: &mut App, args: &CreateArgs, output_mode: OutputMode) -> Result<()> {
    let id = app
        .collection_mut()
        .create(args.issue_type.into(), args.summary.as_str(), &args.note)?;
    app.save().await?;

    let issue = lookup(app, id)?;
    match output_mode {
        OutputMode::Json => output::print_json(issue)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{} {id}: {}",
                output::success("Created issue", &config),
                issue.summary()
            );
        }
    }

    Ok(())
}

/// Execute the list command
pub fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let issues: Vec<&Issue> = app
        .collection()
        .issues()
        .iter()
        .filter(|issue| {
            args.issue_type
                .is_none_or(|t| issue.issue_type() == IssueType::from(t))
        })
        .filter(|issue| args.state.is_none_or(|s| issue.state() == State::from(s)))
        .filter(|issue| {
            args.owner
                .as_deref()
                .is_none_or(|owner| issue.owner() == Some(owner))
        })
        .collect();

    output::print_issues(&issues, output_mode)?;
    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    output::print_issue_details(lookup(app, args.issue_id)?, output_mode)?;
    Ok(())
}

/// Execute the assign command
pub async fn execute_assign(app: &mut App, args: &AssignArgs, output_mode: OutputMode) -> Result<()> {
    let command = Command::assign(args.owner.as_str(), args.note.as_str())?;
    apply_command(app, args.issue_id, &command, output_mode).await
}

/// Execute the confirm command
pub async fn execute_confirm(app: &mut App, args: &NoteArgs, output_mode: OutputMode) -> Result<()> {
    let command = Command::confirm(args.note.as_str())?;
    apply_command(app, args.issue_id, &command, output_mode).await
}

/// Execute the resolve command
pub async fn execute_resolve(
    app: &mut App,
    args: &ResolveArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let command = Command::resolve(args.resolution.into(), args.note.as_str())?;
    apply_command(app, args.issue_id, &command, output_mode).await
}

/// Execute the verify command
pub async fn execute_verify(app: &mut App, args: &NoteArgs, output_mode: OutputMode) -> Result<()> {
    let command = Command::verify(args.note.as_str())?;
    apply_command(app, args.issue_id, &command, output_mode).await
}

/// Execute the reopen command
pub async fn execute_reopen(app: &mut App, args: &NoteArgs, output_mode: OutputMode) -> Result<()> {
    let command = Command::reopen(args.note.as_str())?;
    apply_command(app, args.issue_id, &command, output_mode).await
}

/// Execute the delete command
pub async fn execute_delete(app: &mut App, args: &DeleteArgs, output_mode: OutputMode) -> Result<()> {
    let issue = app
        .collection_mut()
        .delete(args.issue_id)
        .ok_or(Error::IssueNotFound(args.issue_id))?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "deleted": issue.id(),
        }))?,
        OutputMode::Text => println!("Deleted issue {}: {}", issue.id(), issue.summary()),
    }

    Ok(())
}

/// Applies a command to one issue, saves, and reports the new state.
///
/// Nothing is saved when the command is rejected.
async fn apply_command(
    app: &mut App,
    id: IssueId,
    command: &Command,
    output_mode: OutputMode,
) -> Result<()> {
    let before = lookup(app, id)?.state();
    app.collection_mut().execute(id, command)?;
    app.save().await?;

    let issue = lookup(app, id)?;
    match output_mode {
        OutputMode::Json => output::print_json(issue)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{} issue {id}: {before} -> {}",
                output::success("Updated", &config),
                issue.state()
            );
        }
    }

    Ok(())
}

fn lookup(app: &App, id: IssueId) -> crate::error::Result<&Issue> {
    app.collection().get(id).ok_or(Error::IssueNotFound(id))
}
