//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a new bugtrail repository
//! - `info`: Show repository information
//! - `create`: Report a new bug or enhancement
//! - `list`: List issues with optional filters
//! - `show`: Show an issue and its notes
//! - `assign`, `confirm`, `resolve`, `verify`, `reopen`: Move an issue
//!   through its lifecycle
//! - `delete`: Delete an issue
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! bugtrail create "Crash on save" --type bug -m "Reported by QA"
//! bugtrail confirm 1 -m "Reproduced on 1.2"
//! bugtrail assign 1 alice -m "Taking it"
//! bugtrail resolve 1 fixed -m "Patched the writer"
//! bugtrail verify 1 -m "Confirmed in nightly"
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    AssignArgs, CreateArgs, DeleteArgs, InfoArgs, InitArgs, ListArgs, NoteArgs, ResolveArgs,
    ShowArgs,
};
pub use types::{IssueTypeArg, ResolutionArg, StateArg};
pub use validators::{validate_issue_id, validate_note, validate_owner, validate_summary};

/// Bugtrail - a small issue tracker with a bug/enhancement lifecycle
///
/// Issues are stored in `.bugtrail/issues.txt`, a plain text file that is
/// easy to keep under version control.
#[derive(Parser, Debug)]
#[command(name = "bugtrail")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new bugtrail repository
    ///
    /// Creates the `.bugtrail/` directory with configuration and an empty
    /// data file.
    Init(InitArgs),

    /// Show repository information and issue counts per state
    Info(InfoArgs),

    /// Report a new issue
    ///
    /// The issue starts in the New state with the given note.
    Create(CreateArgs),

    /// List issues with optional filters
    List(ListArgs),

    /// Show an issue with its full note history
    Show(ShowArgs),

    /// Give an issue an owner
    ///
    /// Confirmed bugs and new enhancements move to Working.
    Assign(AssignArgs),

    /// Confirm that a new bug can be reproduced
    Confirm(NoteArgs),

    /// Record a resolution
    ///
    /// FIXED moves a Working issue to Verifying; other resolutions close it.
    Resolve(ResolveArgs),

    /// Accept the fix of an issue in Verifying
    Verify(NoteArgs),

    /// Send a Verifying or Closed issue back into the lifecycle
    Reopen(NoteArgs),

    /// Delete an issue permanently
    Delete(DeleteArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns any error raised while opening the repository or running
    /// the command.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Bugtrail issue tracker");
            println!("Use --help for more information");
            return Ok(());
        };

        if let Commands::Init(args) = command {
            return execute::execute_init(args).await;
        }

        let mut app = App::from_directory(&std::env::current_dir()?).await?;
        match command {
            Commands::Init(_) => Ok(()),
            Commands::Info(args) => execute::execute_info(&app, args, output_mode),
            Commands::Create(args) => execute::execute_create(&mut app, args, output_mode).await,
            Commands::List(args) => execute::execute_list(&app, args, output_mode),
            Commands::Show(args) => execute::execute_show(&app, args, output_mode),
            Commands::Assign(args) => execute::execute_assign(&mut app, args, output_mode).await,
            Commands::Confirm(args) => execute::execute_confirm(&mut app, args, output_mode).await,
            Commands::Resolve(args) => execute::execute_resolve(&mut app, args, output_mode).await,
            Commands::Verify(args) => execute::execute_verify(&mut app, args, output_mode).await,
            Commands::Reopen(args) => execute::execute_reopen(&mut app, args, output_mode).await,
            Commands::Delete(args) => execute::execute_delete(&mut app, args, output_mode).await,
        }
    }
}
