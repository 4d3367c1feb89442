//! Output formatting for CLI commands.
//!
//! Every printer has a text form for people and a JSON form (`--json`) for
//! scripts. Text printers write to any [`Write`] so they can be tested
//! against a buffer.

pub mod color;

use crate::domain::Issue;
use crate::storage::LoadWarning;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};

use color::{bold, colorize_id, colorize_state, colorize_type, dimmed};

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Settings that control text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for wrapping notes.
    pub max_width: usize,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from environment variables.
    ///
    /// Reads:
    /// - `BUGTRAIL_MAX_WIDTH`: Maximum content width (default: 100)
    /// - `NO_COLOR`: Any value disables colors
    /// - `BUGTRAIL_COLOR`: Set to "0" or "false" to disable colors
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("BUGTRAIL_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "BUGTRAIL_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        // https://no-color.org/
        let use_colors = env::var_os("NO_COLOR").is_none()
            && env::var("BUGTRAIL_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_colors,
        }
    }

    /// Width available for wrapped text: the terminal width, capped at
    /// `max_width`.
    fn content_width(&self) -> usize {
        terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_WIDTH, true)
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| usize::from(w.0))
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print a list of issues in the specified format.
pub fn print_issues(issues: &[&Issue], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => write_issue_list(&mut handle, issues, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &issues),
    }
}

/// Print one issue with its full note history.
pub fn print_issue_details(issue: &Issue, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let width = config.content_width();
            write_issue_details(&mut handle, issue, width, &config)
        }
        OutputMode::Json => write_json(&mut handle, issue),
    }
}

/// Print load warnings to stderr. Prints nothing when there are none.
pub fn print_load_warnings(warnings: &[LoadWarning]) -> io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }
    let config = OutputConfig::from_env();
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    writeln!(
        handle,
        "{} {} record(s) could not be loaded:",
        warning("warning:", &config),
        warnings.len()
    )?;
    for item in warnings {
        writeln!(handle, "  {item}")?;
    }
    Ok(())
}

/// Print a JSON-formatted result for any serializable value.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn write_issue_list<W: Write>(
    w: &mut W,
    issues: &[&Issue],
    config: &OutputConfig,
) -> io::Result<()> {
    if issues.is_empty() {
        writeln!(w, "No issues found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} issue(s):", issues.len())?;
    writeln!(w)?;

    for issue in issues {
        let owner = issue
            .owner()
            .map(|o| format!("  {} {o}", dimmed("@", config)))
            .unwrap_or_default();
        writeln!(
            w,
            "{}  {:<11}  {:<11}  {}{owner}",
            colorize_id(issue.id(), config),
            colorize_type(issue.issue_type(), config),
            colorize_state(issue.state(), config),
            issue.summary(),
        )?;
    }

    Ok(())
}

fn write_issue_details<W: Write>(
    w: &mut W,
    issue: &Issue,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}: {}", colorize_id(issue.id(), config), issue.summary())?;
    writeln!(
        w,
        "{} {}    {} {}",
        dimmed("Type:", config),
        colorize_type(issue.issue_type(), config),
        dimmed("State:", config),
        colorize_state(issue.state(), config),
    )?;

    if let Some(owner) = issue.owner() {
        writeln!(w, "{} {owner}", dimmed("Owner:", config))?;
    }
    if issue.is_confirmed() {
        writeln!(w, "{} yes", dimmed("Confirmed:", config))?;
    }
    if let Some(resolution) = issue.resolution() {
        writeln!(w, "{} {resolution}", dimmed("Resolution:", config))?;
    }

    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Notes", config), issue.notes().len())?;
    for note in issue.notes() {
        let mut lines = wrap_text(note, width.saturating_sub(4)).into_iter();
        if let Some(first) = lines.next() {
            writeln!(w, "  - {first}")?;
        }
        for line in lines {
            writeln!(w, "    {line}")?;
        }
    }

    Ok(())
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}
