//! Bugtrail CLI binary.

use anyhow::Result;
use bugtrail::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the bugtrail CLI.
///
/// Uses tokio's current_thread runtime; every command is a short sequence of
/// file reads and writes.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Example: RUST_LOG=bugtrail=debug,bugtrail_records=trace bugtrail list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bugtrail=info,bugtrail_records=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting bugtrail CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Bugtrail CLI completed successfully");
    Ok(())
}
