//! Command-line interface definitions for the econews agent.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. The binary exposes the two pipelines as independent subcommands,
//! plus an optional interval flag that turns a one-shot run into a
//! fixed-period loop.

use clap::{Parser, Subcommand};

/// Command-line arguments for the econews agent.
///
/// # Examples
///
/// ```sh
/// # Store the latest macro headlines
/// econews_agent ingest
///
/// # Store bitcoin headlines instead
/// econews_agent ingest --category bitcoin
///
/// # Compile and email the database report
/// econews_agent report
///
/// # Email the report once a day
/// econews_agent --every-hours 24 report
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Re-run the selected command every N hours instead of exiting
    #[arg(long)]
    pub every_hours: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// The two independent pipelines the agent can run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch finance headlines for a category and store them
    Ingest {
        /// Category key selecting the canned search phrase
        #[arg(short, long, default_value = "macro")]
        category: String,
    },
    /// Compile the two-table HTML report and email it
    Report,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_default_category() {
        let cli = Cli::parse_from(["econews_agent", "ingest"]);
        match cli.command {
            Command::Ingest { category } => assert_eq!(category, "macro"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.every_hours.is_none());
    }

    #[test]
    fn test_ingest_explicit_category() {
        let cli = Cli::parse_from(["econews_agent", "ingest", "--category", "bitcoin"]);
        match cli.command {
            Command::Ingest { category } => assert_eq!(category, "bitcoin"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_report_with_interval() {
        let cli = Cli::parse_from(["econews_agent", "--every-hours", "24", "report"]);
        assert!(matches!(cli.command, Command::Report));
        assert_eq!(cli.every_hours, Some(24));
    }
}
