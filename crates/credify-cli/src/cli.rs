//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Credify CLI - Check claims against the fact-checking service.
#[derive(Debug, Parser)]
#[command(name = "credify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Service base URL (overrides the profile)
    #[arg(long, global = true, env = "CREDIFY_API_URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Rich terminal output (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdicts or ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a claim
    Verify(VerifyArgs),

    /// List past verification results
    History(HistoryArgs),

    /// Show one past verification result
    Show(ShowArgs),

    /// Check that the service is reachable
    Health,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Claim text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub claim: Vec<String>,
}

impl VerifyArgs {
    /// The claim as one string.
    pub fn text(&self) -> String {
        self.claim.join(" ")
    }
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Maximum number of records (defaults to the profile's history limit)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Record id
    pub id: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Service base URL
        #[arg(short, long)]
        url: String,
        /// Records fetched by `history`
        #[arg(short = 'l', long)]
        history_limit: Option<usize>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::try_parse_from(["credify"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_verify_command_joins_words() {
        let cli = Cli::try_parse_from(["credify", "verify", "The", "Earth", "is", "flat"]).unwrap();
        match cli.command {
            Some(Command::Verify(args)) => assert_eq!(args.text(), "The Earth is flat"),
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_verify_requires_text() {
        assert!(Cli::try_parse_from(["credify", "verify"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "credify",
            "history",
            "--limit",
            "5",
            "--format",
            "json",
            "--api-url",
            "http://localhost:8000",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8000"));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Some(Command::History(args)) => assert_eq!(args.limit, Some(5)),
            _ => panic!("Expected History command"),
        }
    }

    #[test]
    fn test_profile_set() {
        let cli = Cli::try_parse_from([
            "credify", "profile", "set", "local", "--url", "http://localhost:8000", "-l", "20",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Profile(ProfileArgs {
                action: ProfileAction::Set { name, url, history_limit },
            })) => {
                assert_eq!(name, "local");
                assert_eq!(url, "http://localhost:8000");
                assert_eq!(history_limit, Some(20));
            }
            _ => panic!("Expected Profile Set command"),
        }
    }
}
