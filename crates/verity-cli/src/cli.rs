//! CLI command definitions and argument parsing.

use crate::config::{OutputFormat, Scheme};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Verity CLI - Check news text for credibility.
#[derive(Debug, Parser)]
#[command(name = "verity")]
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

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (classification only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a piece of news text
    Analyze(AnalyzeArgs),

    /// Show or clear past analyses
    History(HistoryArgs),

    /// Manage the classifier credential
    Key(KeyArgs),

    /// Manage classifier profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(conflicts_with_all = ["file", "stdin"])]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the text from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Source URL of the article
    #[arg(short, long)]
    pub url: Option<String>,

    /// Language code or name (en, ig, ha, yo, pcm)
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: Option<HistoryAction>,
}

/// History actions.
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List recent analyses, newest first
    List,

    /// Delete all history entries
    Clear,
}

/// Arguments for the key command.
#[derive(Debug, Parser)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub action: KeyAction,
}

/// Credential actions.
#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Store the credential
    Set {
        /// Credential value
        #[arg(env = "VERITY_API_KEY", hide_env_values = true)]
        key: String,
    },

    /// Show the stored credential, masked
    Show,

    /// Remove the stored credential
    Clear,
}

/// Arguments for the profile command.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show current profile
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

        /// Response scheme of the endpoint
        #[arg(long, value_enum)]
        scheme: Scheme,

        /// Endpoint URL
        #[arg(long)]
        endpoint: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}
