//! Verity CLI library.
//!
//! Configuration, command execution and output formatting for the `verity`
//! command-line front end to the analysis pipeline.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
