//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] verity_store::StoreError),

    /// Analysis rejected or failed
    #[error("{0}")]
    Analysis(#[from] verity_analyzer::AnalysisError),

    /// Analysis finished in the failed state
    #[error("{0}")]
    Failed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line editor error
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Operation not permitted
    #[error("Not permitted: {0}")]
    NotPermitted(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
