//! Error types for the analysis pipeline

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while analyzing a piece of news
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// No usable classifier configuration (usually a missing credential)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure or non-success status from the classifier
    #[error("{0}")]
    Transport(String),

    /// Classifier answered with something that cannot be trusted
    #[error("Invalid response from API: {0}")]
    UpstreamFormat(String),

    /// Classifier did not answer in time
    #[error("Analysis timed out after {0:?}")]
    Timeout(Duration),

    /// The pending analysis was abandoned by the user
    #[error("Analysis cancelled")]
    Cancelled,

    /// Another analysis is still pending
    #[error("An analysis is already in progress")]
    Busy,
}

impl AnalysisError {
    /// True for errors raised before the session left its current state
    pub fn is_rejection(&self) -> bool {
        matches!(self, AnalysisError::Validation(_) | AnalysisError::Busy)
    }
}
