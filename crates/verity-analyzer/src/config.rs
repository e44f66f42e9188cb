//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;
use verity_domain::ResponseScheme;

/// Configuration for the analysis session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Maximum time to wait for the classifier (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum input text length (characters)
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_text_length() -> usize {
    20_000
}

impl AnalyzerConfig {
    /// Get the classifier timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_text_length: default_max_text_length(),
        }
    }
}

/// Where and how to reach the external classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierProfile {
    /// Response scheme the endpoint speaks
    pub scheme: ResponseScheme,

    /// Endpoint URL
    pub endpoint: String,
}

impl ClassifierProfile {
    /// Create a profile
    pub fn new(scheme: ResponseScheme, endpoint: impl Into<String>) -> Self {
        Self {
            scheme,
            endpoint: endpoint.into(),
        }
    }
}
