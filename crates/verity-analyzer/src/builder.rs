//! Outbound request construction
//!
//! Pure construction: reads the stored credential, never touches the network.

use crate::config::{AnalyzerConfig, ClassifierProfile};
use crate::error::AnalysisError;
use crate::prompt::PromptBuilder;
use serde_json::json;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;
use verity_domain::traits::PersistentStore;
use verity_domain::{AnalysisRequest, HttpMethod, OutboundRequest, ResponseScheme};
use verity_store::CredentialStore;

/// Message shown when the user submits nothing
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to verify.";

/// Turns user input and configuration into a ready-to-send request
pub struct RequestBuilder<S> {
    credentials: CredentialStore<S>,
    profile: ClassifierProfile,
    max_text_length: usize,
}

impl<S> RequestBuilder<S>
where
    S: PersistentStore,
    S::Error: Display,
{
    /// Create a builder reading its credential from `store`
    pub fn new(store: Arc<S>, profile: ClassifierProfile, config: &AnalyzerConfig) -> Self {
        Self {
            credentials: CredentialStore::new(store),
            profile,
            max_text_length: config.max_text_length,
        }
    }

    /// The credential store this builder reads from
    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    /// The classifier this builder targets
    pub fn profile(&self) -> &ClassifierProfile {
        &self.profile
    }

    /// Check the input without looking at configuration
    pub fn validate(&self, request: &AnalysisRequest) -> Result<(), AnalysisError> {
        if request.is_blank() {
            return Err(AnalysisError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }
        let length = request.trimmed_text().chars().count();
        if length > self.max_text_length {
            return Err(AnalysisError::Validation(format!(
                "Text too long: {} chars (max: {})",
                length, self.max_text_length
            )));
        }
        Ok(())
    }

    /// Build the outbound request for `request`
    ///
    /// # Errors
    ///
    /// - `Validation` when the text is empty, whitespace-only, or too long
    /// - `Configuration` when no credential is stored
    pub fn build(&self, request: &AnalysisRequest) -> Result<OutboundRequest, AnalysisError> {
        self.validate(request)?;

        let key = self.credentials.get().ok_or_else(|| {
            AnalysisError::Configuration(
                "API key is not set. Enter one before verifying news.".to_string(),
            )
        })?;

        let text = request.trimmed_text();
        let outbound = match self.profile.scheme {
            ResponseScheme::TagCode => OutboundRequest {
                scheme: ResponseScheme::TagCode,
                method: HttpMethod::Get,
                endpoint: self.profile.endpoint.clone(),
                query: vec![
                    ("key".to_string(), key),
                    ("txt".to_string(), text.to_string()),
                    ("lang".to_string(), request.language.code().to_string()),
                ],
                body: None,
            },
            ResponseScheme::Generative => {
                let prompt = PromptBuilder::new(text, request.language)
                    .with_source(request.url.clone())
                    .build();
                let body = json!({
                    "contents": [{ "parts": [{ "text": prompt }] }]
                });
                OutboundRequest {
                    scheme: ResponseScheme::Generative,
                    method: HttpMethod::Post,
                    endpoint: self.profile.endpoint.clone(),
                    query: vec![("key".to_string(), key)],
                    body: Some(body.to_string()),
                }
            }
        };

        debug!("Built outbound request: {:?}", outbound);
        Ok(outbound)
    }
}
