//! Verity Classifier Layer
//!
//! Implementations of the `Classifier` trait from `verity-domain`.
//!
//! # Architecture
//!
//! A classifier performs the network call described by an `OutboundRequest`
//! and returns the untrusted payload as a `RawResponse`. It never interprets
//! the verdict itself; that is the normalizer's job.
//!
//! # Classifiers
//!
//! - `MockClassifier`: Deterministic mock for testing
//! - `HttpClassifier`: reqwest-backed client for tag-code and generative endpoints
//!
//! # Examples
//!
//! ```
//! use verity_llm::MockClassifier;
//! use verity_domain::RawResponse;
//!
//! let classifier = MockClassifier::new(RawResponse::tag("P+"));
//! assert_eq!(classifier.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod generative;
pub mod http;
pub mod tag_code;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use verity_domain::traits::Classifier;
use verity_domain::{OutboundRequest, RawResponse};

pub use http::HttpClassifier;

/// Errors that can occur while calling a classifier
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Network or connection failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP error! status: {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Endpoint answered 2xx but reported a failure in its status envelope
    #[error("Service error: {0}")]
    Service(String),

    /// Generic error
    #[error("Classifier error: {0}")]
    Other(String),
}

/// Mock classifier for deterministic testing
///
/// Returns pre-configured payloads without making any network calls. A
/// scripted response is selected when its key occurs in the request's `txt`
/// parameter or JSON body; otherwise the default payload is returned.
///
/// # Examples
///
/// ```
/// use verity_llm::MockClassifier;
/// use verity_domain::RawResponse;
///
/// let mut classifier = MockClassifier::new(RawResponse::tag("NEU"));
/// classifier.add_response("election", RawResponse::tag("N+"));
/// classifier.add_error("outage");
/// ```
#[derive(Debug, Clone)]
pub struct MockClassifier {
    default_response: RawResponse,
    responses: Arc<Mutex<HashMap<String, Option<RawResponse>>>>,
    call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl MockClassifier {
    /// Create a new MockClassifier returning `response` for every request
    pub fn new(response: RawResponse) -> Self {
        Self {
            default_response: response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            delay: None,
        }
    }

    /// Return `response` for requests mentioning `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: RawResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(key.into(), Some(response));
        }
    }

    /// Fail requests mentioning `key` with a communication error
    pub fn add_error(&mut self, key: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(key.into(), None);
        }
    }

    /// Wait `delay` before answering, to exercise timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> usize {
        self.call_count.lock().map(|c| *c).unwrap_or(0)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        if let Ok(mut count) = self.call_count.lock() {
            *count = 0;
        }
    }

    fn lookup(&self, request: &OutboundRequest) -> Result<RawResponse, ClassifierError> {
        if let Ok(mut count) = self.call_count.lock() {
            *count += 1;
        }

        let haystack = format!(
            "{} {}",
            request.query_param("txt").unwrap_or_default(),
            request.body.as_deref().unwrap_or_default()
        );
        let responses = self
            .responses
            .lock()
            .map_err(|_| ClassifierError::Other("Mock lock poisoned".to_string()))?;
        for (key, response) in responses.iter() {
            if haystack.contains(key.as_str()) {
                return response
                    .clone()
                    .ok_or_else(|| ClassifierError::Communication("Mock error".to_string()));
            }
        }
        Ok(self.default_response.clone())
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new(RawResponse::tag("NEU"))
    }
}

impl Classifier for MockClassifier {
    type Error = ClassifierError;

    async fn classify(&self, request: &OutboundRequest) -> Result<RawResponse, Self::Error> {
        let outcome = self.lookup(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_domain::{HttpMethod, ResponseScheme};

    fn request(text: &str) -> OutboundRequest {
        OutboundRequest {
            scheme: ResponseScheme::TagCode,
            method: HttpMethod::Get,
            endpoint: "https://example.com".to_string(),
            query: vec![("txt".to_string(), text.to_string())],
            body: None,
        }
    }

    #[tokio::test]
    async fn test_mock_classifier_default() {
        let classifier = MockClassifier::new(RawResponse::tag("P"));
        let result = classifier.classify(&request("anything")).await;
        assert_eq!(result.unwrap(), RawResponse::tag("P"));
    }

    #[tokio::test]
    async fn test_mock_classifier_specific_responses() {
        let mut classifier = MockClassifier::default();
        classifier.add_response("flood", RawResponse::tag("N"));

        assert_eq!(
            classifier.classify(&request("flood warning issued")).await.unwrap(),
            RawResponse::tag("N")
        );
        assert_eq!(
            classifier.classify(&request("sunny day")).await.unwrap(),
            RawResponse::tag("NEU")
        );
    }

    #[tokio::test]
    async fn test_mock_classifier_matches_body() {
        let mut classifier = MockClassifier::default();
        classifier.add_response("senate", RawResponse::freeform("{}"));

        let mut req = request("");
        req.body = Some(r#"{"contents":"the senate voted"}"#.to_string());
        assert_eq!(classifier.classify(&req).await.unwrap(), RawResponse::freeform("{}"));
    }

    #[tokio::test]
    async fn test_mock_classifier_error() {
        let mut classifier = MockClassifier::default();
        classifier.add_error("outage");

        let result = classifier.classify(&request("network outage")).await;
        assert!(matches!(result, Err(ClassifierError::Communication(_))));
    }

    #[tokio::test]
    async fn test_mock_classifier_call_count() {
        let classifier = MockClassifier::default();
        let clone = classifier.clone();

        classifier.classify(&request("a")).await.unwrap();
        clone.classify(&request("b")).await.unwrap();
        assert_eq!(classifier.call_count(), 2);

        classifier.reset_call_count();
        assert_eq!(clone.call_count(), 0);
    }
}
