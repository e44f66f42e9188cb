//! Analysis request and result records

use crate::language::Language;
use crate::verdict::{Classification, Sentiment};
use std::time::{SystemTime, UNIX_EPOCH};

/// Confidence used when the classifier omits it or reports an invalid value
pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Explanation used when the classifier omits one
pub const EXPLANATION_PLACEHOLDER: &str = "No explanation was provided by the classifier.";

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A single submission from the user
///
/// Created on submit and discarded once a result or an error is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// News text as entered (may carry surrounding whitespace)
    pub text: String,

    /// Language the text is written in
    pub language: Language,

    /// Optional reference to where the text came from
    pub url: Option<String>,
}

impl AnalysisRequest {
    /// Create a new request
    pub fn new(text: impl Into<String>, language: Language, url: Option<String>) -> Self {
        Self {
            text: text.into(),
            language,
            url: url.filter(|u| !u.trim().is_empty()),
        }
    }

    /// The text with surrounding whitespace removed
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// True when there is nothing to analyze
    pub fn is_blank(&self) -> bool {
        self.trimmed_text().is_empty()
    }
}

/// The normalized outcome of one analysis
///
/// Produced only by the normalizer; `classification` and `sentiment` are
/// always members of their closed sets and `confidence` is always a finite
/// number in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Primary verdict
    pub classification: Classification,

    /// Verdict line shown to the user
    pub headline: String,

    /// Secondary tag
    pub sentiment: Sentiment,

    /// Confidence in `[0, 1]`
    pub confidence: f64,

    /// Free-text rationale, never empty
    pub explanation: String,

    /// When normalization happened (ms since Unix epoch)
    pub timestamp_ms: u64,
}

impl AnalysisResult {
    /// True when `value` may be used as a confidence as-is
    pub fn is_valid_confidence(value: f64) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }

    /// Confidence rendered as a whole percentage
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_request() {
        let request = AnalysisRequest::new("  \n\t ", Language::En, None);
        assert!(request.is_blank());

        let request = AnalysisRequest::new("  Breaking news  ", Language::En, None);
        assert!(!request.is_blank());
        assert_eq!(request.trimmed_text(), "Breaking news");
    }

    #[test]
    fn test_blank_url_is_dropped() {
        let request = AnalysisRequest::new("text", Language::Yo, Some("   ".to_string()));
        assert_eq!(request.url, None);
    }

    #[test]
    fn test_confidence_validity() {
        assert!(AnalysisResult::is_valid_confidence(0.0));
        assert!(AnalysisResult::is_valid_confidence(1.0));
        assert!(AnalysisResult::is_valid_confidence(0.92));
        assert!(!AnalysisResult::is_valid_confidence(1.01));
        assert!(!AnalysisResult::is_valid_confidence(-0.1));
        assert!(!AnalysisResult::is_valid_confidence(f64::NAN));
        assert!(!AnalysisResult::is_valid_confidence(f64::INFINITY));
    }

    #[test]
    fn test_confidence_percent() {
        let result = AnalysisResult {
            classification: Classification::Genuine,
            headline: Classification::Genuine.headline().to_string(),
            sentiment: Sentiment::Positive,
            confidence: 0.92,
            explanation: "ok".to_string(),
            timestamp_ms: 0,
        };
        assert_eq!(result.confidence_percent(), 92);
    }
}
