//! Wire-neutral request and response shapes
//!
//! The request builder produces an [`OutboundRequest`]; a classifier executes
//! it and hands back a [`RawResponse`] for the normalizer. Neither type knows
//! about a particular HTTP client.

use std::fmt;

/// Which response scheme the target endpoint speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseScheme {
    /// Sentiment service answering with a short `score_tag` code (legacy)
    TagCode,
    /// Generative model answering with free-form text containing JSON
    Generative,
}

impl ResponseScheme {
    /// Get the scheme name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseScheme::TagCode => "tag-code",
            ResponseScheme::Generative => "generative",
        }
    }

    /// Parse a scheme from its configuration name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tag-code" | "tagcode" | "tag_code" => Some(ResponseScheme::TagCode),
            "generative" => Some(ResponseScheme::Generative),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET with everything in the query string
    Get,
    /// POST with a JSON body
    Post,
}

/// A ready-to-send classifier request
#[derive(Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Response scheme the endpoint speaks
    pub scheme: ResponseScheme,

    /// HTTP method
    pub method: HttpMethod,

    /// Target endpoint, without query string
    pub endpoint: String,

    /// Query parameters, unencoded
    pub query: Vec<(String, String)>,

    /// Serialized JSON body, for `Post`
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Look up a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// The credential travels in the query string; keep it out of logs.
impl fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| {
                if k == "key" {
                    (k.as_str(), "***")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("OutboundRequest")
            .field("scheme", &self.scheme)
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .field("query", &query)
            .field("body_len", &self.body.as_ref().map(|b| b.len()))
            .finish()
    }
}

/// Untrusted payload returned by an external classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// Short tag code answer
    TagCode {
        /// The `score_tag` field, if present
        score_tag: Option<String>,
        /// The service's own confidence, a 0-100 percentage as text
        confidence: Option<String>,
    },

    /// Free-form text expected to contain a JSON object somewhere inside
    Freeform(String),
}

impl RawResponse {
    /// Convenience constructor for a tag code answer without confidence
    pub fn tag(code: impl Into<String>) -> Self {
        RawResponse::TagCode {
            score_tag: Some(code.into()),
            confidence: None,
        }
    }

    /// Convenience constructor for free-form text
    pub fn freeform(text: impl Into<String>) -> Self {
        RawResponse::Freeform(text.into())
    }
}
