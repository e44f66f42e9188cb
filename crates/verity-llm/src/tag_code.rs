//! Tag-code sentiment service responses
//!
//! The service answers with a JSON object carrying a `score_tag` (one of
//! `P+`, `P`, `NEU`, `N`, `N+`, `NONE`), a `confidence` percentage, and a
//! `status` envelope whose `code` is `"0"` on success.

use crate::ClassifierError;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use verity_domain::RawResponse;

/// Default tag-code endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.meaningcloud.com/sentiment-2.1";

/// Response from the sentiment API
#[derive(Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    status: Option<SentimentStatus>,
    #[serde(default)]
    score_tag: Option<String>,
    #[serde(default)]
    confidence: Option<Value>,
}

/// Status envelope; `code` is `"0"` on success
#[derive(Deserialize)]
struct SentimentStatus {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    msg: Option<String>,
}

/// Decode a response body into a [`RawResponse::TagCode`]
///
/// A body that does not match the response shape yields a payload without
/// `score_tag`, which the normalizer rejects as an invalid response. A
/// failure reported in the status envelope is surfaced as
/// [`ClassifierError::Service`].
pub fn decode(body: &str) -> Result<RawResponse, ClassifierError> {
    let response: SentimentResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            warn!("Tag-code response has an unexpected shape: {}", e);
            return Ok(RawResponse::TagCode {
                score_tag: None,
                confidence: None,
            });
        }
    };

    if let Some(status) = response.status {
        let code = status.code.as_ref().map(value_as_text).unwrap_or_default();
        if !code.is_empty() && code != "0" {
            let msg = status.msg.as_deref().unwrap_or("unknown failure");
            return Err(ClassifierError::Service(format!("{} (code {})", msg, code)));
        }
    }

    Ok(RawResponse::TagCode {
        score_tag: response.score_tag.filter(|s| !s.is_empty()),
        confidence: response.confidence.as_ref().map(value_as_text),
    })
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_response() {
        let body = r#"{"status":{"code":"0","msg":"OK","credits":"1"},
                       "score_tag":"N+","agreement":"AGREEMENT","confidence":"86"}"#;
        let raw = decode(body).unwrap();
        assert_eq!(
            raw,
            RawResponse::TagCode {
                score_tag: Some("N+".to_string()),
                confidence: Some("86".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_minimal_response() {
        let raw = decode(r#"{"score_tag":"P"}"#).unwrap();
        assert_eq!(raw, RawResponse::tag("P"));
    }

    #[test]
    fn test_decode_numeric_confidence() {
        let raw = decode(r#"{"score_tag":"P","confidence":72}"#).unwrap();
        assert!(matches!(raw, RawResponse::TagCode { confidence: Some(c), .. } if c == "72"));
    }

    #[test]
    fn test_decode_missing_score_tag() {
        let raw = decode(r#"{"status":{"code":"0"}}"#).unwrap();
        assert!(matches!(raw, RawResponse::TagCode { score_tag: None, .. }));
    }

    #[test]
    fn test_decode_non_json() {
        let raw = decode("<html>Bad gateway</html>").unwrap();
        assert!(matches!(raw, RawResponse::TagCode { score_tag: None, .. }));
    }

    #[test]
    fn test_decode_numeric_status_code() {
        let body = r#"{"status":{"code":0,"msg":"OK"},"score_tag":"NEU","confidence":"100"}"#;
        assert!(matches!(decode(body).unwrap(), RawResponse::TagCode { score_tag: Some(t), .. } if t == "NEU"));
    }

    #[test]
    fn test_decode_service_failure() {
        let body = r#"{"status":{"code":"100","msg":"Operation denied"}}"#;
        match decode(body) {
            Err(ClassifierError::Service(msg)) => assert!(msg.contains("Operation denied")),
            other => panic!("Expected Service error, got {:?}", other),
        }
    }
}
