//! Generative model responses
//!
//! The answer text sits at the bottom of a nested envelope. Both the
//! `candidates[].content.parts[].text` layout and the chat-completion
//! `choices[].message.content` layout are understood.

use serde::Deserialize;
use verity_domain::RawResponse;

/// Default generative endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Response envelope of a generative endpoint
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Chat-completion layout
#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GenerateResponse {
    /// The model's answer text, if the envelope carries one
    fn answer_text(self) -> Option<String> {
        let parts: Vec<String> = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if !parts.is_empty() {
            return Some(parts.concat());
        }

        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}

/// Decode a response body into a [`RawResponse::Freeform`]
///
/// When no answer text can be located the whole body is passed through, so
/// the normalizer decides whether anything usable is inside.
pub fn decode(body: &str) -> RawResponse {
    match serde_json::from_str::<GenerateResponse>(body) {
        Ok(response) => match response.answer_text() {
            Some(text) => RawResponse::Freeform(text),
            None => RawResponse::Freeform(body.to_string()),
        },
        Err(_) => RawResponse::Freeform(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_candidates_layout() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "Here is the result: {\"classification\":\"Genuine\"}"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(
            decode(body),
            RawResponse::freeform(r#"Here is the result: {"classification":"Genuine"}"#)
        );
    }

    #[test]
    fn test_decode_joins_multiple_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        assert_eq!(decode(body), RawResponse::freeform(r#"{"a":1}"#));
    }

    #[test]
    fn test_decode_choices_layout() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"sentiment\":\"real\"}"}}]}"#;
        assert_eq!(decode(body), RawResponse::freeform(r#"{"sentiment":"real"}"#));
    }

    #[test]
    fn test_decode_unknown_envelope_passes_body_through() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert_eq!(decode(body), RawResponse::freeform(body));
    }

    #[test]
    fn test_decode_plain_text() {
        assert_eq!(decode("not json at all"), RawResponse::freeform("not json at all"));
    }
}
