//! Response normalization
//!
//! Converts an untrusted classifier payload into an [`AnalysisResult`].
//! Identity fields gate trust: a sentiment outside the closed set rejects the
//! whole payload. Descriptive fields degrade: a bad confidence falls back to
//! [`FALLBACK_CONFIDENCE`] and a missing explanation to a placeholder.

use crate::error::AnalysisError;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use verity_domain::{
    AnalysisResult, Classification, RawResponse, Sentiment, EXPLANATION_PLACEHOLDER,
    FALLBACK_CONFIDENCE,
};

/// Verdict attached to a tag code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagVerdict {
    /// Primary verdict
    pub classification: Classification,
    /// Secondary tag
    pub sentiment: Sentiment,
    /// Verdict line shown to the user
    pub headline: &'static str,
    /// Canned explanation
    pub explanation: &'static str,
}

const AUTHENTIC: TagVerdict = TagVerdict {
    classification: Classification::Authentic,
    sentiment: Sentiment::Positive,
    headline: "Authentic and Verified News!",
    explanation: "This news content has been classified as authentic. The analysis indicates that it is accurate, credible, and trustworthy, reflecting positive developments that can inspire and engage the community. This outcome reaffirms the importance of sharing verified information to build a well-informed society.",
};

const GENUINE: TagVerdict = TagVerdict {
    classification: Classification::Genuine,
    sentiment: Sentiment::Positive,
    headline: "Genuine News Content!",
    explanation: "The analysis shows that this content is genuine and reliable. It reflects accurate and trustworthy information without any misleading intent. This classification provides assurance that the content aligns with the values of honesty and factual reporting, supporting informed decision-making and public trust.",
};

const NEUTRAL: TagVerdict = TagVerdict {
    classification: Classification::Neutral,
    sentiment: Sentiment::Neutral,
    headline: "Uncertain News Content, make sure you confirm the source of this information!",
    explanation: "This content has been classified as neutral, indicating moderate certainty in its authenticity. It does not show clear signs of being misleading or completely reliable. This suggests that further investigation or verification may be necessary to understand its context and credibility fully. Stay cautious and verify the source before sharing.",
};

const MISLEADING: TagVerdict = TagVerdict {
    classification: Classification::Misleading,
    sentiment: Sentiment::Negative,
    headline: "Misleading or Fake News Detected!",
    explanation: "The analysis classifies this content as misleading or fake. It may contain inaccuracies or deceptive information intended to mislead readers. It's crucial to avoid sharing such content and to rely on credible sources for accurate information. Always verify the authenticity of such news to combat misinformation effectively.",
};

const FALSE: TagVerdict = TagVerdict {
    classification: Classification::False,
    sentiment: Sentiment::Misleading,
    headline: "Highly Misleading or False News!",
    explanation: "This news content has been classified as completely false or intentionally misleading. It may include fabricated information designed to deceive readers. Disseminating such content can harm societal trust and foster misinformation. Verify the information with trusted sources and avoid sharing it.",
};

const INCONCLUSIVE: TagVerdict = TagVerdict {
    classification: Classification::Neutral,
    sentiment: Sentiment::Neutral,
    headline: "Uncertain or Inconclusive Content!",
    explanation: "The analysis could not determine the authenticity of this content. It is highly recommended that the source be scrutinized and the claims verified with credible references before considering them trustworthy. This highlights the importance of careful evaluation in ambiguous cases.",
};

/// Map a tag code to its verdict; unknown codes get the inconclusive verdict
pub fn lookup_tag(code: &str) -> &'static TagVerdict {
    match code.trim() {
        "P+" => &AUTHENTIC,
        "P" => &GENUINE,
        "NEU" => &NEUTRAL,
        "N" => &MISLEADING,
        "N+" => &FALSE,
        _ => &INCONCLUSIVE,
    }
}

/// Normalize a raw payload, stamping it with `now_ms`
pub fn normalize(raw: RawResponse, now_ms: u64) -> Result<AnalysisResult, AnalysisError> {
    match raw {
        RawResponse::TagCode {
            score_tag,
            confidence,
        } => normalize_tag_code(score_tag, confidence, now_ms),
        RawResponse::Freeform(text) => normalize_freeform(&text, now_ms),
    }
}

fn normalize_tag_code(
    score_tag: Option<String>,
    confidence: Option<String>,
    now_ms: u64,
) -> Result<AnalysisResult, AnalysisError> {
    let code = score_tag
        .filter(|tag| !tag.trim().is_empty())
        .ok_or_else(|| AnalysisError::UpstreamFormat("missing score_tag".to_string()))?;
    let verdict = lookup_tag(&code);
    debug!("Tag code '{}' maps to {}", code, verdict.classification);

    let confidence = match confidence {
        None => FALLBACK_CONFIDENCE,
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(percent) if percent.is_finite() && (0.0..=100.0).contains(&percent) => {
                percent / 100.0
            }
            _ => {
                warn!("Tag-code confidence '{}' is not a percentage, using fallback", raw);
                FALLBACK_CONFIDENCE
            }
        },
    };

    Ok(AnalysisResult {
        classification: verdict.classification,
        headline: verdict.headline.to_string(),
        sentiment: verdict.sentiment,
        confidence,
        explanation: verdict.explanation.to_string(),
        timestamp_ms: now_ms,
    })
}

fn normalize_freeform(text: &str, now_ms: u64) -> Result<AnalysisResult, AnalysisError> {
    let object = find_json_object(text).ok_or_else(|| {
        AnalysisError::UpstreamFormat("no JSON object found in classifier output".to_string())
    })?;

    let sentiment = match object.get("sentiment") {
        Some(Value::String(s)) => Sentiment::parse(s).ok_or_else(|| {
            AnalysisError::UpstreamFormat(format!("unknown sentiment '{}'", s))
        })?,
        Some(other) => {
            return Err(AnalysisError::UpstreamFormat(format!(
                "sentiment must be a string, got {}",
                other
            )))
        }
        None => return Err(AnalysisError::UpstreamFormat("missing sentiment".to_string())),
    };

    let classification = match object.get("classification").and_then(Value::as_str) {
        Some(s) => Classification::parse(s).unwrap_or_else(|| {
            warn!("Unknown classification '{}', coercing to Neutral", s);
            Classification::Neutral
        }),
        None => {
            warn!("Missing classification, coercing to Neutral");
            Classification::Neutral
        }
    };

    let confidence = match object.get("confidence").and_then(Value::as_f64) {
        Some(c) if AnalysisResult::is_valid_confidence(c) => c,
        other => {
            warn!("Unusable confidence {:?}, using fallback", other);
            FALLBACK_CONFIDENCE
        }
    };

    let explanation = object
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(EXPLANATION_PLACEHOLDER)
        .to_string();

    Ok(AnalysisResult {
        classification,
        headline: classification.headline().to_string(),
        sentiment,
        confidence,
        explanation,
        timestamp_ms: now_ms,
    })
}

/// Locate the first balanced `{...}` span in `text`
///
/// Braces inside JSON string literals are ignored. Returns `None` when no
/// opening brace is ever closed.
pub fn extract_json_span(text: &str) -> Option<&str> {
    balanced_spans(text)
        .first()
        .map(|&(start, end)| &text[start..end])
}

/// First balanced span that parses as a JSON object
fn find_json_object(text: &str) -> Option<Map<String, Value>> {
    balanced_spans(text).into_iter().find_map(|(start, end)| {
        match serde_json::from_str::<Value>(&text[start..end]) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    })
}

/// Every balanced `{...}` span as byte ranges, ordered by opening offset
///
/// One left-to-right pass with a stack of open-brace offsets. String
/// literals are only tracked inside an open brace, so quotes in surrounding
/// prose do not hide a later object.
fn balanced_spans(text: &str) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(offset),
            '}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, offset + 1));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}
