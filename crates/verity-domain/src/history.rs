//! History entries

use crate::analysis::{AnalysisRequest, AnalysisResult};
use crate::language::Language;
use std::fmt;

/// Number of characters kept in a history preview
pub const PREVIEW_CHARS: usize = 50;

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut
///
/// Works on characters, not bytes, so multi-byte text is never split.
pub fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// Unique identifier for a history entry based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u128);

impl EntryId {
    /// Generate a new UUIDv7-based EntryId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse an EntryId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid entry id: {}", e))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A past analysis kept in the local history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: EntryId,

    /// The normalized result
    pub result: AnalysisResult,

    /// Short preview of the analyzed text
    pub truncated_text: String,

    /// The analyzed text, trimmed
    pub full_text: String,

    /// Source reference supplied with the request
    pub url: Option<String>,

    /// Language the request was made in
    pub language: Language,
}

impl HistoryEntry {
    /// Build an entry from a result and the request that produced it
    pub fn from_analysis(result: &AnalysisResult, request: &AnalysisRequest) -> Self {
        let full_text = request.trimmed_text().to_string();
        Self {
            id: EntryId::new(),
            result: result.clone(),
            truncated_text: preview(&full_text, PREVIEW_CHARS),
            full_text,
            url: request.url.clone(),
            language: request.language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::{Classification, Sentiment};
    use proptest::prelude::*;

    #[test]
    fn test_preview_short_text_is_untouched() {
        assert_eq!(preview("Short headline", 50), "Short headline");
    }

    #[test]
    fn test_preview_long_text_is_cut() {
        let text = "a".repeat(80);
        let cut = preview(&text, 50);
        assert_eq!(cut, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_preview_exact_length_has_no_ellipsis() {
        let text = "b".repeat(50);
        assert_eq!(preview(&text, 50), text);
    }

    #[test]
    fn test_preview_multibyte() {
        let text = "Ọ̀rọ̀ ìròyìn ".repeat(10);
        let cut = preview(&text, 12);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_entry_from_analysis() {
        let request = AnalysisRequest::new(
            "  The governor announced new road projects today.  ",
            Language::En,
            Some("https://example.com/story".to_string()),
        );
        let result = AnalysisResult {
            classification: Classification::Genuine,
            headline: Classification::Genuine.headline().to_string(),
            sentiment: Sentiment::Real,
            confidence: 0.8,
            explanation: "Consistent".to_string(),
            timestamp_ms: 42,
        };

        let entry = HistoryEntry::from_analysis(&result, &request);
        assert_eq!(entry.full_text, "The governor announced new road projects today.");
        assert_eq!(entry.truncated_text, entry.full_text);
        assert_eq!(entry.url.as_deref(), Some("https://example.com/story"));
        assert_eq!(entry.result, result);
    }

    #[test]
    fn test_entry_id_round_trip() {
        let id = EntryId::new();
        let parsed = EntryId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    proptest! {
        #[test]
        fn prop_preview_is_bounded(text in "\\PC{0,200}", max in 1usize..80) {
            let cut = preview(&text, max);
            let body = cut.strip_suffix("...").unwrap_or(&cut);
            prop_assert!(body.chars().count() <= max);
        }

        #[test]
        fn prop_preview_is_prefix(text in "[a-z ]{0,120}") {
            let cut = preview(&text, PREVIEW_CHARS);
            let body = cut.strip_suffix("...").unwrap_or(&cut);
            prop_assert!(text.trim().starts_with(body));
        }
    }
}
