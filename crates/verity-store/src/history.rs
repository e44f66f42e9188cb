//! Bounded history of past analyses
//!
//! The list is kept newest-first and capped at [`MAX_HISTORY`] entries.
//! Every mutation is applied in memory first and then written through to the
//! store as one JSON array. Storage failures are logged and swallowed: the
//! in-memory list stays authoritative for the rest of the session.

use crate::HISTORY_KEY;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};
use verity_domain::traits::PersistentStore;
use verity_domain::{
    AnalysisRequest, AnalysisResult, Classification, EntryId, HistoryEntry, Language, Sentiment,
};

/// Maximum number of entries kept
pub const MAX_HISTORY: usize = 10;

/// Persisted form of a history entry
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: String,
    classification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headline: Option<String>,
    sentiment: String,
    confidence: f64,
    explanation: String,
    timestamp: u64,
    truncated_text: String,
    full_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default = "default_language")]
    language: String,
}

fn default_language() -> String {
    Language::default().code().to_string()
}

impl From<&HistoryEntry> for StoredEntry {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            classification: entry.result.classification.as_str().to_string(),
            headline: Some(entry.result.headline.clone()),
            sentiment: entry.result.sentiment.as_str().to_string(),
            confidence: entry.result.confidence,
            explanation: entry.result.explanation.clone(),
            timestamp: entry.result.timestamp_ms,
            truncated_text: entry.truncated_text.clone(),
            full_text: entry.full_text.clone(),
            url: entry.url.clone(),
            language: entry.language.code().to_string(),
        }
    }
}

impl TryFrom<StoredEntry> for HistoryEntry {
    type Error = String;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let classification = Classification::parse(&stored.classification)
            .ok_or_else(|| format!("unknown classification '{}'", stored.classification))?;
        let sentiment = Sentiment::parse(&stored.sentiment)
            .ok_or_else(|| format!("unknown sentiment '{}'", stored.sentiment))?;
        if !AnalysisResult::is_valid_confidence(stored.confidence) {
            return Err(format!("confidence {} out of range", stored.confidence));
        }

        Ok(HistoryEntry {
            id: EntryId::from_string(&stored.id)?,
            result: AnalysisResult {
                classification,
                headline: stored
                    .headline
                    .filter(|h| !h.trim().is_empty())
                    .unwrap_or_else(|| classification.headline().to_string()),
                sentiment,
                confidence: stored.confidence,
                explanation: stored.explanation,
                timestamp_ms: stored.timestamp,
            },
            truncated_text: stored.truncated_text,
            full_text: stored.full_text,
            url: stored.url,
            language: Language::parse(&stored.language).unwrap_or_default(),
        })
    }
}

/// Newest-first, bounded, write-through history log
pub struct HistoryStore<S> {
    store: Arc<S>,
    entries: Vec<HistoryEntry>,
}

impl<S> HistoryStore<S>
where
    S: PersistentStore,
    S::Error: Display,
{
    /// Restore persisted history
    ///
    /// Never fails: an absent, unreadable, or corrupt record yields an empty
    /// history. Individual entries that no longer validate are dropped.
    pub fn load(store: Arc<S>) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => Self::decode(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read history, starting empty: {}", e);
                Vec::new()
            }
        };
        debug!("Loaded {} history entries", entries.len());
        Self { store, entries }
    }

    fn decode(json: &str) -> Vec<HistoryEntry> {
        let stored: Vec<StoredEntry> = match serde_json::from_str(json) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Persisted history is corrupt, starting empty: {}", e);
                return Vec::new();
            }
        };

        let mut entries: Vec<HistoryEntry> = stored
            .into_iter()
            .enumerate()
            .filter_map(|(idx, s)| match HistoryEntry::try_from(s) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Dropping history entry {}: {}", idx, e);
                    None
                }
            })
            .collect();
        entries.truncate(MAX_HISTORY);
        entries
    }

    /// Record a successful analysis at the front, evicting the oldest past the cap
    pub fn append(&mut self, result: &AnalysisResult, request: &AnalysisRequest) -> &HistoryEntry {
        self.entries.insert(0, HistoryEntry::from_analysis(result, request));
        if self.entries.len() > MAX_HISTORY {
            let evicted = self.entries.split_off(MAX_HISTORY);
            debug!("Evicted {} history entries", evicted.len());
        }
        self.persist();
        &self.entries[0]
    }

    /// All entries, most recent first
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there is no history
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and erase the persisted record
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            warn!("Failed to erase persisted history: {}", e);
        }
    }

    fn persist(&self) {
        let stored: Vec<StoredEntry> = self.entries.iter().map(StoredEntry::from).collect();
        let json = match serde_json::to_string(&stored) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize history: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(HISTORY_KEY, &json) {
            warn!("Failed to persist history: {}", e);
        }
    }
}
