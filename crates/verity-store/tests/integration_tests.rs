//! Integration tests for verity-store
//!
//! These tests exercise history and credential persistence against an
//! on-disk SQLite database reopened between "sessions".

use std::sync::Arc;
use verity_domain::traits::PersistentStore;
use verity_domain::{AnalysisRequest, AnalysisResult, Classification, Language, Sentiment};
use verity_store::{CredentialStore, HistoryStore, SqliteStore, HISTORY_KEY, MAX_HISTORY};

fn sample_result(classification: Classification, confidence: f64) -> AnalysisResult {
    AnalysisResult {
        classification,
        headline: classification.headline().to_string(),
        sentiment: Sentiment::Real,
        confidence,
        explanation: "Consistent with verified sources.".to_string(),
        timestamp_ms: 1_700_000_000_000,
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verity.db");

    {
        let store = Arc::new(SqliteStore::new(&path).unwrap());
        let mut history = HistoryStore::load(store);
        let request = AnalysisRequest::new(
            "The central bank has raised interest rates by fifty basis points this morning.",
            Language::En,
            Some("https://example.com/rates".to_string()),
        );
        history.append(&sample_result(Classification::Genuine, 0.92), &request);
    }

    let store = Arc::new(SqliteStore::new(&path).unwrap());
    let history = HistoryStore::load(store);
    assert_eq!(history.len(), 1);

    let entry = &history.all()[0];
    assert_eq!(entry.result.classification, Classification::Genuine);
    assert_eq!(entry.result.confidence, 0.92);
    assert_eq!(entry.url.as_deref(), Some("https://example.com/rates"));
    assert!(entry.truncated_text.ends_with("..."));
    assert!(entry.full_text.starts_with("The central bank"));
}

#[test]
fn test_clear_then_fresh_load_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verity.db");

    {
        let store = Arc::new(SqliteStore::new(&path).unwrap());
        let mut history = HistoryStore::load(store);
        for i in 0..3 {
            let request = AnalysisRequest::new(format!("story {}", i), Language::Ha, None);
            history.append(&sample_result(Classification::Neutral, 0.5), &request);
        }
        history.clear();
    }

    let store = Arc::new(SqliteStore::new(&path).unwrap());
    assert!(HistoryStore::load(Arc::clone(&store)).is_empty());
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}

#[test]
fn test_eleven_sequential_appends() {
    let store = Arc::new(SqliteStore::new(":memory:").unwrap());
    let mut history = HistoryStore::load(Arc::clone(&store));

    for i in 1..=11 {
        let request = AnalysisRequest::new(format!("analysis #{}", i), Language::En, None);
        history.append(&sample_result(Classification::Authentic, 0.9), &request);
    }

    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history.all()[0].full_text, "analysis #11");
    assert!(!history.all().iter().any(|e| e.full_text == "analysis #1"));

    let reloaded = HistoryStore::load(store);
    assert_eq!(reloaded.len(), MAX_HISTORY);
    assert_eq!(reloaded.all()[0].full_text, "analysis #11");
}

#[test]
fn test_corrupt_history_does_not_block_startup() {
    let store = Arc::new(SqliteStore::new(":memory:").unwrap());
    store.set(HISTORY_KEY, "[{\"id\": 3").unwrap();

    let mut history = HistoryStore::load(Arc::clone(&store));
    assert!(history.is_empty());

    let request = AnalysisRequest::new("recovering", Language::En, None);
    history.append(&sample_result(Classification::False, 0.99), &request);
    assert_eq!(HistoryStore::load(store).len(), 1);
}

#[test]
fn test_credential_and_history_are_independent() {
    let store = Arc::new(SqliteStore::new(":memory:").unwrap());
    let credentials = CredentialStore::new(Arc::clone(&store));
    credentials.set("api-key-1234").unwrap();

    let mut history = HistoryStore::load(Arc::clone(&store));
    let request = AnalysisRequest::new("text", Language::En, None);
    history.append(&sample_result(Classification::Genuine, 0.8), &request);
    history.clear();

    assert_eq!(credentials.get().as_deref(), Some("api-key-1234"));
}
