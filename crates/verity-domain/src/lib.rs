//! Verity Domain Layer
//!
//! Core vocabulary and trait seams for the news verification pipeline.
//! This crate has a single external dependency (`uuid`) and defines the
//! value types every other layer exchanges.
//!
//! ## Key Concepts
//!
//! - **Classification**: the closed-vocabulary verdict on a piece of news
//! - **Sentiment**: a coarser secondary tag, validated independently
//! - **AnalysisResult**: the normalized, immutable outcome of one analysis
//! - **HistoryEntry**: a persisted result plus the text it was computed for
//! - **RawResponse**: the untrusted payload returned by an external classifier
//!
//! ## Architecture
//!
//! - Pure value types, no I/O
//! - Infrastructure (HTTP, SQLite) lives in other crates
//! - `PersistentStore` and `Classifier` are the only seams to the outside

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod history;
pub mod language;
pub mod traits;
pub mod verdict;
pub mod wire;

// Re-exports for convenience
pub use analysis::{
    now_millis, AnalysisRequest, AnalysisResult, EXPLANATION_PLACEHOLDER, FALLBACK_CONFIDENCE,
};
pub use history::{preview, EntryId, HistoryEntry, PREVIEW_CHARS};
pub use language::Language;
pub use verdict::{Classification, Sentiment, Tone};
pub use wire::{HttpMethod, OutboundRequest, RawResponse, ResponseScheme};
