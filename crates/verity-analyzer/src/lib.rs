//! Verity Analyzer
//!
//! Turns pasted news text into a validated verdict by way of an external
//! classifier.
//!
//! # Architecture
//!
//! ```text
//! Input → RequestBuilder → Classifier → normalize → AnalysisSession → HistoryStore
//! ```
//!
//! # Key Features
//!
//! - **Request building**: prompt and query construction, input validation,
//!   credential lookup through an injected `PersistentStore`
//! - **Normalization**: tag-code lookup and embedded-JSON extraction into a
//!   closed-vocabulary `AnalysisResult`
//! - **Session**: `Idle → Pending → Success | Failed` with a single
//!   in-flight guard, configurable timeout and cancellation
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use verity_analyzer::{AnalysisSession, AnalyzerConfig, ClassifierProfile, RequestBuilder};
//! use verity_domain::{AnalysisRequest, Language, RawResponse, ResponseScheme};
//! use verity_llm::MockClassifier;
//! use verity_store::{HistoryStore, MemoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let config = AnalyzerConfig::default();
//! let profile = ClassifierProfile::new(ResponseScheme::TagCode, "https://example.com");
//! let builder = RequestBuilder::new(Arc::clone(&store), profile, &config);
//! builder.credentials().set("api-key")?;
//!
//! let classifier = MockClassifier::new(RawResponse::tag("P"));
//! let mut session = AnalysisSession::new(classifier, builder, HistoryStore::load(store), config);
//!
//! let state = session
//!     .submit(AnalysisRequest::new("Schools reopen on Monday", Language::En, None))
//!     .await?;
//! println!("{:?}", state);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
pub mod normalizer;
mod prompt;
mod session;

pub use builder::{RequestBuilder, EMPTY_INPUT_MESSAGE};
pub use config::{AnalyzerConfig, ClassifierProfile};
pub use error::AnalysisError;
pub use normalizer::{extract_json_span, normalize};
pub use prompt::PromptBuilder;
pub use session::{AnalysisSession, Notice, SessionState, Severity};
