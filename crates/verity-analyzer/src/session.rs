//! Analysis session state machine
//!
//! ```text
//! Idle ──submit──▶ Pending ──ok──▶ Success ──submit──▶ Pending
//!                     │                                  ▲
//!                     └──error/timeout/cancel──▶ Failed ─┘
//! any ──clear──▶ Idle
//! ```
//!
//! At most one analysis is in flight: `submit` while `Pending` is rejected
//! with [`AnalysisError::Busy`]. Invalid input never leaves the current state;
//! it only raises a warning notice.

use crate::builder::RequestBuilder;
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::normalizer::normalize;
use std::fmt::Display;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use verity_domain::traits::{Classifier, PersistentStore};
use verity_domain::{now_millis, AnalysisRequest, AnalysisResult, HistoryEntry, OutboundRequest, RawResponse};
use verity_store::{HistoryStore, StoreError};

/// Observable state of the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing submitted, or reset by the user
    Idle,
    /// Waiting for the classifier
    Pending,
    /// Last analysis produced a result
    Success(AnalysisResult),
    /// Last analysis failed; the message is meant for the user
    Failed(String),
}

impl SessionState {
    /// Short name for status lines
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Pending => "pending",
            SessionState::Success(_) => "success",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// How prominently a notice should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Prompt for missing configuration
    Info,
    /// Locally recoverable input problem
    Warning,
    /// Failed analysis
    Error,
}

/// Dismissible message for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How prominently to show it
    pub severity: Severity,
    /// Message text
    pub message: String,
}

impl Notice {
    fn for_error(error: &AnalysisError) -> Self {
        let severity = match error {
            AnalysisError::Validation(_) | AnalysisError::Busy => Severity::Warning,
            AnalysisError::Configuration(_) => Severity::Info,
            _ => Severity::Error,
        };
        Self {
            severity,
            message: error.to_string(),
        }
    }
}

/// Long-lived analysis session driving one classifier
pub struct AnalysisSession<C, S> {
    classifier: C,
    builder: RequestBuilder<S>,
    history: HistoryStore<S>,
    config: AnalyzerConfig,
    state: SessionState,
    notice: Option<Notice>,
    current: Option<AnalysisRequest>,
}

impl<C, S> AnalysisSession<C, S>
where
    C: Classifier,
    S: PersistentStore,
    S::Error: Display,
{
    /// Create a session in the `Idle` state
    pub fn new(
        classifier: C,
        builder: RequestBuilder<S>,
        history: HistoryStore<S>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            classifier,
            builder,
            history,
            config,
            state: SessionState::Idle,
            notice: None,
            current: None,
        }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True while an analysis is in flight
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Pending)
    }

    /// Message to show alongside the state, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hide the current notice
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The request behind the current state
    pub fn current_request(&self) -> Option<&AnalysisRequest> {
        self.current.as_ref()
    }

    /// Past analyses, most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.all()
    }

    /// Erase the history log (does not touch the session state)
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Store the API credential and drop a pending configuration prompt
    pub fn set_credential(&mut self, credential: &str) -> Result<(), StoreError> {
        self.builder.credentials().set(credential)?;
        if matches!(&self.notice, Some(n) if n.severity == Severity::Info) {
            self.notice = None;
        }
        Ok(())
    }

    /// True when a credential is stored
    pub fn has_credential(&self) -> bool {
        self.builder.credentials().get().is_some()
    }

    /// Session configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `request` end to end
    ///
    /// Returns `Err` only when the submission is rejected without a state
    /// change (invalid input, or another analysis pending). Every other
    /// outcome, including classifier failures and timeouts, is reported
    /// through the returned state.
    pub async fn submit(&mut self, request: AnalysisRequest) -> Result<&SessionState, AnalysisError> {
        let outbound = match self.begin(request) {
            Ok(outbound) => outbound,
            Err(e) if e.is_rejection() => return Err(e),
            Err(_) => return Ok(&self.state),
        };

        let limit = self.config.timeout();
        let outcome = match timeout(limit, self.classifier.classify(&outbound)).await {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(e)) => Err(AnalysisError::Transport(e.to_string())),
            Err(_) => Err(AnalysisError::Timeout(limit)),
        };

        Ok(self.complete(outcome))
    }

    /// Enter `Pending` and build the outbound request
    ///
    /// For callers that perform the classifier call themselves. On a
    /// `Configuration` error the session has already moved to `Failed`.
    pub fn begin(&mut self, request: AnalysisRequest) -> Result<OutboundRequest, AnalysisError> {
        if self.is_pending() {
            warn!("Submit ignored: an analysis is already pending");
            return Err(AnalysisError::Busy);
        }
        if let Err(e) = self.builder.validate(&request) {
            self.notice = Some(Notice::for_error(&e));
            return Err(e);
        }

        info!(
            "Starting analysis: {} chars, language {}",
            request.trimmed_text().chars().count(),
            request.language
        );
        self.state = SessionState::Pending;
        self.notice = None;

        let built = self.builder.build(&request);
        self.current = Some(request);
        built.map_err(|e| {
            self.fail(e.clone());
            e
        })
    }

    /// Resolve the pending analysis with the classifier's outcome
    ///
    /// Ignored unless the session is `Pending` (for example after a `clear`
    /// or `cancel` raced the response).
    pub fn complete(&mut self, outcome: Result<RawResponse, AnalysisError>) -> &SessionState {
        if !self.is_pending() {
            debug!("Discarding outcome for a session in state {}", self.state.name());
            return &self.state;
        }

        match outcome.and_then(|raw| normalize(raw, now_millis())) {
            Ok(result) => {
                info!(
                    "Analysis succeeded: {} ({:.2})",
                    result.classification, result.confidence
                );
                if let Some(request) = &self.current {
                    self.history.append(&result, request);
                }
                self.state = SessionState::Success(result);
            }
            Err(e) => self.fail(e),
        }
        &self.state
    }

    /// Abandon the pending analysis
    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.fail(AnalysisError::Cancelled);
        }
    }

    /// Return to `Idle`, dropping the current result, input and notice
    ///
    /// History is kept.
    pub fn clear(&mut self) {
        self.state = SessionState::Idle;
        self.notice = None;
        self.current = None;
    }

    fn fail(&mut self, error: AnalysisError) {
        warn!("Analysis failed: {}", error);
        self.notice = Some(Notice::for_error(&error));
        self.state = SessionState::Failed(error.to_string());
    }
}
