//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::wire::{OutboundRequest, RawResponse};
use std::future::Future;

/// Keyed string storage for client-local state
///
/// Implemented by the infrastructure layer (verity-store). Passed explicitly
/// to every component that persists something; nothing reaches for ambient
/// storage.
pub trait PersistentStore {
    /// Error type for store operations
    type Error;

    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// An external classification service
///
/// Implemented by the infrastructure layer (verity-llm). Performs the network
/// call only; interpreting the payload is the normalizer's job.
pub trait Classifier {
    /// Error type for classifier calls
    type Error: std::fmt::Display;

    /// Send `request` and return the untrusted payload
    fn classify(
        &self,
        request: &OutboundRequest,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send;
}
