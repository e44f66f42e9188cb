//! Stored API credential

use crate::{StoreError, CREDENTIAL_KEY};
use std::fmt::Display;
use std::sync::Arc;
use tracing::warn;
use verity_domain::traits::PersistentStore;

/// Reads and writes the single stored API key
pub struct CredentialStore<S> {
    store: Arc<S>,
}

impl<S> CredentialStore<S>
where
    S: PersistentStore,
    S::Error: Display,
{
    /// Wrap a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The stored credential, if any
    ///
    /// A read failure is logged and reported as "no credential" so callers
    /// prompt for one instead of failing outright.
    pub fn get(&self) -> Option<String> {
        match self.store.get(CREDENTIAL_KEY) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                warn!("Failed to read stored credential: {}", e);
                None
            }
        }
    }

    /// Store a credential, trimming surrounding whitespace
    pub fn set(&self, credential: &str) -> Result<(), StoreError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(StoreError::InvalidData("credential must not be empty".to_string()));
        }
        self.store
            .set(CREDENTIAL_KEY, credential)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    /// Forget the stored credential
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store
            .remove(CREDENTIAL_KEY)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

/// Mask all but the last four characters of a credential
pub fn mask(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
