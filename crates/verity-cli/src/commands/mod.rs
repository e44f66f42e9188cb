//! Command implementations.

pub mod analyze;
pub mod history;
pub mod key;
pub mod profile;

pub use self::analyze::execute_analyze;
pub use self::history::execute_history;
pub use self::key::execute_key;
pub use self::profile::execute_profile;

use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;
use verity_analyzer::{AnalysisSession, ClassifierProfile, RequestBuilder};
use verity_llm::HttpClassifier;
use verity_store::{HistoryStore, SqliteStore};

/// Session wired to the live classifier and the on-disk store.
pub type Session = AnalysisSession<HttpClassifier, SqliteStore>;

/// Open the SQLite store named by the configuration.
pub fn open_store(config: &Config) -> Result<Arc<SqliteStore>> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Arc::new(SqliteStore::new(&path)?))
}

/// Build an analysis session for the active profile.
pub fn open_session(config: &Config, store: Arc<SqliteStore>) -> Result<Session> {
    let profile = ClassifierProfile::from(config.get_active_profile()?);
    tracing::debug!(
        "Opening session with profile '{}' ({})",
        config.active_profile,
        profile.scheme.as_str()
    );

    let builder = RequestBuilder::new(Arc::clone(&store), profile, &config.analyzer);
    let history = HistoryStore::load(store);
    Ok(AnalysisSession::new(
        HttpClassifier::new(),
        builder,
        history,
        config.analyzer.clone(),
    ))
}

#[cfg(test)]
pub(crate) fn test_config(dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.settings.database = Some(dir.join("verity.db"));
    config
}
