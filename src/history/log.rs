//! The persisted game-result log.
//!
//! One store key holds the whole history as a JSON array, newest
//! first. The log is read once at engine construction and rewritten in
//! full on every append and on clear. Absent or corrupt data loads as
//! an empty history; store failures are logged at warn and swallowed -
//! losing history is acceptable, losing the game in progress is not.

use im::Vector;
use tracing::warn;

use super::result::GameResult;
use super::store::{KeyValueStore, StoreError};

/// Store key the history blob lives under.
pub const HISTORY_KEY: &str = "flipmatch_history";

/// Newest-first log of finished games, mirrored to a key-value store.
pub struct HistoryLog {
    store: Box<dyn KeyValueStore>,
    results: Vector<GameResult>,
}

impl HistoryLog {
    /// Open the log, reading whatever the store already holds.
    ///
    /// Absent and corrupt payloads both load as empty.
    #[must_use]
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let results = match Self::read(store.as_ref()) {
            Ok(results) => results,
            Err(err) => {
                warn!(error = %err, "failed to load game history, starting empty");
                Vector::new()
            }
        };

        Self { store, results }
    }

    fn read(store: &dyn KeyValueStore) -> Result<Vector<GameResult>, StoreError> {
        match store.get(HISTORY_KEY)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vector::new()),
        }
    }

    /// Recorded results, newest first.
    #[must_use]
    pub fn results(&self) -> &Vector<GameResult> {
        &self.results
    }

    /// Number of recorded results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Has nothing been recorded?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Prepend a result and rewrite the stored blob.
    pub fn record(&mut self, result: GameResult) {
        self.results.push_front(result);
        self.persist();
    }

    /// Drop every result and rewrite the stored blob.
    pub fn clear(&mut self) {
        self.results.clear();
        self.persist();
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.results) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to encode game history");
                return;
            }
        };

        if let Err(err) = self.store.put(HISTORY_KEY, &payload) {
            warn!(error = %err, "failed to persist game history");
        }
    }
}
