use std::sync::Arc;

use chrono::Utc;

use crate::domain::completion::CompletionResult;
use crate::domain::repositories::{KeyValueStore, StorageError, StorageResult};

/// Maximum number of results kept in the archive
pub const ARCHIVE_CAPACITY: usize = 10;

/// Key prefix shared by every archived result
pub const RESULT_KEY_PREFIX: &str = "result_";

/// Bounded rolling history of completions on top of a KeyValueStore
///
/// Each result is stored under `result_<epoch millis>`, zero-padded to 13
/// digits. Keys are ordered by their numeric suffix; `result_` keys without
/// one sort before every numbered key. Recording a result first evicts the
/// oldest entries until `ARCHIVE_CAPACITY - 1` remain.
#[derive(Clone)]
pub struct ResultArchive {
    store: Arc<dyn KeyValueStore>,
}

impl ResultArchive {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persists `result` and enforces the capacity bound
    ///
    /// # Returns
    /// * `Ok(String)` - The key the result was stored under
    /// * `Err(StorageError)` - If the backing store fails
    pub fn record(&self, result: &CompletionResult) -> StorageResult<String> {
        let keys = self.sorted_keys()?;

        // Suffixes never repeat, even for two results in the same millisecond
        let newest = keys.iter().filter_map(|key| key_suffix(key)).max();
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let suffix = match newest {
            Some(newest) if newest >= now => newest.checked_add(1).ok_or_else(|| {
                StorageError::KeysExhausted(format!("{}{}", RESULT_KEY_PREFIX, newest))
            })?,
            _ => now,
        };

        if keys.len() >= ARCHIVE_CAPACITY {
            let excess = keys.len() - (ARCHIVE_CAPACITY - 1);
            for key in &keys[..excess] {
                self.store.delete(key)?;
            }
            tracing::debug!(evicted = excess, "Evicted archived results");
        }

        let key = format!("{}{:013}", RESULT_KEY_PREFIX, suffix);
        self.store.set(&key, &serde_json::to_string(result)?)?;

        tracing::info!(key = %key, template = %result.template_id, "Recorded completion result");
        Ok(key)
    }

    /// Archived results, oldest first
    ///
    /// Entries that fail to decode are skipped with a warning.
    pub fn entries(&self) -> StorageResult<Vec<(String, CompletionResult)>> {
        let mut entries = Vec::new();
        for key in self.sorted_keys()? {
            let Some(raw) = self.store.get(&key)? else {
                continue;
            };
            match serde_json::from_str::<CompletionResult>(&raw) {
                Ok(result) => entries.push((key, result)),
                Err(e) => tracing::warn!(key = %key, error = %e, "Skipping undecodable archived result"),
            }
        }
        Ok(entries)
    }

    /// The most recently recorded result, if any
    pub fn latest(&self) -> StorageResult<Option<CompletionResult>> {
        Ok(self.entries()?.pop().map(|(_, result)| result))
    }

    fn sorted_keys(&self) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(RESULT_KEY_PREFIX))
            .collect();
        keys.sort_by(|a, b| key_suffix(a).cmp(&key_suffix(b)).then_with(|| a.cmp(b)));
        Ok(keys)
    }
}

fn key_suffix(key: &str) -> Option<u64> {
    key.strip_prefix(RESULT_KEY_PREFIX)?.parse().ok()
}
