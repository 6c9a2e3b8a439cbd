use std::sync::Arc;

use crate::domain::repositories::{KeyValueStore, StorageResult};

/// Storage key holding the completion API credential
pub const CREDENTIAL_KEY: &str = "openrouter_api_key";

/// Persists the single completion API credential
///
/// No format validation is applied; whatever the user typed is stored.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the saved credential, if one was ever saved
    pub fn load(&self) -> StorageResult<Option<String>> {
        self.store.get(CREDENTIAL_KEY)
    }

    /// Save the credential immediately
    pub fn save(&self, value: &str) -> StorageResult<()> {
        self.store.set(CREDENTIAL_KEY, value)?;
        tracing::debug!("Credential saved");
        Ok(())
    }
}
