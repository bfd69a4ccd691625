use crate::local_store::{LocalStore, error::Result as StoreResult};

use std::sync::Arc;

/// Durable home of the session credential: a single named key in the local
/// store.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn LocalStore>,
    key: String,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn LocalStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored token; a blank value counts as absent.
    pub fn load(&self) -> StoreResult<Option<String>> {
        Ok(self
            .store
            .get(&self.key)?
            .filter(|token| !token.trim().is_empty()))
    }

    pub fn save(&self, token: &str) -> StoreResult<()> {
        self.store.set(&self.key, token)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(&self.key)
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
