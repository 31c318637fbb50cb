use super::TokenStore;
use crate::core::StorageError;
use dashmap::DashMap;
use tracing::{debug, instrument};

/// In-process token slots, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: DashMap<String, String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Store pre-seeded with a bearer token, as if a previous run had signed in
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.insert(super::TOKEN_SLOT.to_string(), token.into());
        store
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, value))]
    fn put(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        debug!("Writing token slot");
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        if self.slots.remove(slot).is_some() {
            debug!("Token slot cleared");
        }
        Ok(())
    }
}
