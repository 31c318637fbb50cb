//! Storage module - the persisted bearer token
//!
//! Tokens live in named slots. Only the session store writes them; every
//! other component reads the derived [`Identity`](crate::entities::Identity).

pub mod file;
pub mod memory;

use crate::core::StorageError;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Authoritative slot holding the bearer token
pub const TOKEN_SLOT: &str = "token";

/// Legacy mirror kept for older pages. Cleared on logout, never read back.
pub const LEGACY_COOKIE_SLOT: &str = "jwt";

/// Key-value slot storage for tokens
pub trait TokenStore {
    /// Reads a slot
    ///
    /// # Returns
    /// * `Ok(Some(value))` - slot is set
    /// * `Ok(None)` - slot is empty
    /// * `Err(StorageError)` - storage could not be read
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Writes a slot, replacing any previous value
    fn put(&self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Clears a slot. Clearing an empty slot is not an error.
    fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).get(slot)
    }

    fn put(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        (**self).remove(slot)
    }
}
