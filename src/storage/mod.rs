//! Cart storage
//!
//! Durable key-value storage for cart snapshots. Only the lines and the owning
//! restaurant are stored; the cart panel flag is session state.

use mockall::automock;
use thiserror::Error;

mod file;
mod memory;
mod records;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use records::{CartLineRecord, CartSnapshot, SnapshotError};

/// Key the storefront uses for the shopper's cart.
pub const DEFAULT_CART_KEY: &str = "delivery_cart";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key is empty or contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Another user of the store panicked while holding its lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Persistent key-value storage for cart snapshots.
#[automock]
pub trait CartStorage {
    /// Store `snapshot` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write fails.
    fn save(&self, key: &str, snapshot: &CartSnapshot) -> Result<(), StorageError>;

    /// Fetch the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the read fails or the stored value is unreadable.
    fn load(&self, key: &str) -> Result<Option<CartSnapshot>, StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn save(&self, key: &str, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        (**self).save(key, snapshot)
    }

    fn load(&self, key: &str) -> Result<Option<CartSnapshot>, StorageError> {
        (**self).load(key)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
