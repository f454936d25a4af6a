//! Local document storage.
//!
//! The storefront keeps all of its state as JSON documents under a handful
//! of well-known keys, the way a browser keeps page state in local storage:
//!
//! - [`keys::SHOP_PRODUCTS`] - the product catalog
//! - [`keys::CART_ITEMS`] - the current cart lines
//! - [`keys::PENDING_ORDER`] - the order awaiting gateway confirmation
//! - [`keys::ADMIN_AUTHENTICATED`] - the admin login flag
//!
//! [`KeyValueStore`] is the storage seam. [`FileStore`] keeps one file per key
//! in a data directory; [`MemoryStore`] keeps everything in memory for tests.

mod cart;
mod file;
mod memory;
mod orders;
mod products;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use cart::CartStore;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use orders::PendingOrderStore;
pub use products::ProductStore;

/// Storage keys, shared with documents written by earlier versions of the shop.
pub mod keys {
    /// Key for the product catalog.
    pub const SHOP_PRODUCTS: &str = "shopProducts";

    /// Key for the cart lines.
    pub const CART_ITEMS: &str = "cartItems";

    /// Key for the pending order snapshot.
    pub const PENDING_ORDER: &str = "pendingOrder";

    /// Key for the admin login flag (`"true"` when logged in).
    pub const ADMIN_AUTHENTICATED: &str = "isAdminAuthenticated";
}

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters that cannot be used as a file name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key/value storage.
///
/// Implementations must be safe to share between request handlers; each call
/// is independent and there is no transaction support.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON document.
///
/// # Errors
///
/// Returns `StorageError` if the value cannot be read or does not decode as `T`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode and write a JSON document.
///
/// # Errors
///
/// Returns `StorageError` if the value cannot be encoded or written.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Reject keys that would escape the data directory or collide with temp files.
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
