//! Pending order snapshot.

use std::sync::Arc;

use murela_core::PendingOrder;

use super::{KeyValueStore, StorageError, keys, read_json, write_json};

/// Holds the single order written before handing off to the payment gateway.
#[derive(Clone)]
pub struct PendingOrderStore {
    store: Arc<dyn KeyValueStore>,
}

impl PendingOrderStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the pending order, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be read or decoded.
    pub fn load(&self) -> Result<Option<PendingOrder>, StorageError> {
        read_json(self.store.as_ref(), keys::PENDING_ORDER)
    }

    /// Overwrite the pending order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    pub fn save(&self, order: &PendingOrder) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), keys::PENDING_ORDER, order)
    }

    /// Forget the pending order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(keys::PENDING_ORDER)
    }
}
