//! Cart persistence.

use std::sync::Arc;

use murela_core::Cart;
use tracing::warn;

use super::{KeyValueStore, StorageError, keys, read_json, write_json};

/// Reads and writes the cart lines under [`keys::CART_ITEMS`].
#[derive(Clone)]
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
}

impl CartStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the cart; missing or unreadable documents give an empty cart.
    #[must_use]
    pub fn load(&self) -> Cart {
        match read_json::<Cart>(self.store.as_ref(), keys::CART_ITEMS) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Stored cart is unreadable, starting empty");
                Cart::new()
            }
        }
    }

    /// Persist the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), keys::CART_ITEMS, cart)
    }

    /// Empty the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.save(&Cart::new())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use murela_core::OptionSelection;
    use murela_core::catalog::default_catalog;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_save_load_clear() {
        let carts = CartStore::new(Arc::new(MemoryStore::new()));
        assert!(carts.load().is_empty());

        let products = default_catalog();
        let mut cart = Cart::new();
        cart.add(&products[0], &OptionSelection::default());
        cart.add(&products[0], &OptionSelection::default());
        carts.save(&cart).unwrap();

        let loaded = carts.load();
        assert_eq!(loaded.item_count(), 2);
        assert_eq!(loaded.total(), cart.total());

        carts.clear().unwrap();
        assert!(carts.load().is_empty());
    }

    #[test]
    fn test_unreadable_cart_is_empty() {
        let raw = Arc::new(MemoryStore::new());
        raw.set(keys::CART_ITEMS, "[{\"id\":").unwrap();
        assert!(CartStore::new(raw).load().is_empty());
    }
}
