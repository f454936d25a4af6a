//! Product catalog persistence.

use std::sync::Arc;

use murela_core::catalog::default_catalog;
use murela_core::{Product, ProductId};
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError, keys, read_json, write_json};

/// Reads and writes the product list under [`keys::SHOP_PRODUCTS`].
#[derive(Clone)]
pub struct ProductStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProductStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the catalog.
    ///
    /// A missing document yields the built-in catalog. So does an unreadable
    /// one, after logging a warning. A stored empty list is kept as is.
    #[must_use]
    pub fn load(&self) -> Vec<Product> {
        match read_json::<Vec<Product>>(self.store.as_ref(), keys::SHOP_PRODUCTS) {
            Ok(Some(products)) => products,
            Ok(None) => {
                debug!("No stored catalog, using defaults");
                default_catalog()
            }
            Err(e) => {
                warn!(error = %e, "Stored catalog is unreadable, using defaults");
                default_catalog()
            }
        }
    }

    /// Replace the stored catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be written.
    pub fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), keys::SHOP_PRODUCTS, products)
    }

    /// Look up a single product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<Product> {
        self.load().into_iter().find(|p| p.id == id)
    }

    /// Whether a catalog document exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub fn is_stored(&self) -> Result<bool, StorageError> {
        Ok(self.store.get(keys::SHOP_PRODUCTS)?.is_some())
    }

    /// Write the built-in catalog unless one is already stored.
    ///
    /// Returns the number of products written, or `None` when an existing
    /// catalog was left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or written.
    pub fn seed(&self, force: bool) -> Result<Option<usize>, StorageError> {
        if !force && self.is_stored()? {
            return Ok(None);
        }
        let products = default_catalog();
        self.save(&products)?;
        Ok(Some(products.len()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> (Arc<MemoryStore>, ProductStore) {
        let raw = Arc::new(MemoryStore::new());
        (raw.clone(), ProductStore::new(raw))
    }

    #[test]
    fn test_missing_catalog_uses_defaults() {
        let (_, products) = store();
        assert_eq!(products.load().len(), default_catalog().len());
        assert!(!products.is_stored().unwrap());
    }

    #[test]
    fn test_corrupt_catalog_uses_defaults() {
        let (raw, products) = store();
        raw.set(keys::SHOP_PRODUCTS, "{oops").unwrap();
        assert_eq!(products.load().len(), default_catalog().len());
    }

    #[test]
    fn test_empty_catalog_is_respected() {
        let (_, products) = store();
        products.save(&[]).unwrap();
        assert!(products.load().is_empty());
    }

    #[test]
    fn test_seed() {
        let (_, products) = store();
        assert_eq!(products.seed(false).unwrap(), Some(6));

        let mut list = products.load();
        list.truncate(2);
        products.save(&list).unwrap();

        assert_eq!(products.seed(false).unwrap(), None);
        assert_eq!(products.load().len(), 2);
        assert_eq!(products.seed(true).unwrap(), Some(6));
        assert_eq!(products.load().len(), 6);
    }

    #[test]
    fn test_find() {
        let (_, products) = store();
        assert_eq!(products.find(ProductId::new(1)).unwrap().id, ProductId::new(1));
        assert!(products.find(ProductId::new(999)).is_none());
    }
}
