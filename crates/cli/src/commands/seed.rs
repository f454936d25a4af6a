//! Seed the product catalog.

use std::sync::Arc;

use murela_storefront::storage::{KeyValueStore, ProductStore, StorageError};
use tracing::info;

/// Write the built-in catalog unless one exists, or always with `force`.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn catalog(store: Arc<dyn KeyValueStore>, force: bool) -> Result<(), StorageError> {
    let products = ProductStore::new(store);
    match products.seed(force)? {
        Some(count) => info!(count, force, "Catalog seeded"),
        None => info!("Catalog already present, leaving it untouched (use --force to overwrite)"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use murela_storefront::storage::{MemoryStore, keys};

    use super::*;

    #[test]
    fn test_seed_then_skip() {
        let raw = Arc::new(MemoryStore::new());
        catalog(raw.clone(), false).unwrap();
        assert!(raw.get(keys::SHOP_PRODUCTS).unwrap().is_some());

        raw.set(keys::SHOP_PRODUCTS, "[]").unwrap();
        catalog(raw.clone(), false).unwrap();
        assert_eq!(raw.get(keys::SHOP_PRODUCTS).unwrap().as_deref(), Some("[]"));

        catalog(raw.clone(), true).unwrap();
        assert_eq!(ProductStore::new(raw).load().len(), 6);
    }
}
