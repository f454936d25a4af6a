//! Cart maintenance.

use std::sync::Arc;

use murela_storefront::storage::{CartStore, KeyValueStore, StorageError};
use tracing::info;

/// Empty the stored cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn clear(store: Arc<dyn KeyValueStore>) -> Result<(), StorageError> {
    let carts = CartStore::new(store);
    let lines = carts.load().len();
    carts.clear()?;
    info!(lines, "Cart cleared");
    Ok(())
}
