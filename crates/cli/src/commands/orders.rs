//! Pending order inspection.

use std::sync::Arc;

use murela_storefront::storage::{KeyValueStore, PendingOrderStore};
use tracing::info;

/// Print the pending order as JSON, and drop it with `clear`.
///
/// # Errors
///
/// Returns an error if the order cannot be read, encoded or removed.
#[allow(clippy::print_stdout)]
pub fn pending(
    store: Arc<dyn KeyValueStore>,
    clear: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let orders = PendingOrderStore::new(store);
    let Some(order) = orders.load()? else {
        info!("No pending order");
        return Ok(());
    };

    println!("{}", serde_json::to_string_pretty(&order)?);

    if clear {
        orders.clear()?;
        info!(transaction_id = ?order.transaction_id, "Pending order removed");
    }
    Ok(())
}
