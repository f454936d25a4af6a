//! Catalog inspection.

use std::sync::Arc;

use murela_core::Product;
use murela_storefront::storage::{KeyValueStore, ProductStore};

/// One table row per product.
fn format_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<32}  {:>12}  sizes={}  colors={}  models={}",
        product.id,
        product.name,
        product.price.to_string(),
        product.sizes.join(","),
        product.colors.join(","),
        product.models.join(","),
    )
}

/// Print the catalog, falling back to the built-in one when none is stored.
#[allow(clippy::print_stdout)]
pub fn list(store: Arc<dyn KeyValueStore>) {
    let products = ProductStore::new(store).load();
    for product in &products {
        println!("{}", format_row(product));
    }
    println!("{} product(s)", products.len());
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use murela_core::catalog::default_catalog;

    use super::*;

    #[test]
    fn test_format_row() {
        let catalog = default_catalog();
        let row = format_row(&catalog[0]);
        assert!(row.contains("Camisa Polo Empresarial"));
        assert!(row.contains("R$ 89.90"));
    }
}
