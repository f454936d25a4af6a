//! Shopping cart lines, merge rules and totals.
//!
//! A line is identified by its [`LineKey`]: the product id together with the
//! chosen size, color and model. Adding a product with the same options bumps
//! the existing line; any difference in options starts a new line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::OptionSelection;
use crate::types::{PaymentItem, Price, Product, ProductId};

/// Shipping weight assumed for products without one, in kilograms.
pub const DEFAULT_UNIT_WEIGHT_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Smallest total weight sent for a shipping quote, in kilograms.
pub const MIN_SHIPMENT_WEIGHT_KG: Decimal = Decimal::ONE;

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl LineKey {
    /// Key for a product with the given options.
    #[must_use]
    pub fn new(product_id: ProductId, options: &OptionSelection) -> Self {
        let options = options.clone().normalized();
        Self {
            product_id,
            size: options.size,
            color: options.color,
            model: options.model,
        }
    }
}

/// A product in the cart with its chosen options.
///
/// Serializes as the product's own fields plus `quantity` and the
/// `selected*` options, which is the shape stored under the cart key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<String>,
}

impl CartItem {
    /// This line's identity.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id, &self.options())
    }

    /// The chosen options.
    #[must_use]
    pub fn options(&self) -> OptionSelection {
        OptionSelection {
            size: self.selected_size.clone(),
            color: self.selected_color.clone(),
            model: self.selected_model.clone(),
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    /// Unit weight (or the default) times quantity.
    #[must_use]
    pub fn weight(&self) -> Decimal {
        self.product.weight.unwrap_or(DEFAULT_UNIT_WEIGHT_KG) * Decimal::from(self.quantity)
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.key() == *key
    }
}

impl From<&CartItem> for PaymentItem {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.product.id,
            name: item.product.name.clone(),
            price: item.product.price,
            quantity: item.quantity,
        }
    }
}

/// The shopping cart.
///
/// Lines keep insertion order. Every line has a quantity of at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored lines, dropping empty ones and merging
    /// duplicates.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            let key = item.key();
            match cart.items.iter_mut().find(|line| line.matches(&key)) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of `product` with the chosen options.
    ///
    /// Returns the key of the line that was created or incremented.
    pub fn add(&mut self, product: &Product, options: &OptionSelection) -> LineKey {
        let key = LineKey::new(product.id, options);
        if let Some(line) = self.items.iter_mut().find(|line| line.matches(&key)) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
                selected_size: key.size.clone(),
                selected_color: key.color.clone(),
                selected_model: key.model.clone(),
            });
        }
        key
    }

    /// Change a line's quantity by `delta`.
    ///
    /// The result is clamped at zero and a line reaching zero is removed.
    /// Returns the new quantity, or `None` if the line was removed or does
    /// not exist.
    pub fn update_quantity(&mut self, key: &LineKey, delta: i64) -> Option<u32> {
        let index = self.items.iter().position(|line| line.matches(key))?;
        let line = self.items.get_mut(index)?;
        let updated = i64::from(line.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        let updated = u32::try_from(updated).unwrap_or(0);
        if updated == 0 {
            self.items.remove(index);
            return None;
        }
        line.quantity = updated;
        Some(updated)
    }

    /// Remove a line. Returns whether it existed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(key));
        self.items.len() != before
    }

    /// Remove every line of a product. Returns how many lines were removed.
    pub fn remove_product(&mut self, product_id: ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|line| line.product.id != product_id);
        before - self.items.len()
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Shipment weight in kilograms, never below [`MIN_SHIPMENT_WEIGHT_KG`].
    #[must_use]
    pub fn total_weight(&self) -> Decimal {
        let weight: Decimal = self.items.iter().map(CartItem::weight).sum();
        weight.max(MIN_SHIPMENT_WEIGHT_KG)
    }

    /// The lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|line| line.matches(key))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
