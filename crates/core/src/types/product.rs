//! Catalog products and the admin-side product draft.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Errors returned when validating a [`ProductDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product name is blank.
    #[error("product name is required")]
    MissingName,
    /// The price is zero.
    #[error("product price must be greater than zero")]
    ZeroPrice,
}

/// A selectable product attribute dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Size,
    Color,
    Model,
}

impl Facet {
    /// All facets, in display order.
    pub const ALL: [Self; 3] = [Self::Size, Self::Color, Self::Model];
}

/// A catalog product.
///
/// Field names serialize in camelCase to match the stored catalog documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Bundled image path or an external URL.
    pub image: String,
    /// External image URL entered in the admin form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub description: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub models: Vec<String>,
    /// Shipping weight of one unit in kilograms.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub weight: Option<Decimal>,
}

impl Product {
    /// Values this product offers for a facet.
    #[must_use]
    pub fn facet_values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Size => &self.sizes,
            Facet::Color => &self.colors,
            Facet::Model => &self.models,
        }
    }

    /// Whether the product offers `value` for `facet`.
    #[must_use]
    pub fn offers(&self, facet: Facet, value: &str) -> bool {
        self.facet_values(facet).iter().any(|v| v == value)
    }
}

/// Product fields as edited in the admin panel, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub weight: Option<Decimal>,
}

impl ProductDraft {
    /// Validate the draft and turn it into a product with the given id.
    ///
    /// Blank image URLs are dropped and facet values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] if the name is blank or the price is zero.
    pub fn into_product(self, id: ProductId) -> Result<Product, ProductError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ProductError::MissingName);
        }
        if self.price.is_zero() {
            return Err(ProductError::ZeroPrice);
        }

        Ok(Product {
            id,
            name,
            price: self.price,
            image: self.image,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            description: self.description,
            sizes: clean_values(self.sizes),
            colors: clean_values(self.colors),
            models: clean_values(self.models),
            weight: self.weight,
        })
    }
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            price: product.price,
            image: product.image,
            image_url: product.image_url,
            description: product.description,
            sizes: product.sizes,
            colors: product.colors,
            models: product.models,
            weight: product.weight,
        }
    }
}

/// Split comma-separated facet input into trimmed, non-empty values.
///
/// ```
/// use murela_core::types::product::parse_facet_list;
///
/// assert_eq!(parse_facet_list("P, M,, G "), vec!["P", "M", "G"]);
/// ```
#[must_use]
pub fn parse_facet_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn clean_values(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
