//! Shipping quote request and option records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::address::PostalCode;
use super::price::Price;

/// Package shape, as the carrier quote API distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackageFormat {
    /// Box or package.
    #[default]
    Box,
    /// Roll or prism.
    Roll,
    /// Envelope.
    Envelope,
}

impl PackageFormat {
    /// Carrier numeric code (1 = box, 2 = roll, 3 = envelope).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Box => 1,
            Self::Roll => 2,
            Self::Envelope => 3,
        }
    }
}

/// Request for shipping rates between two postal codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRequest {
    pub cep_origin: PostalCode,
    pub cep_destination: PostalCode,
    /// Kilograms.
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
    /// Centimetres.
    pub length: u32,
    pub height: u32,
    pub width: u32,
    pub diameter: u32,
    pub format: PackageFormat,
}

impl ShippingRequest {
    /// Request using the storefront's standard 20x10x15 cm box.
    #[must_use]
    pub const fn standard_box(
        cep_origin: PostalCode,
        cep_destination: PostalCode,
        weight: Decimal,
    ) -> Self {
        Self {
            cep_origin,
            cep_destination,
            weight,
            length: 20,
            height: 10,
            width: 15,
            diameter: 10,
            format: PackageFormat::Box,
        }
    }
}

/// A shipping service offered for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub name: String,
    pub price: Price,
    /// Estimated delivery time in business days.
    pub days: u32,
}
