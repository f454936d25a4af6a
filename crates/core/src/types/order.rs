//! Pending order snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::payment::PaymentMethod;
use super::price::Price;
use super::shipping::ShippingOption;
use crate::cart::CartItem;

/// Order written after a payment is submitted, awaiting confirmation from
/// the external gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    pub items: Vec<CartItem>,
    /// Subtotal plus shipping.
    pub total: Price,
    pub shipping: ShippingOption,
    pub address: Address,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
