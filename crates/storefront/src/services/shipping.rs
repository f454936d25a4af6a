//! Simulated shipping quotes.

use std::time::Duration;

use async_trait::async_trait;
use murela_core::{Price, ShippingOption, ShippingRequest};
use rust_decimal::Decimal;

use super::{ServiceError, ShippingQuote, simulate_latency};

/// Carrier tiers as `(id, name, base price in cents, price per kg, days)`.
const TIERS: [(&str, &str, i64, i64, u32); 3] = [
    ("pac", "PAC", 1590, 2, 7),
    ("sedex", "SEDEX", 2550, 3, 3),
    ("express", "Express", 3590, 4, 1),
];

/// Quotes three fixed carrier tiers priced as a base fee plus a per-kilogram rate.
#[derive(Debug, Clone)]
pub struct MockShippingQuote {
    delay: Duration,
}

impl MockShippingQuote {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ShippingQuote for MockShippingQuote {
    #[tracing::instrument(skip(self, request), fields(destination = %request.cep_destination, weight = %request.weight))]
    async fn quote(&self, request: &ShippingRequest) -> Result<Vec<ShippingOption>, ServiceError> {
        simulate_latency(self.delay).await;

        if request.weight.is_sign_negative() {
            return Err(ServiceError::InvalidRequest(format!(
                "negative package weight: {}",
                request.weight
            )));
        }

        TIERS
            .iter()
            .map(|&(id, name, base_cents, per_kg, days)| {
                let amount = Decimal::new(base_cents, 2) + Decimal::from(per_kg) * request.weight;
                let price =
                    Price::new(amount).map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;
                Ok(ShippingOption {
                    id: id.to_string(),
                    name: name.to_string(),
                    price,
                    days,
                })
            })
            .collect()
    }
}
