//! External service seams used by the checkout.
//!
//! # Services
//!
//! - [`AddressLookup`] - postal code to street address
//! - [`ShippingQuote`] - shipping options for a package
//! - [`PaymentGateway`] - payment submission and hosted checkout hand-off
//!
//! The storefront ships simulated implementations of all three
//! ([`MockAddressLookup`], [`MockShippingQuote`], [`MockPaymentGateway`]) with
//! configurable latency. Real clients plug in by implementing the traits.

mod address;
mod payment;
mod shipping;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use murela_core::{
    AddressLookupResult, PaymentRequest, PaymentResponse, PostalCode, PostalCodeError,
    ShippingOption, ShippingRequest,
};
use thiserror::Error;

use crate::config::CheckoutSettings;

pub use address::MockAddressLookup;
pub use payment::MockPaymentGateway;
pub use shipping::MockShippingQuote;

/// Errors returned by external services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The postal code was rejected.
    #[error("invalid postal code: {0}")]
    InvalidPostalCode(#[from] PostalCodeError),

    /// The request was malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The service could not be reached or failed.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a postal code into a street address.
#[async_trait]
pub trait AddressLookup: Send + Sync + 'static {
    async fn lookup(&self, cep: &PostalCode) -> Result<AddressLookupResult, ServiceError>;
}

/// Quotes shipping options for a package.
#[async_trait]
pub trait ShippingQuote: Send + Sync + 'static {
    async fn quote(&self, request: &ShippingRequest) -> Result<Vec<ShippingOption>, ServiceError>;
}

/// Submits payments.
///
/// A declined payment is reported as `Ok` with `success == false`; `Err` is
/// reserved for transport and validation failures.
#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentResponse, ServiceError>;
}

/// The set of services the checkout talks to.
#[derive(Clone)]
pub struct Services {
    pub address: Arc<dyn AddressLookup>,
    pub shipping: Arc<dyn ShippingQuote>,
    pub payment: Arc<dyn PaymentGateway>,
}

impl Services {
    /// Simulated services configured from the checkout settings.
    #[must_use]
    pub fn mock(settings: &CheckoutSettings) -> Self {
        Self {
            address: Arc::new(MockAddressLookup::new(settings.latency.address)),
            shipping: Arc::new(MockShippingQuote::new(settings.latency.shipping)),
            payment: Arc::new(MockPaymentGateway::new(settings)),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Wait out a simulated network round trip.
async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
