//! Checkout errors and their buyer-facing messages.

use murela_core::{AddressField, CheckoutStep, PostalCodeError};
use thiserror::Error;

use crate::services::ServiceError;
use crate::storage::StorageError;

/// Why a checkout action was refused.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("address is missing required fields: {0:?}")]
    IncompleteAddress(Vec<AddressField>),

    #[error("invalid postal code: {0}")]
    InvalidPostalCode(#[from] PostalCodeError),

    #[error("address lookup failed: {0}")]
    AddressLookup(#[source] ServiceError),

    #[error("shipping quote failed: {0}")]
    ShippingQuote(#[source] ServiceError),

    #[error("no shipping options available")]
    NoShippingOptions,

    #[error("no shipping option selected")]
    NoShippingSelected,

    #[error("unknown shipping option: {0}")]
    UnknownShippingOption(String),

    #[error("card details are incomplete")]
    IncompleteCard,

    #[error("payment failed: {0}")]
    Payment(#[source] ServiceError),

    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    #[error("no pending order")]
    NoPendingOrder,

    #[error("cannot move from step {}", .0.number())]
    InvalidTransition(CheckoutStep),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CheckoutError {
    /// Text shown to the buyer in the inline message area.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Your cart is empty.".to_string(),
            Self::IncompleteAddress(_) => "Fill in all required address fields.".to_string(),
            Self::InvalidPostalCode(_) => "Invalid CEP. Enter a CEP with 8 digits.".to_string(),
            Self::AddressLookup(_) => "Could not look up the CEP. Try again.".to_string(),
            Self::ShippingQuote(_) => "Could not calculate shipping. Try again.".to_string(),
            Self::NoShippingOptions => "No shipping options for this address.".to_string(),
            Self::NoShippingSelected | Self::UnknownShippingOption(_) => {
                "Select a shipping option.".to_string()
            }
            Self::IncompleteCard => "Fill in all card fields.".to_string(),
            Self::Payment(_) => "Could not process the payment. Try again.".to_string(),
            Self::PaymentDeclined(reason) => reason.clone(),
            Self::NoPendingOrder => "There is no order awaiting payment.".to_string(),
            Self::InvalidTransition(_) => "That step is not available.".to_string(),
            Self::Storage(_) => "Something went wrong. Try again.".to_string(),
        }
    }

    /// Whether the failure is on our side rather than the buyer's input.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Whether an upstream service failed.
    #[must_use]
    pub const fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            Self::AddressLookup(_) | Self::ShippingQuote(_) | Self::Payment(_)
        )
    }
}
