//! Payment submission records.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::id::ProductId;
use super::price::Price;

/// How the buyer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Pix,
    Boleto,
}

impl PaymentMethod {
    /// Prefix used for gateway transaction ids.
    #[must_use]
    pub const fn transaction_prefix(self) -> &'static str {
        match self {
            Self::CreditCard => "GN",
            Self::Pix => "PIX",
            Self::Boleto => "BOL",
        }
    }
}

/// Card details entered in the payment step.
///
/// Implements `Debug` manually to redact the card number and CVV.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditCard {
    pub number: String,
    pub name: String,
    /// `MM/YY` as typed.
    pub expiry: String,
    pub cvv: String,
    pub installments: String,
}

impl CreditCard {
    /// Whether number, name, expiry and CVV are all filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.number, &self.name, &self.expiry, &self.cvv]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Last four digits of the card number, for display.
    #[must_use]
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let skip = digits.len().saturating_sub(4);
        digits.into_iter().skip(skip).collect()
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("name", &self.name)
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .field("installments", &self.installments)
            .finish()
    }
}

/// Billing address in the gateway's shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

impl From<&Address> for CustomerAddress {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            number: address.number.clone(),
            complement: Some(address.complement.clone()).filter(|c| !c.trim().is_empty()),
            neighborhood: address.neighborhood.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zipcode: address.cep.clone(),
        }
    }
}

/// The paying customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: CustomerAddress,
}

/// One order line as sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

/// Payment submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub payment_method: PaymentMethod,
    pub total: Price,
    pub items: Vec<PaymentItem>,
    pub customer: Customer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCard>,
}

/// Gateway answer to a payment submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto_code: Option<String>,
    /// Hosted checkout page the buyer is sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
}
