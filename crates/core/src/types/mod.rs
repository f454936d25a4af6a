//! Core types for the Murela storefront.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! records exchanged with the checkout services.

pub mod address;
pub mod id;
pub mod order;
pub mod payment;
pub mod price;
pub mod product;
pub mod shipping;
pub mod status;

pub use address::{Address, AddressField, AddressLookupResult, PostalCode, PostalCodeError};
pub use id::*;
pub use order::PendingOrder;
pub use payment::{
    CreditCard, Customer, CustomerAddress, PaymentItem, PaymentMethod, PaymentRequest,
    PaymentResponse,
};
pub use price::{Price, PriceError};
pub use product::{Facet, Product, ProductDraft, ProductError, parse_facet_list};
pub use shipping::{PackageFormat, ShippingOption, ShippingRequest};
pub use status::{CheckoutStep, FlashMessage, MessageKind};
