//! Murela Core - Shared types and domain logic.
//!
//! This crate provides the types and pure logic used across the Murela components:
//! - `storefront` - Catalog, cart, checkout and admin HTTP API
//! - `cli` - Command-line tools for seeding and inspecting the local store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no service clients. Everything here can be unit tested without a
//! runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and postal codes, plus the
//!   product, address, shipping, payment and order records
//! - [`catalog`] - Facet filtering, facet option extraction and the seed catalog
//! - [`cart`] - Cart lines, merge rules and totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartItem, LineKey};
pub use catalog::{FacetOptions, OptionSelection, ProductFilter};
pub use types::*;
