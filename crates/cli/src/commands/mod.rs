//! CLI command implementations.

pub mod cart;
pub mod orders;
pub mod products;
pub mod seed;
