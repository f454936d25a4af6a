//! Admin panel errors.

use murela_core::{ProductError, ProductId};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AdminError {
    /// No admin is logged in.
    #[error("admin login required")]
    Unauthorized,

    /// Username or password did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
