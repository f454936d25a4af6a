//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Error bodies are JSON: `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::admin::AdminError;
use crate::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A checkout action was refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// An admin action was refused.
    #[error("Admin error: {0}")]
    Admin(#[from] AdminError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Checkout(err) => {
                if err.is_server_error() {
                    StatusCode::INTERNAL_SERVER_ERROR
                } else if err.is_upstream_error() {
                    StatusCode::BAD_GATEWAY
                } else if matches!(err, CheckoutError::NoPendingOrder) {
                    StatusCode::NOT_FOUND
                } else if matches!(err, CheckoutError::InvalidTransition(_)) {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            }
            Self::Admin(err) => match err {
                AdminError::Unauthorized | AdminError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                AdminError::NotFound(_) => StatusCode::NOT_FOUND,
                AdminError::InvalidProduct(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AdminError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message safe to show the client.
    fn client_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Admin(AdminError::Storage(_)) => {
                "Internal server error".to_string()
            }
            Self::Checkout(err) => err.user_message(),
            Self::Admin(AdminError::Unauthorized) => "Admin login required".to_string(),
            Self::Admin(AdminError::InvalidCredentials) => {
                "Invalid username or password".to_string()
            }
            Self::Admin(AdminError::InvalidProduct(_)) => {
                "Name and price are required and the price must be greater than zero".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request refused");
        }

        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for buyer and admin actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use murela_core::{CheckoutStep, ProductError, ProductId};

    use super::*;
    use crate::services::ServiceError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AdminError::Unauthorized.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AdminError::NotFound(ProductId::new(9)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AdminError::InvalidProduct(ProductError::MissingName).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(CheckoutError::EmptyCart.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(CheckoutError::InvalidTransition(CheckoutStep::Address).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(
                CheckoutError::ShippingQuote(ServiceError::Unavailable("down".to_string())).into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_client_message_hides_internals() {
        let err = AppError::Admin(AdminError::InvalidCredentials);
        assert_eq!(err.client_message(), "Invalid username or password");

        let err = AppError::Checkout(CheckoutError::IncompleteCard);
        assert_eq!(err.client_message(), "Fill in all card fields.");
    }
}
