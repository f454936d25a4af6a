//! Admin route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use murela_core::{Price, Product, ProductDraft, ProductId, parse_facet_list};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::admin::{self, AdminError};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Login form.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login state.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// Product form as submitted by the admin panel.
///
/// Facet lists are comma-separated text, e.g. `"P, M, G"`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sizes: String,
    #[serde(default)]
    pub colors: String,
    #[serde(default)]
    pub models: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub weight: Option<Decimal>,
}

impl From<ProductForm> for ProductDraft {
    fn from(form: ProductForm) -> Self {
        Self {
            name: form.name,
            price: form.price,
            image: form.image,
            image_url: form.image_url,
            description: form.description,
            sizes: parse_facet_list(&form.sizes),
            colors: parse_facet_list(&form.colors),
            models: parse_facet_list(&form.models),
            weight: form.weight,
        }
    }
}

/// Image picker request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextImageRequest {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Image picker answer.
#[derive(Debug, Serialize)]
pub struct NextImageResponse {
    pub image: String,
}

/// Log in.
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionStatus>> {
    state.admin().login(&request.username, &request.password)?;
    Ok(Json(SessionStatus {
        authenticated: true,
    }))
}

/// Log out.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Json<SessionStatus>> {
    state.admin().logout()?;
    Ok(Json(SessionStatus {
        authenticated: false,
    }))
}

/// List all products.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.admin().list()?))
}

/// Create a product.
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.admin().create(form.into())?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(form): Json<ProductForm>,
) -> Result<Json<Product>> {
    Ok(Json(state.admin().update(id, form.into())?))
}

/// Delete a product and drop its lines from the cart.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<StatusCode> {
    if !state.admin().delete(id)? {
        return Err(AdminError::NotFound(id).into());
    }

    let mut session = state.session().await;
    let removed = session.cart.remove_product(id);
    if removed > 0 {
        state.save_cart(&session.cart)?;
        info!(%id, lines = removed, "Removed deleted product from cart");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Next image for the product form.
#[instrument(skip(state))]
pub async fn next_image(
    State(state): State<AppState>,
    Json(request): Json<NextImageRequest>,
) -> Result<Json<NextImageResponse>> {
    if !state.admin().is_authenticated() {
        return Err(AppError::Admin(AdminError::Unauthorized));
    }
    Ok(Json(NextImageResponse {
        image: admin::next_image(&request.image, request.image_url.as_deref()),
    }))
}
