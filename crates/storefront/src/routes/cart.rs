//! Cart route handlers.
//!
//! Every mutation is written through to the document store before responding.

use axum::{Json, extract::State};
use murela_core::{Cart, CartItem, LineKey, OptionSelection, Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// One cart line with its identity and line total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub line: LineKey,
    #[serde(flatten)]
    pub item: CartItem,
    pub line_total: Price,
}

/// Cart display data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u32,
    pub total: Price,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartLineView {
                    line: item.key(),
                    line_total: item.line_total(),
                    item: item.clone(),
                })
                .collect(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// Add-to-cart request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub options: OptionSelection,
}

/// Quantity change request.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub line: LineKey,
    pub delta: i64,
}

/// Line removal request.
#[derive(Debug, Deserialize)]
pub struct RemoveLineRequest {
    pub line: LineKey,
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let session = state.session().await;
    Json(CartView::from(&session.cart))
}

/// Add one unit of a product with the chosen options.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .products()
        .find(request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let mut session = state.session().await;
    session.cart.add(&product, &request.options);
    state.save_cart(&session.cart)?;
    add_breadcrumb("cart", &format!("Added {}", product.name));

    Ok(Json(CartView::from(&session.cart)))
}

/// Change a line's quantity; lines reaching zero are removed.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let mut session = state.session().await;
    if session.cart.get(&request.line).is_none() {
        return Err(AppError::NotFound("cart line".to_string()));
    }
    session.cart.update_quantity(&request.line, request.delta);
    state.save_cart(&session.cart)?;

    Ok(Json(CartView::from(&session.cart)))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveLineRequest>,
) -> Result<Json<CartView>> {
    let mut session = state.session().await;
    if !session.cart.remove(&request.line) {
        return Err(AppError::NotFound("cart line".to_string()));
    }
    state.save_cart(&session.cart)?;

    Ok(Json(CartView::from(&session.cart)))
}
