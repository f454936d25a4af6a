//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::Uri,
};
use murela_core::{FacetOptions, OptionSelection, Product, ProductFilter, ProductId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Filtered catalog.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub filter: ProductFilter,
    pub total: usize,
}

/// A product with the options its detail view starts with.
#[derive(Debug, Serialize)]
pub struct ProductOptionsView {
    pub product: Product,
    pub selection: OptionSelection,
}

/// List products matching the facet filter.
///
/// The filter is remembered for the session; a request without a query
/// string reuses the remembered one.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    uri: Uri,
    Query(filter): Query<ProductFilter>,
) -> Json<CatalogView> {
    let mut session = state.session().await;
    let filter = if uri.query().is_some() {
        session.filter = filter.clone();
        filter
    } else {
        session.filter.clone()
    };
    drop(session);

    Json(catalog_view(&state, filter))
}

/// Forget the remembered filter and list every product.
#[instrument(skip(state))]
pub async fn clear_filter(State(state): State<AppState>) -> Json<CatalogView> {
    state.session().await.filter.clear();
    Json(catalog_view(&state, ProductFilter::default()))
}

fn catalog_view(state: &AppState, filter: ProductFilter) -> CatalogView {
    let products = filter.apply(&state.products().load());
    CatalogView {
        total: products.len(),
        products,
        filter,
    }
}

/// Distinct facet values across the whole catalog.
#[instrument(skip(state))]
pub async fn facets(State(state): State<AppState>) -> Json<FacetOptions> {
    Json(FacetOptions::from_products(&state.products().load()))
}

/// Starting selection for a product; query parameters carry the previous choice.
#[instrument(skip(state))]
pub async fn options(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Query(previous): Query<OptionSelection>,
) -> Result<Json<ProductOptionsView>> {
    let product = state
        .products()
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let selection = OptionSelection::initial_for(&product, &previous);

    Ok(Json(ProductOptionsView { product, selection }))
}
