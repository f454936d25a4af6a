//! HTTP route handlers for storefront.
//!
//! All endpoints speak JSON. Errors come back as `{"error": "..."}` with a
//! matching status code.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                       - Health check
//!
//! # Catalog
//! GET    /api/products                 - Products matching ?size=&color=&model=
//!                                        (no query reuses the remembered filter)
//! DELETE /api/products/filter          - Forget the remembered filter
//! GET    /api/products/facets          - Distinct sizes, colors and models
//! GET    /api/products/{id}/options    - Starting option selection for a product
//!
//! # Cart
//! GET    /api/cart                     - Cart lines, item count and total
//! POST   /api/cart/add                 - Add one unit with the chosen options
//! POST   /api/cart/update              - Change a line's quantity by a delta
//! POST   /api/cart/remove              - Remove a line
//!
//! # Checkout
//! GET    /api/checkout                 - Checkout state
//! PUT    /api/checkout/address         - Address form (looks up a new 8-digit CEP)
//! POST   /api/checkout/address/lookup  - Look up the current CEP
//! PUT    /api/checkout/shipping        - Choose a shipping option
//! PUT    /api/checkout/payment         - Payment method, card and payer
//! POST   /api/checkout/next            - Advance (submits payment on step 3)
//! POST   /api/checkout/back            - Go back one step
//! GET    /api/checkout/success         - Gateway return, confirms the order
//! POST   /api/checkout/finish          - Start over
//!
//! # Admin (requires login)
//! POST   /api/admin/login              - Log in
//! POST   /api/admin/logout             - Log out
//! GET    /api/admin/products           - List products
//! POST   /api/admin/products           - Create product
//! PUT    /api/admin/products/{id}      - Replace product
//! DELETE /api/admin/products/{id}      - Delete product
//! POST   /api/admin/images/next        - Next image for the product form
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/filter", delete(catalog::clear_filter))
        .route("/facets", get(catalog::facets))
        .route("/{id}/options", get(catalog::options))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/address", put(checkout::update_address))
        .route("/address/lookup", post(checkout::lookup_address))
        .route("/shipping", put(checkout::select_shipping))
        .route("/payment", put(checkout::set_payment))
        .route("/next", post(checkout::next))
        .route("/back", post(checkout::back))
        .route("/success", get(checkout::success))
        .route("/finish", post(checkout::finish))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/products", get(admin::list).post(admin::create))
        .route("/products/{id}", put(admin::update).delete(admin::delete))
        .route("/images/next", post(admin::next_image))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", catalog_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/checkout", checkout_routes())
        .nest("/api/admin", admin_routes())
}
