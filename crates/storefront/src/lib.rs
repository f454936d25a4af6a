//! Murela Storefront library.
//!
//! This crate provides the storefront as a library so the binary, the CLI
//! and the integration tests share one router and one storage layout.
//!
//! # Modules
//!
//! - [`storage`] - JSON documents under fixed keys (file or in-memory)
//! - [`services`] - Address lookup, shipping quote and payment seams, with mocks
//! - [`checkout`] - The four-step checkout state machine
//! - [`admin`] - Admin login and catalog CRUD
//! - [`routes`] - JSON HTTP API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod checkout;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the storefront router with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
