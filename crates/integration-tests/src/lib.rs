//! Integration tests for the Murela storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`,
//! backed by an in-memory document store and zero-latency mock services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p murela-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use murela_storefront::config::{AdminCredentials, CheckoutSettings, StorefrontConfig};
use murela_storefront::storage::MemoryStore;
use murela_storefront::{AppState, app};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

/// Admin username used by [`TestContext`].
pub const ADMIN_USERNAME: &str = "admin";
/// Admin password used by [`TestContext`].
pub const ADMIN_PASSWORD: &str = "integration-S3cret";

/// Largest response body the helpers will read.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration with fixed admin credentials and no artificial latency.
///
/// # Panics
///
/// Panics if the literal base URL fails to parse.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: Url::parse("http://localhost:3000").expect("valid base URL"),
        data_dir: PathBuf::from(".murela-test"),
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
        },
        checkout: CheckoutSettings::local(),
        sentry_dsn: None,
    }
}

/// A storefront router over a fresh in-memory store.
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryStore>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(test_config(), store.clone());
        Self {
            app: app(state),
            store,
        }
    }

    /// Send a request and decode the JSON response (`Value::Null` for empty bodies).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the response is not JSON.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("Failed to read body");

        if bytes.is_empty() {
            return (status, Value::Null);
        }
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        });
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Log in with the test admin credentials.
    ///
    /// # Panics
    ///
    /// Panics if the login is refused.
    pub async fn login_admin(&self) {
        let (status, _) = self
            .post(
                "/api/admin/login",
                serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed");
    }
}
