//! Cart API tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use murela_core::Cart;
use murela_integration_tests::TestContext;
use murela_storefront::storage::{KeyValueStore, keys};
use serde_json::json;

#[tokio::test]
async fn test_same_options_merge_and_different_options_split() {
    let ctx = TestContext::new();

    let add = json!({ "productId": 1, "size": "M", "color": "Azul", "model": "Slim" });
    ctx.post("/api/cart/add", add.clone()).await;
    let (status, body) = ctx.post("/api/cart/add", add).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["itemCount"], 2);

    let (_, body) = ctx
        .post(
            "/api/cart/add",
            json!({ "productId": 1, "size": "G", "color": "Azul", "model": "Slim" }),
        )
        .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["itemCount"], 3);
    assert_eq!(body["total"], 269.7);
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let ctx = TestContext::new();
    let (_, body) = ctx
        .post("/api/cart/add", json!({ "productId": 2, "size": "P" }))
        .await;
    let line = body["items"][0]["line"].clone();

    let (_, body) = ctx
        .post("/api/cart/update", json!({ "line": line, "delta": 4 }))
        .await;
    assert_eq!(body["items"][0]["quantity"], 5);
    assert_eq!(body["items"][0]["lineTotal"], 649.5);

    let (status, body) = ctx
        .post("/api/cart/update", json!({ "line": line, "delta": -10 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["total"], 0.0);

    let (status, _) = ctx
        .post("/api/cart/update", json!({ "line": line, "delta": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_line_and_persistence() {
    let ctx = TestContext::new();
    ctx.post("/api/cart/add", json!({ "productId": 3 })).await;
    let (_, body) = ctx.post("/api/cart/add", json!({ "productId": 4 })).await;
    let line = body["items"][0]["line"].clone();

    let stored: Cart = serde_json::from_str(&ctx.store.get(keys::CART_ITEMS).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 2);

    let (status, body) = ctx.post("/api/cart/remove", json!({ "line": line })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["id"], 4);

    let stored: Cart = serde_json::from_str(&ctx.store.get(keys::CART_ITEMS).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);

    let (status, _) = ctx.post("/api/cart/remove", json!({ "line": line })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_product() {
    let ctx = TestContext::new();
    let (status, body) = ctx.post("/api/cart/add", json!({ "productId": 42 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("product 42"));
}
