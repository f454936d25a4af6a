//! Checkout API tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use murela_integration_tests::TestContext;
use murela_storefront::storage::{KeyValueStore, keys};
use serde_json::json;

#[tokio::test]
async fn test_full_checkout_flow() {
    let ctx = TestContext::new();
    ctx.post(
        "/api/cart/add",
        json!({ "productId": 1, "size": "M", "color": "Azul", "model": "Slim" }),
    )
    .await;

    // A new 8-digit CEP fills in the rest of the address.
    let (status, body) = ctx
        .put("/api/checkout/address", json!({ "cep": "01001-000", "number": "100" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"]["street"], "Praça da Sé");
    assert_eq!(body["address"]["city"], "São Paulo");
    assert_eq!(body["address"]["number"], "100");
    assert_eq!(body["stepNumber"], 1);

    let (status, body) = ctx.post("/api/checkout/next", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "shipping");
    assert_eq!(body["shippingOptions"].as_array().unwrap().len(), 3);
    assert_eq!(body["selectedShipping"], "pac");
    assert_eq!(body["shippingPrice"], 17.9);
    assert_eq!(body["total"], 107.8);

    let (_, body) = ctx
        .put("/api/checkout/shipping", json!({ "optionId": "sedex" }))
        .await;
    assert_eq!(body["selectedShipping"], "sedex");
    assert_eq!(body["shippingPrice"], 28.5);

    let (_, body) = ctx.post("/api/checkout/next", json!({})).await;
    assert_eq!(body["step"], "payment");

    let (_, body) = ctx
        .put(
            "/api/checkout/payment",
            json!({ "method": "credit_card", "card": { "number": "4111111111111111" } }),
        )
        .await;
    assert_eq!(body["cardComplete"], false);

    let (status, body) = ctx.post("/api/checkout/next", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Fill in all card fields.");
    assert!(ctx.store.get(keys::PENDING_ORDER).unwrap().is_none());

    ctx.put(
        "/api/checkout/payment",
        json!({
            "method": "credit_card",
            "card": {
                "number": "4111111111111111",
                "name": "MARIA SILVA",
                "expiry": "12/30",
                "cvv": "123",
                "installments": "1"
            }
        }),
    )
    .await;
    let (status, body) = ctx.post("/api/checkout/next", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "payment");
    assert!(body["payment"]["transactionId"].as_str().unwrap().starts_with("GN-"));
    assert!(body["payment"]["checkoutUrl"].as_str().is_some());
    assert_eq!(body["message"]["kind"], "info");
    assert!(ctx.store.get(keys::PENDING_ORDER).unwrap().is_some());

    let (status, body) = ctx.get("/api/checkout/success").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["total"], 118.4);
    assert_eq!(body["order"]["shipping"]["id"], "sedex");
    assert_eq!(body["order"]["paymentMethod"], "credit_card");
    assert_eq!(body["checkout"]["step"], "confirmation");
    assert!(body["checkout"]["items"].as_array().unwrap().is_empty());

    let (_, cart) = ctx.get("/api/cart").await;
    assert_eq!(cart["itemCount"], 0);

    let (_, body) = ctx.post("/api/checkout/finish", json!({})).await;
    assert_eq!(body["step"], "address");
    assert!(body["shippingOptions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_pix_payment_returns_code() {
    let ctx = TestContext::new();
    ctx.post("/api/cart/add", json!({ "productId": 2 })).await;
    ctx.put(
        "/api/checkout/address",
        json!({ "cep": "20010000", "number": "5" }),
    )
    .await;
    ctx.post("/api/checkout/next", json!({})).await;
    ctx.post("/api/checkout/next", json!({})).await;
    ctx.put("/api/checkout/payment", json!({ "method": "pix" }))
        .await;

    let (status, body) = ctx.post("/api/checkout/next", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["payment"]["transactionId"].as_str().unwrap().starts_with("PIX-"));
    assert!(body["payment"]["pixCode"].as_str().is_some());
}

#[tokio::test]
async fn test_empty_cart_cannot_leave_address() {
    let ctx = TestContext::new();
    ctx.put(
        "/api/checkout/address",
        json!({ "cep": "01001000", "number": "1" }),
    )
    .await;

    let (status, body) = ctx.post("/api/checkout/next", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (_, body) = ctx.get("/api/checkout").await;
    assert_eq!(body["step"], "address");
    assert_eq!(body["message"]["kind"], "error");
}

#[tokio::test]
async fn test_incomplete_address_is_refused() {
    let ctx = TestContext::new();
    ctx.post("/api/cart/add", json!({ "productId": 1 })).await;
    ctx.put("/api/checkout/address", json!({ "cep": "123" })).await;

    let (status, body) = ctx.post("/api/checkout/next", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Fill in all required address fields.");
}

#[tokio::test]
async fn test_invalid_cep_lookup() {
    let ctx = TestContext::new();
    ctx.put("/api/checkout/address", json!({ "cep": "1234" })).await;

    let (status, body) = ctx.post("/api/checkout/address/lookup", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid CEP. Enter a CEP with 8 digits.");
}

#[tokio::test]
async fn test_navigation_bounds() {
    let ctx = TestContext::new();

    let (status, _) = ctx.post("/api/checkout/back", json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = ctx
        .put("/api/checkout/shipping", json!({ "optionId": "pac" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = ctx.get("/api/checkout/success").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
