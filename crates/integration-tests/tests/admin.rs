//! Admin API tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use murela_integration_tests::{ADMIN_USERNAME, TestContext};
use murela_storefront::storage::{KeyValueStore, keys};
use serde_json::{Value, json};

fn polo_form() -> Value {
    json!({
        "name": "Camiseta Básica",
        "price": 59.9,
        "description": "Algodão",
        "sizes": "P, M, , G",
        "colors": "Branco,Preto",
        "models": ""
    })
}

#[tokio::test]
async fn test_requires_login() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/admin/products").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Admin login required");

    let (status, _) = ctx.post("/api/admin/products", polo_form()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.delete("/api/admin/products/1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.post("/api/admin/images/next", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .post(
            "/api/admin/login",
            json!({ "username": ADMIN_USERNAME, "password": "nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_product_crud() {
    let ctx = TestContext::new();
    ctx.login_admin().await;

    let (status, body) = ctx.get("/api/admin/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (status, created) = ctx.post("/api/admin/products", polo_form()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 7);
    assert_eq!(created["sizes"], json!(["P", "M", "G"]));
    assert_eq!(created["colors"], json!(["Branco", "Preto"]));
    assert_eq!(created["models"], json!([]));

    // The storefront sees the new product right away.
    let (_, catalog) = ctx.get("/api/products?color=Preto").await;
    let names: Vec<&str> = catalog["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Camiseta Básica"));

    let mut form = polo_form();
    form["price"] = json!(64.5);
    let (status, updated) = ctx.put("/api/admin/products/7", form).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 64.5);

    let (status, _) = ctx.put("/api/admin/products/70", polo_form()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.delete("/api/admin/products/7").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = ctx.delete("/api/admin/products/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = ctx.get("/api/admin/products").await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_invalid_product_is_refused() {
    let ctx = TestContext::new();
    ctx.login_admin().await;

    let mut form = polo_form();
    form["price"] = json!(0);
    let (status, _) = ctx.post("/api/admin/products", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut form = polo_form();
    form["name"] = json!("   ");
    let (status, _) = ctx.post("/api/admin/products", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_image_cycle_and_logout() {
    let ctx = TestContext::new();
    ctx.login_admin().await;

    let (_, body) = ctx.post("/api/admin/images/next", json!({})).await;
    let first = body["image"].as_str().unwrap().to_string();
    assert_eq!(first, "/images/polo_uniforme_simbolo.png");

    let (_, body) = ctx
        .post("/api/admin/images/next", json!({ "image": first }))
        .await;
    assert_eq!(body["image"], "/images/scrub_uniforme_final.png");

    let (_, body) = ctx
        .post(
            "/api/admin/images/next",
            json!({ "image": first, "imageUrl": "https://cdn.example.com/a.png" }),
        )
        .await;
    assert_eq!(body["image"], "https://cdn.example.com/a.png");

    let (status, body) = ctx.post("/api/admin/logout", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);

    let (status, _) = ctx.get("/api/admin/products").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_drops_product_from_cart() {
    let ctx = TestContext::new();
    ctx.post("/api/cart/add", json!({ "productId": 3, "size": "P" }))
        .await;
    ctx.post("/api/cart/add", json!({ "productId": 3, "size": "G" }))
        .await;
    ctx.post("/api/cart/add", json!({ "productId": 4 })).await;

    ctx.login_admin().await;
    let (status, _) = ctx.delete("/api/admin/products/3").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, cart) = ctx.get("/api/cart").await;
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 4);
    assert_eq!(cart["total"], 119.9);

    let stored = ctx.store.get(keys::CART_ITEMS).unwrap().unwrap();
    assert!(!stored.contains("Kit Uniforme Corporativo"));
}
