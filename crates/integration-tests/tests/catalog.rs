//! Catalog API tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use murela_integration_tests::TestContext;
use serde_json::Value;

fn ids(body: &Value) -> Vec<i64> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn test_empty_store_serves_default_catalog() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(body["total"], 6);
    assert_eq!(body["products"][0]["name"], "Camisa Polo Empresarial");
    assert_eq!(body["products"][0]["price"], 89.9);
}

#[tokio::test]
async fn test_filters_combine_with_and() {
    let ctx = TestContext::new();

    let (_, body) = ctx.get("/api/products?size=XG").await;
    assert_eq!(ids(&body), vec![6]);

    let (_, body) = ctx.get("/api/products?color=Branco").await;
    assert_eq!(ids(&body), vec![1, 2, 4, 5]);

    let (_, body) = ctx.get("/api/products?color=Azul&model=Tradicional").await;
    assert_eq!(ids(&body), vec![1, 5]);

    let (_, body) = ctx.get("/api/products?color=Azul%20Claro").await;
    assert_eq!(ids(&body), vec![4]);

    let (_, body) = ctx.get("/api/products?size=&color=&model=").await;
    assert_eq!(ids(&body).len(), 6);

    let (_, body) = ctx.get("/api/products?size=XG&color=Rosa").await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn test_facets_in_first_seen_order() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/products/facets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["sizes"],
        serde_json::json!(["P", "M", "G", "GG", "XG"])
    );
    assert_eq!(body["colors"][0], "Azul");
    assert_eq!(body["models"][0], "Slim");
}

#[tokio::test]
async fn test_initial_options() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/products/2/options").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selection"]["size"], "P");
    assert_eq!(body["selection"]["color"], "Verde");
    assert_eq!(body["selection"]["model"], "Unissex");

    // Previous choices carry over when the product offers them.
    let (_, body) = ctx.get("/api/products/2/options?size=GG&color=Preto").await;
    assert_eq!(body["selection"]["size"], "GG");
    assert_eq!(body["selection"]["color"], "Verde");

    let (status, _) = ctx.get("/api/products/99/options").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_is_remembered_until_cleared() {
    let ctx = TestContext::new();

    let (_, body) = ctx.get("/api/products?color=Branco&model=Tradicional").await;
    assert_eq!(ids(&body), vec![1, 5]);

    let (_, body) = ctx.get("/api/products").await;
    assert_eq!(ids(&body), vec![1, 5]);
    assert_eq!(body["filter"]["color"], "Branco");

    let (status, body) = ctx.delete("/api/products/filter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), 6);

    let (_, body) = ctx.get("/api/products").await;
    assert_eq!(ids(&body).len(), 6);
}
