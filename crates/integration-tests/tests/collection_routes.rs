//! Collection listing and detail routes.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use b2b_headless_integration_tests::{GRAPHQL_PATH, get, get_json, product_node, router_for};
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;

#[tokio::test]
async fn test_collection_listing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .json_body_partial(r#"{"operationName": "GetAllCollections"}"#);
            then.status(200).json_body(json!({"data": {"collections": {"edges": [
                {"node": {
                    "id": "gid://shopify/Collection/1",
                    "handle": "summer-sale",
                    "title": "Summer Sale",
                    "descriptionHtml": "",
                    "image": null
                }},
                {"node": {
                    "id": "gid://shopify/Collection/2",
                    "handle": "bulk-packs",
                    "title": "Bulk Packs",
                    "descriptionHtml": "<p>Cases of 12</p>",
                    "image": {"url": "https://cdn.shopify.com/bulk.png", "altText": "Stacked cases", "width": 400, "height": 300}
                }}
            ]}}}));
        })
        .await;

    let (status, body) = get_json(&router_for(&server), "/collections").await;

    assert_eq!(status, StatusCode::OK);
    let collections = body["collections"].as_array().expect("collections");
    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0]["handle"], "summer-sale");
    assert!(collections[0]["description_html"].is_null());
    assert_eq!(collections[1]["image"]["alt"], "Stacked cases");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_collection_listing_is_bad_gateway_on_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(500).body("Internal Server Error");
        })
        .await;

    let (status, _, _) = get(&router_for(&server), "/collections").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_collection_detail_filters_by_bare_tag() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .json_body_partial(
                    r#"{"operationName": "GetCollectionWithWholesaleProducts", "variables": {"handle": "summer-sale", "firstProducts": 24, "productFilters": [{"tag": "B2B"}]}}"#,
                );
            then.status(200).json_body(json!({"data": {"collection": {
                "id": "gid://shopify/Collection/1",
                "handle": "summer-sale",
                "title": "Summer Sale",
                "descriptionHtml": "<p>Warm weather stock</p>",
                "image": null,
                "products": {"edges": [
                    {"node": product_node(1, "Blue Widget", &["B2B"], "Acme", "10.5")}
                ]}
            }}}));
        })
        .await;

    let (status, body) = get_json(&router_for(&server), "/collections/summer-sale").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_title"], "Collection: Summer Sale | Wholesale Portal");
    assert_eq!(body["title"], "Summer Sale");
    assert_eq!(body["products"][0]["price"], "$10.50");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_collection_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(200).json_body(json!({"data": {"collection": null}}));
        })
        .await;

    let (status, _, _) = get(&router_for(&server), "/collections/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
