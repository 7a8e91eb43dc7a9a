//! Integration test harness for the B2B storefront.
//!
//! Each test starts an `httpmock` server standing in for the Shopify
//! Storefront API and drives the full router with
//! `tower::ServiceExt::oneshot`; no ports are bound by the storefront itself.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p b2b-headless-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test harness: a failed setup step should abort the test loudly.
#![allow(clippy::expect_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use b2b_headless_storefront::config::{CatalogConfig, ShopifyStorefrontConfig, StorefrontConfig};
use b2b_headless_storefront::state::AppState;
use httpmock::MockServer;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Path the client posts to for the default API version.
pub const GRAPHQL_PATH: &str = "/api/2024-04/graphql.json";

/// Access token the harness configures.
pub const TEST_TOKEN: &str = "shpat_0123456789abcdef";

/// Storefront configuration pointed at `origin` (use `None` for unconfigured).
#[must_use]
pub fn test_config(origin: Option<String>) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        shopify: ShopifyStorefrontConfig {
            store: origin,
            api_version: "2024-04".to_string(),
            access_token: Some(SecretString::from(TEST_TOKEN)),
            request_timeout: Duration::from_secs(5),
        },
        catalog: CatalogConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
        json_logs: false,
    }
}

/// The full storefront router talking to `server`.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn router_for(server: &MockServer) -> Router {
    router_with(test_config(Some(server.base_url())))
}

/// The full storefront router for an arbitrary configuration.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn router_with(config: StorefrontConfig) -> Router {
    let state = AppState::new(config).expect("state");
    b2b_headless_storefront::app(state)
}

/// Send a GET and return the status, request ID header and body.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
pub async fn get(router: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");

    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    (status, request_id, body.to_vec())
}

/// Send a GET and decode a JSON body.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

/// A product node in the `ProductCard` shape.
#[must_use]
pub fn product_node(id: u32, title: &str, tags: &[&str], vendor: &str, amount: &str) -> Value {
    let handle = title.to_lowercase().replace(' ', "-");
    json!({
        "id": format!("gid://shopify/Product/{id}"),
        "handle": handle,
        "title": title,
        "descriptionHtml": format!("<p>{title}</p>"),
        "tags": tags,
        "vendor": vendor,
        "featuredImage": {
            "url": format!("https://cdn.shopify.com/{handle}.png"),
            "altText": null,
            "width": 800,
            "height": 800
        },
        "priceRange": {
            "minVariantPrice": {"amount": amount, "currencyCode": "USD"},
            "maxVariantPrice": {"amount": amount, "currencyCode": "USD"}
        }
    })
}

/// The three-item wholesale slice used across tests.
#[must_use]
pub fn three_products() -> Value {
    json!({
        "data": {"products": {"edges": [
            {"node": product_node(1, "Blue Widget", &["B2B", "Sale"], "Acme", "10.5")},
            {"node": product_node(2, "Red Widget", &["B2B"], "Acme", "12")},
            {"node": product_node(3, "Green Gadget", &["B2B", "New"], "Globex", "1234.5")}
        ]}}
    })
}
