//! HTTP route handlers for storefront.
//!
//! Pages are served as JSON view models.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /api/health             - Status and timestamp
//!
//! # Products
//! GET  /products               - Wholesale product grid (?q=&tag=&vendor=)
//! GET  /products/{handle}      - Verified product detail
//!
//! # Collections
//! GET  /collections            - Collection listing
//! GET  /collections/{handle}   - Collection detail with wholesale products
//! ```

pub mod collections;
pub mod health;
pub mod products;

use axum::{Router, routing::get};
use b2b_headless_core::Handle;
use serde::Serialize;

use crate::error::AppError;
use crate::shopify::Image;
use crate::state::AppState;

/// Suffix appended to every page title.
pub const SITE_NAME: &str = "Wholesale Portal";

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}", get(collections::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::liveness))
        .route("/api/health", get(health::status))
        .nest("/products", product_routes())
        .nest("/collections", collection_routes())
}

/// Page title derived from a handle (`blue-widget` -> `Blue Widget | Wholesale Portal`).
#[must_use]
pub fn page_title(handle: &Handle) -> String {
    format!("{} | {SITE_NAME}", handle.to_title())
}

/// Validate a path handle, rejecting anything that could alter a search query.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the handle is malformed.
pub fn parse_handle(raw: &str) -> Result<Handle, AppError> {
    Handle::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Image display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ImageView {
    /// Build from an image, falling back to `title` when there is no alt text.
    #[must_use]
    pub fn new(image: &Image, title: &str) -> Self {
        Self {
            url: image.url.clone(),
            alt: image
                .alt_text
                .clone()
                .filter(|alt| !alt.trim().is_empty())
                .unwrap_or_else(|| title.to_string()),
            width: image.width,
            height: image.height,
        }
    }
}
