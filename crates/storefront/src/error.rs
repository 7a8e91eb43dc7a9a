//! Route-level errors rendered as JSON.
//!
//! Upstream failures are reported to Sentry; client errors (bad handles,
//! products outside the wholesale catalog) are only logged at debug level.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::shopify::ShopifyError;

/// Errors a page handler can return.
#[derive(Debug, Error)]
pub enum AppError {
    /// The Storefront API call reported errors.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Missing, or not part of the wholesale catalog.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed path or query input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    error: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show a client; upstream details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Shopify(_) => "Upstream catalog unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request failed upstream"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            status: status.as_u16(),
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a Sentry breadcrumb with string data.
///
/// ```rust,ignore
/// add_breadcrumb("navigation", "Viewed product page", Some(&[("handle", "blue-widget")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let data = data
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| {
            (
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            )
        })
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}
