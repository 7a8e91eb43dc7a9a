//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Every GraphQL call returns a [`FetchResult`]: data, errors, or both.
//!   Configuration, transport and parse failures are folded into
//!   [`ApiError`] values instead of being raised, so every page handles
//!   upstream failure the same way.
//! - Shopify is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for API responses (5 minute TTL), chosen per
//!   request with a [`CacheDirective`]
//!
//! # Example
//!
//! ```rust,ignore
//! use b2b_headless_storefront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify)?;
//!
//! let result = client.get_b2b_products(24, "tag:B2B").await;
//! if let Some(products) = result.data() {
//!     // render, possibly alongside result.errors()
//! }
//! ```

mod storefront;
pub mod types;

pub use storefront::queries::verification_query;
pub use storefront::{
    CacheDirective, GraphQLRequest, MISSING_CONFIGURATION, StorefrontClient, UnknownCacheDirective,
};
pub use types::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a caller needs strict (all-or-nothing) results.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_api_errors(.0))]
    GraphQL(Vec<ApiError>),
}

/// A GraphQL error returned by the Shopify API, or a local failure
/// normalized into the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ApiErrorLocation>,
    /// Path to the error in the response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
    /// Platform-specific details (e.g., `code`, `cost`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ApiError {
    /// An error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl From<graphql_client::Error> for ApiError {
    fn from(error: graphql_client::Error) -> Self {
        Self {
            message: error.message,
            locations: error.locations.map_or_else(Vec::new, |locs| {
                locs.into_iter()
                    .map(|l| ApiErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect()
            }),
            path: error.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
            extensions: error
                .extensions
                .map(|ext| ext.into_iter().collect::<serde_json::Map<_, _>>()),
        }
    }
}

// =============================================================================
// FetchResult
// =============================================================================

/// Outcome of a single Storefront API call.
///
/// Holds data, a non-empty list of errors, or both (partial data). A result
/// without data always carries at least one error; the constructors enforce
/// this.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    data: Option<T>,
    errors: Vec<ApiError>,
}

impl<T> FetchResult<T> {
    /// A complete result with no errors.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed result with a single error.
    #[must_use]
    pub fn failed(error: ApiError) -> Self {
        Self {
            data: None,
            errors: vec![error],
        }
    }

    /// Build a result from the parts of a GraphQL envelope.
    ///
    /// An envelope with neither data nor errors becomes a single
    /// "No data in response" error.
    #[must_use]
    pub fn from_parts(data: Option<T>, errors: Vec<ApiError>) -> Self {
        if data.is_none() && errors.is_empty() {
            return Self::failed(ApiError::new("No data in response"));
        }
        Self { data, errors }
    }

    /// The (possibly partial) data.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Errors reported alongside or instead of data.
    #[must_use]
    pub fn errors(&self) -> &[ApiError] {
        &self.errors
    }

    /// Whether any error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether the result has data and no errors.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.data.is_some() && self.errors.is_empty()
    }

    /// Consume the result, keeping only the data.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Consume the result into its data and errors.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Vec<ApiError>) {
        (self.data, self.errors)
    }

    /// Transform the data, keeping the errors.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        FetchResult {
            data: self.data.map(f),
            errors: self.errors,
        }
    }

    /// Strict view: any error (even next to partial data) becomes `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::GraphQL`] carrying every reported error.
    pub fn into_result(self) -> Result<T, ShopifyError> {
        match (self.data, self.errors.is_empty()) {
            (Some(data), true) => Ok(data),
            (_, _) => Err(ShopifyError::GraphQL(self.errors)),
        }
    }
}

fn format_api_errors(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let err = ShopifyError::GraphQL(vec![
            ApiError::new("Field not found"),
            ApiError::new("Invalid ID"),
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_empty_messages() {
        let errors = vec![ApiError {
            message: String::new(),
            locations: vec![ApiErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("products".to_string()),
                serde_json::Value::Number(0.into()),
            ],
            extensions: None,
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: products.0 at line 5:10"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let err = ShopifyError::GraphQL(vec![ApiError::new("")]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_fetch_result_without_data_has_an_error() {
        let result: FetchResult<u32> = FetchResult::from_parts(None, Vec::new());
        assert!(result.data().is_none());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(
            result.errors().first().map(|e| e.message.as_str()),
            Some("No data in response")
        );
    }

    #[test]
    fn test_fetch_result_partial_data() {
        let result = FetchResult::from_parts(Some(7), vec![ApiError::new("Throttled")]);
        assert_eq!(result.data(), Some(&7));
        assert!(result.has_errors());
        assert!(!result.is_complete());
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_fetch_result_map_keeps_errors() {
        let result = FetchResult::from_parts(Some(2), vec![ApiError::new("partial")]);
        let mapped = result.map(|n| n * 10);
        assert_eq!(mapped.data(), Some(&20));
        assert_eq!(mapped.errors().len(), 1);
    }

    #[test]
    fn test_fetch_result_ok_into_result() {
        let result = FetchResult::ok("data");
        assert!(result.is_complete());
        assert_eq!(result.into_result().unwrap(), "data");
    }

    #[test]
    fn test_api_error_from_graphql_client() {
        let raw: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "Field 'foo' doesn't exist on type 'Product'",
            "locations": [{"line": 3, "column": 7}],
            "path": ["products", 0, "foo"],
            "extensions": {"code": "undefinedField"}
        }))
        .unwrap();

        let error = ApiError::from(raw);
        assert_eq!(error.locations, vec![ApiErrorLocation { line: 3, column: 7 }]);
        assert_eq!(error.path, vec![
            serde_json::json!("products"),
            serde_json::json!(0),
            serde_json::json!("foo"),
        ]);
        assert_eq!(
            error.extensions.unwrap().get("code"),
            Some(&serde_json::json!("undefinedField"))
        );
    }

    #[test]
    fn test_api_error_serializes_without_empty_fields() {
        let json = serde_json::to_value(ApiError::new("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "boom"}));
    }
}
