//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Shopify (missing values degrade every fetch to a configuration error)
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API access token
//!
//! Both also accept the `NEXT_PUBLIC_` prefixed names used by older deployments.
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-04)
//! - `SHOPIFY_REQUEST_TIMEOUT_SECS` - Upstream request timeout (default: 30)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `B2B_TAG` - Tag marking wholesale products (default: B2B)
//! - `B2B_PAGE_SIZE` - Products fetched per listing (default: 24, max: 250)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Largest page the Storefront API accepts for `first`.
pub const MAX_PAGE_SIZE: i64 = 250;

/// Blocklist of placeholder patterns that mean "not configured" (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Wholesale catalog settings
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
    /// Emit logs as JSON lines instead of text
    pub json_logs: bool,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain, or a full origin such as `http://127.0.0.1:8080`
    pub store: Option<String>,
    /// Shopify API version (e.g., 2024-04)
    pub api_version: String,
    /// Storefront API access token
    pub access_token: Option<SecretString>,
    /// Upper bound on a single upstream request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Wholesale catalog settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Tag every wholesale product carries
    pub b2b_tag: String,
    /// Number of products fetched for listings
    pub page_size: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            b2b_tag: "B2B".to_string(),
            page_size: 24,
        }
    }
}

impl CatalogConfig {
    /// Search expression selecting wholesale products (e.g., `tag:B2B`).
    #[must_use]
    pub fn tag_filter(&self) -> String {
        format!("tag:{}", self.b2b_tag)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed. Missing
    /// Shopify credentials are not an error; they are logged at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host: IpAddr = parse_env_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port: u16 = parse_env_or_default("STOREFRONT_PORT", "3000")?;

        let shopify = ShopifyStorefrontConfig::from_env()?;
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            host,
            port,
            shopify,
            catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
            json_logs: get_optional_env("LOG_FORMAT")
                .is_some_and(|format| format.eq_ignore_ascii_case("json")),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_env_or_default("SHOPIFY_REQUEST_TIMEOUT_SECS", "30")?;

        Ok(Self {
            store: get_env_with_alias(
                "SHOPIFY_STORE_DOMAIN",
                "NEXT_PUBLIC_SHOPIFY_STORE_DOMAIN",
            ),
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2024-04"),
            access_token: get_token(
                "SHOPIFY_STOREFRONT_ACCESS_TOKEN",
                "NEXT_PUBLIC_SHOPIFY_STOREFRONT_ACCESS_TOKEN",
            ),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Whether both the store domain and the access token are present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.store.is_some() && self.access_token.is_some()
    }

    /// The GraphQL endpoint, or `None` when the store is not configured.
    ///
    /// A store value that already carries an `http://` or `https://` scheme
    /// is used as the origin verbatim.
    #[must_use]
    pub fn endpoint(&self) -> Option<String> {
        let store = self.store.as_deref()?;
        let origin = if store.starts_with("http://") || store.starts_with("https://") {
            store.trim_end_matches('/').to_string()
        } else {
            format!("https://{store}")
        };
        Some(format!("{origin}/api/{}/graphql.json", self.api_version))
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let page_size: i64 = parse_env_or_default("B2B_PAGE_SIZE", "24")?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidEnvVar(
                "B2B_PAGE_SIZE".to_string(),
                format!("must be between 1 and {MAX_PAGE_SIZE} (got {page_size})"),
            ));
        }

        Ok(Self {
            b2b_tag: get_env_or_default("B2B_TAG", "B2B"),
            page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Get an environment variable, falling back to a legacy name.
fn get_env_with_alias(key: &str, alias: &str) -> Option<String> {
    get_optional_env(key).or_else(|| get_optional_env(alias))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, using `default` when it is unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Load the access token, discarding values that look like placeholders.
fn get_token(key: &str, alias: &str) -> Option<SecretString> {
    let value = get_env_with_alias(key, alias)?;
    if looks_like_placeholder(&value) {
        tracing::warn!(var = key, "Ignoring placeholder Storefront access token");
        return None;
    }
    Some(SecretString::from(value))
}

/// Whether a value matches a known placeholder pattern.
fn looks_like_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shopify(store: Option<&str>) -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store: store.map(String::from),
            api_version: "2024-04".to_string(),
            access_token: Some(SecretString::from("shpat_0123456789abcdef")),
            request_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_endpoint_from_domain() {
        assert_eq!(
            shopify(Some("acme.myshopify.com")).endpoint().unwrap(),
            "https://acme.myshopify.com/api/2024-04/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_from_origin() {
        assert_eq!(
            shopify(Some("http://127.0.0.1:8080/")).endpoint().unwrap(),
            "http://127.0.0.1:8080/api/2024-04/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_requires_store() {
        let config = shopify(None);
        assert!(config.endpoint().is_none());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", shopify(Some("acme.myshopify.com")));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("shpat_0123456789abcdef"));
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(looks_like_placeholder("your-storefront-token"));
        assert!(looks_like_placeholder("CHANGEME"));
        assert!(!looks_like_placeholder("shpat_0123456789abcdef"));
    }

    #[test]
    fn test_catalog_tag_filter() {
        let catalog = CatalogConfig::default();
        assert_eq!(catalog.tag_filter(), "tag:B2B");
        assert_eq!(catalog.page_size, 24);
    }
}
