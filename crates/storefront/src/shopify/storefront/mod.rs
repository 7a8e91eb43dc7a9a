//! Shopify Storefront API client implementation.
//!
//! Uses hand-written `graphql_client` operations with `reqwest` 0.13 for
//! HTTP. Complete responses are cached with `moka` (5-minute TTL) according
//! to each request's [`CacheDirective`].

mod cache;
mod conversions;
pub mod queries;

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use b2b_headless_core::Handle;
use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{Collection, Product, VerifiedProduct};
use crate::shopify::{ApiError, FetchResult, ShopifyError};

pub use cache::{CacheDirective, UnknownCacheDirective};
use conversions::{
    convert_collection_detail, convert_collection_list, convert_product_list,
    convert_verified_product,
};
use queries::{
    GetAllCollections, GetCollectionWithWholesaleProducts, GetProductByHandle,
    GetWholesaleProducts, get_all_collections, get_collection_with_wholesale_products,
    get_product_by_handle, get_wholesale_products, verification_query,
};

/// Message reported when the store domain or access token is not set.
pub const MISSING_CONFIGURATION: &str = "Shopify configuration is missing.";

/// Header carrying the Storefront API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Upstream bodies are truncated to this many characters in logs.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// GraphQLRequest
// =============================================================================

/// A GraphQL document with its variables and cache policy.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLRequest {
    query: Cow<'static, str>,
    variables: Map<String, Value>,
    cache: CacheDirective,
    operation_name: Option<&'static str>,
}

impl GraphQLRequest {
    /// A request for `query` with no variables and the default cache policy.
    #[must_use]
    pub fn new(query: impl Into<Cow<'static, str>>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
            cache: CacheDirective::default(),
            operation_name: None,
        }
    }

    /// Build a request from a typed operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the variables do not serialize to a JSON object
    /// (or to `null`, meaning no variables).
    pub fn from_query<Q: GraphQLQuery>(variables: Q::Variables) -> Result<Self, serde_json::Error> {
        let body = Q::build_query(variables);
        let variables = match serde_json::to_value(&body.variables)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(serde::ser::Error::custom(format!(
                    "variables must serialize to an object, got {other}"
                )));
            }
        };

        Ok(Self {
            query: Cow::Borrowed(body.query),
            variables,
            cache: CacheDirective::default(),
            operation_name: Some(body.operation_name),
        })
    }

    /// Set one variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Replace all variables.
    #[must_use]
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Set the cache policy.
    #[must_use]
    pub const fn cache(mut self, directive: CacheDirective) -> Self {
        self.cache = directive;
        self
    }

    /// The query document.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The cache policy.
    #[must_use]
    pub const fn cache_directive(&self) -> CacheDirective {
        self.cache
    }

    fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: &self.query,
            variables: &self.variables,
            operation_name: self.operation_name,
        }
    }
}

/// Wire body: `variables` is omitted when there are none.
///
/// Typed operations share a document per resource, so they also send
/// `operationName` to pick the operation to run.
#[derive(Serialize)]
struct RequestBody<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "is_empty_map")]
    variables: &'a Map<String, Value>,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    operation_name: Option<&'static str>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_empty_map(map: &&Map<String, Value>) -> bool {
    map.is_empty()
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Every call returns a [`FetchResult`]; nothing here returns `Err` once the
/// client is built.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: Option<Url>,
    access_token: Option<SecretString>,
    cache: Cache<String, Arc<Value>>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// A missing or unparseable store domain, or a missing token, does not
    /// fail here: every fetch reports [`MISSING_CONFIGURATION`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ShopifyStorefrontConfig) -> Result<Self, ShopifyError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let endpoint = config.endpoint().and_then(|raw| match Url::parse(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(endpoint = %raw, error = %e, "Invalid Shopify endpoint");
                None
            }
        });

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                endpoint,
                access_token: config.access_token.clone(),
                cache,
            }),
        })
    }

    /// Whether the client has an endpoint and a token to call it with.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.endpoint.is_some() && self.inner.access_token.is_some()
    }

    /// Send a GraphQL request and normalize the outcome.
    ///
    /// Configuration, transport, HTTP status and decode failures all come
    /// back as a single [`ApiError`]. GraphQL errors are returned alongside
    /// any partial data.
    #[instrument(
        skip(self, request),
        fields(operation = request.operation_name.unwrap_or("anonymous"), cache = ?request.cache)
    )]
    pub async fn fetch<T: DeserializeOwned>(&self, request: &GraphQLRequest) -> FetchResult<T> {
        let (Some(endpoint), Some(token)) = (&self.inner.endpoint, &self.inner.access_token)
        else {
            tracing::error!("Shopify store domain or Storefront access token is not configured");
            return FetchResult::failed(ApiError::new(MISSING_CONFIGURATION));
        };

        let key = cache::cache_key(&request.query, request.operation_name, &request.variables);

        if request.cache.reads_cache()
            && let Some(cached) = self.inner.cache.get(&key).await
        {
            match T::deserialize(cached.as_ref()) {
                Ok(data) => {
                    debug!("Cache hit");
                    return FetchResult::ok(data);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Cached response no longer decodes; refetching");
                }
            }
        }

        let envelope = match self.send(endpoint, token, request).await {
            Ok(envelope) => envelope,
            Err(error) => return FetchResult::failed(error),
        };

        let mut errors: Vec<ApiError> = envelope
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(ApiError::from)
            .collect();

        if !errors.is_empty() {
            tracing::warn!(
                count = errors.len(),
                errors = ?errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
                "GraphQL errors in response"
            );
        }

        let raw = envelope.data.filter(|value| !value.is_null());
        let data = match raw.as_ref().map(|value| T::deserialize(value)).transpose() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "Shopify response data has an unexpected shape");
                errors.push(ApiError::new(e.to_string()));
                None
            }
        };

        let result = FetchResult::from_parts(data, errors);

        if result.is_complete()
            && request.cache.writes_cache()
            && let Some(raw) = raw
        {
            self.inner.cache.insert(key, Arc::new(raw)).await;
        }

        result
    }

    /// POST the request and parse the GraphQL envelope.
    async fn send(
        &self,
        endpoint: &Url,
        token: &SecretString,
        request: &GraphQLRequest,
    ) -> Result<Response<Value>, ApiError> {
        let response = self
            .inner
            .client
            .post(endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(&request.body())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Shopify request failed");
                ApiError::new(e.to_string())
            })?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await.map_err(|e| {
            tracing::error!(status = %status, error = %e, "Failed to read Shopify response body");
            ApiError::new(e.to_string())
        })?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&response_text),
                "Shopify API returned non-success status"
            );
            return Err(ApiError::new(format!(
                "Shopify API HTTP error! status: {}",
                status.as_u16()
            )));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&response_text),
                "Failed to parse Shopify GraphQL response"
            );
            ApiError::new(e.to_string())
        })
    }

    /// Run a typed operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
        cache: CacheDirective,
    ) -> FetchResult<Q::ResponseData> {
        match GraphQLRequest::from_query::<Q>(variables) {
            Ok(request) => self.fetch(&request.cache(cache)).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode GraphQL variables");
                FetchResult::failed(ApiError::new(e.to_string()))
            }
        }
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the first `first` products matching a search expression
    /// (e.g., `tag:B2B`).
    #[instrument(skip(self))]
    pub async fn get_b2b_products(&self, first: i64, query: &str) -> FetchResult<Vec<Product>> {
        let variables = get_wholesale_products::Variables {
            first,
            query: Some(query.to_string()),
        };

        self.execute::<GetWholesaleProducts>(variables, CacheDirective::Default)
            .await
            .map(convert_product_list)
    }

    /// Get a product by handle together with the B2B verification sub-query.
    ///
    /// The caller decides what to show; [`VerifiedProduct::into_verified`]
    /// keeps the product only when the sub-query matched it.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_with_verification(
        &self,
        handle: &Handle,
        tag_filter: &str,
    ) -> FetchResult<VerifiedProduct> {
        let variables = get_product_by_handle::Variables {
            handle: handle.to_string(),
            product_query_for_verification: verification_query(handle.as_str(), tag_filter),
        };

        self.execute::<GetProductByHandle>(variables, CacheDirective::Default)
            .await
            .map(convert_verified_product)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get the first 25 collections.
    #[instrument(skip(self))]
    pub async fn get_collections(&self) -> FetchResult<Vec<Collection>> {
        self.execute::<GetAllCollections>(get_all_collections::Variables, CacheDirective::Default)
            .await
            .map(convert_collection_list)
    }

    /// Get a collection with its first `first` products carrying `tag`.
    ///
    /// The data is `None` when no collection has this handle.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_by_handle(
        &self,
        handle: &Handle,
        first: i64,
        tag: &str,
    ) -> FetchResult<Option<Collection>> {
        let variables = get_collection_with_wholesale_products::Variables {
            handle: handle.to_string(),
            first_products: first,
            product_filters: Some(vec![
                get_collection_with_wholesale_products::ProductFilter {
                    tag: Some(tag.to_string()),
                },
            ]),
        };

        self.execute::<GetCollectionWithWholesaleProducts>(variables, CacheDirective::Default)
            .await
            .map(convert_collection_detail)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
