//! Cache policy for Storefront API responses.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-request cache policy, named after the fetch cache modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheDirective {
    /// Serve a cached response when present; otherwise fetch and store.
    #[default]
    ForceCache,
    /// Same as [`CacheDirective::ForceCache`].
    Default,
    /// Always fetch; never read or write the cache.
    NoStore,
    /// Always fetch; replace the cached response on success.
    Reload,
}

impl CacheDirective {
    /// Whether a cached response may satisfy the request.
    #[must_use]
    pub const fn reads_cache(self) -> bool {
        matches!(self, Self::ForceCache | Self::Default)
    }

    /// Whether a complete response should be written back.
    #[must_use]
    pub const fn writes_cache(self) -> bool {
        !matches!(self, Self::NoStore)
    }
}

/// Error parsing a [`CacheDirective`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cache directive: {0}")]
pub struct UnknownCacheDirective(String);

impl FromStr for CacheDirective {
    type Err = UnknownCacheDirective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "force-cache" => Ok(Self::ForceCache),
            "default" => Ok(Self::Default),
            "no-store" => Ok(Self::NoStore),
            "reload" | "no-cache" => Ok(Self::Reload),
            other => Err(UnknownCacheDirective(other.to_string())),
        }
    }
}

/// Cache key: the query document, the selected operation, and the variables
/// with top-level names sorted.
pub fn cache_key(
    query: &str,
    operation_name: Option<&str>,
    variables: &serde_json::Map<String, serde_json::Value>,
) -> String {
    let mut key = query.to_string();
    if let Some(name) = operation_name {
        key.push('\u{0}');
        key.push_str(name);
    }
    if !variables.is_empty() {
        let sorted: BTreeMap<&String, &serde_json::Value> = variables.iter().collect();
        key.push('\u{0}');
        key.push_str(&serde_json::to_string(&sorted).unwrap_or_default());
    }
    key
}
