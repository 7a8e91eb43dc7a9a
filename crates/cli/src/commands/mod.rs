//! Command implementations.

pub mod catalog;
pub mod collections;

use std::io::Write;

use b2b_headless_core::HandleError;
use b2b_headless_storefront::config::{CatalogConfig, ConfigError, StorefrontConfig};
use b2b_headless_storefront::shopify::{FetchResult, ShopifyError, StorefrontClient};
use serde::Serialize;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shopify(#[from] ShopifyError),

    #[error("Invalid handle: {0}")]
    InvalidHandle(#[from] HandleError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration and client shared by every command.
pub struct Context {
    pub client: StorefrontClient,
    pub catalog: CatalogConfig,
}

impl Context {
    /// Load configuration and build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is malformed or the HTTP client
    /// cannot be built.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = StorefrontConfig::from_env()?;
        if !config.shopify.is_configured() {
            tracing::warn!("Shopify store domain or Storefront access token is not set");
        }

        Ok(Self {
            client: StorefrontClient::new(&config.shopify)?,
            catalog: config.catalog,
        })
    }
}

/// Keep whatever data came back, logging any errors beside it.
///
/// # Errors
///
/// Returns `CommandError::Shopify` when the result carries no data.
pub fn require_data<T>(result: FetchResult<T>) -> Result<T, CommandError> {
    let (data, errors) = result.into_parts();
    for error in &errors {
        tracing::warn!(message = %error.message, "Shopify reported an error");
    }
    data.ok_or(CommandError::Shopify(ShopifyError::GraphQL(errors)))
}

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn print_json(value: &impl Serialize) -> Result<(), CommandError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
