//! B2B Headless Core - Shared types library.
//!
//! This crate provides common types used across all B2B Headless components:
//! - `storefront` - Wholesale catalog service backed by the Shopify Storefront API
//! - `cli` - Command-line tools for querying the wholesale catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - URL handles and decimal prices with locale-aware formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
