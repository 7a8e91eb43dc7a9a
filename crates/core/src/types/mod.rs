//! Core types for the B2B storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod handle;
pub mod price;

pub use handle::{Handle, HandleError};
pub use price::{CurrencyCode, PRICE_UNAVAILABLE, Price, PriceError, format_price};
