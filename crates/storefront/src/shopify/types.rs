//! Domain types for Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! GraphQL response shapes in `storefront::queries`.

use b2b_headless_core::{Price, PriceError, format_price};
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Parse into a decimal [`Price`].
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a non-negative decimal or the
    /// currency code is malformed.
    pub fn to_price(&self) -> Result<Price, PriceError> {
        Price::parse(&self.amount, &self.currency_code)
    }

    /// Format for display in the money's own currency (e.g., `$10.50`).
    #[must_use]
    pub fn formatted(&self) -> String {
        format_money(Some(self))
    }
}

/// Format an optional [`Money`], falling back to `"Price unavailable"`.
#[must_use]
pub fn format_money(money: Option<&Money>) -> String {
    format_price(
        money.map(|m| m.amount.as_str()),
        money.map(|m| m.currency_code.as_str()),
    )
}

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

impl PriceRange {
    /// Format as `$10.00`, or `$10.00 - $12.00` when the ends render
    /// differently. `"10"` and `"10.00"` are the same price.
    #[must_use]
    pub fn display(&self) -> String {
        let min = self.min_variant_price.formatted();
        let max = self.max_variant_price.formatted();
        if min == max {
            min
        } else {
            format!("{min} - {max}")
        }
    }
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "Large", "Blue").
    pub value: String,
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option ID.
    pub id: String,
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values (e.g., `["Small", "Medium", "Large"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// SKU code.
    pub sku: Option<String>,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Current price.
    pub price: Money,
    /// Variant image.
    pub image: Option<Image>,
    /// Selected options for this variant.
    pub selected_options: Vec<SelectedOption>,
}

/// A catalog item.
///
/// List queries only select a subset of fields; `options` and `variants` are
/// empty unless the detail query fetched them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// HTML description.
    pub description_html: String,
    /// Product tags, in Shopify's order.
    pub tags: Vec<String>,
    /// Vendor name.
    pub vendor: Option<String>,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Product options.
    pub options: Vec<ProductOption>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// HTML description.
    pub description_html: Option<String>,
    /// Collection image.
    pub image: Option<Image>,
    /// Products in this collection (empty when only listing collections).
    pub products: Vec<Product>,
}

// =============================================================================
// Verification
// =============================================================================

/// A product detail fetch paired with the B2B verification sub-query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedProduct {
    /// The product looked up by handle, if it exists.
    pub product: Option<Product>,
    /// ID of the first product matched by the verification query.
    pub verified_id: Option<String>,
}

impl VerifiedProduct {
    /// Whether the verification query matched this exact product.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        match (&self.product, &self.verified_id) {
            (Some(product), Some(id)) => product.id == *id,
            _ => false,
        }
    }

    /// Consumes the lookup and returns the product only if it is verified.
    #[must_use]
    pub fn into_verified(self) -> Option<Product> {
        if self.is_verified() {
            self.product
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(amount: &str, code: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: code.to_string(),
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            handle: "widget".to_string(),
            title: "Widget".to_string(),
            description_html: String::new(),
            tags: vec!["B2B".to_string()],
            vendor: None,
            featured_image: None,
            price_range: PriceRange {
                min_variant_price: money("1.00", "USD"),
                max_variant_price: money("1.00", "USD"),
            },
            options: Vec::new(),
            variants: Vec::new(),
        }
    }

    #[test]
    fn test_money_formatted() {
        assert_eq!(money("10.5", "USD").formatted(), "$10.50");
        assert_eq!(money("abc", "USD").formatted(), "Price unavailable");
        assert_eq!(format_money(None), "Price unavailable");
    }

    #[test]
    fn test_price_range_display() {
        let single = PriceRange {
            min_variant_price: money("10", "USD"),
            max_variant_price: money("10", "USD"),
        };
        assert_eq!(single.display(), "$10.00");

        let range = PriceRange {
            min_variant_price: money("10", "USD"),
            max_variant_price: money("12.5", "USD"),
        };
        assert_eq!(range.display(), "$10.00 - $12.50");
    }

    #[test]
    fn test_price_range_display_compares_rendered_prices() {
        let same = PriceRange {
            min_variant_price: money("10", "USD"),
            max_variant_price: money("10.00", "USD"),
        };
        assert_eq!(same.display(), "$10.00");

        let rounds_together = PriceRange {
            min_variant_price: money("10.001", "USD"),
            max_variant_price: money("10.004", "USD"),
        };
        assert_eq!(rounds_together.display(), "$10.00");

        let other_currency = PriceRange {
            min_variant_price: money("10", "USD"),
            max_variant_price: money("10", "CAD"),
        };
        assert_eq!(other_currency.display(), "$10.00 - CA$10.00");
    }

    #[test]
    fn test_verified_product_matches_id() {
        let lookup = VerifiedProduct {
            product: Some(product("gid://shopify/Product/1")),
            verified_id: Some("gid://shopify/Product/1".to_string()),
        };
        assert!(lookup.is_verified());
        assert!(lookup.into_verified().is_some());
    }

    #[test]
    fn test_verified_product_rejects_other_id() {
        let lookup = VerifiedProduct {
            product: Some(product("gid://shopify/Product/1")),
            verified_id: Some("gid://shopify/Product/2".to_string()),
        };
        assert!(!lookup.is_verified());
        assert!(lookup.into_verified().is_none());
    }

    #[test]
    fn test_verified_product_requires_both_parts() {
        let no_match = VerifiedProduct {
            product: Some(product("gid://shopify/Product/1")),
            verified_id: None,
        };
        assert!(!no_match.is_verified());

        let no_product = VerifiedProduct {
            product: None,
            verified_id: Some("gid://shopify/Product/1".to_string()),
        };
        assert!(!no_product.is_verified());
    }
}
