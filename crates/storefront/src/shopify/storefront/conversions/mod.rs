//! Type conversion functions for Shopify Storefront API responses.
//!
//! Every generated operation module carries its own copy of the fragment
//! types it selects, so the fragment conversions are stamped out per module.

/// `MoneyFields` and `ImageFields` for one generated module.
macro_rules! money_and_image_conversions {
    ($module:ident) => {
        impl From<$module::MoneyFields> for crate::shopify::types::Money {
            fn from(money: $module::MoneyFields) -> Self {
                Self {
                    currency_code: super::currency_code(&money.currency_code),
                    amount: money.amount,
                }
            }
        }

        image_conversion!($module);
    };
}

/// `ImageFields` for one generated module.
macro_rules! image_conversion {
    ($module:ident) => {
        impl From<$module::ImageFields> for crate::shopify::types::Image {
            fn from(image: $module::ImageFields) -> Self {
                Self {
                    url: image.url,
                    alt_text: image.alt_text,
                    width: image.width,
                    height: image.height,
                }
            }
        }
    };
}

/// The `ProductCard` fragment as a list-shaped [`Product`] (no options or
/// variants). Requires the money and image conversions for the same module.
///
/// [`Product`]: crate::shopify::types::Product
macro_rules! product_card_conversion {
    ($module:ident) => {
        impl From<$module::ProductCard> for crate::shopify::types::Product {
            fn from(card: $module::ProductCard) -> Self {
                Self {
                    id: card.id,
                    handle: card.handle,
                    title: card.title,
                    description_html: card.description_html,
                    tags: card.tags,
                    vendor: Some(card.vendor).filter(|vendor| !vendor.is_empty()),
                    featured_image: card.featured_image.map(Into::into),
                    price_range: crate::shopify::types::PriceRange {
                        min_variant_price: card.price_range.min_variant_price.into(),
                        max_variant_price: card.price_range.max_variant_price.into(),
                    },
                    options: Vec::new(),
                    variants: Vec::new(),
                }
            }
        }
    };
}

pub mod collections;
pub mod products;

pub use collections::{convert_collection_detail, convert_collection_list};
pub use products::{convert_product_list, convert_verified_product};

/// ISO 4217 code of a generated `CurrencyCode`, including codes the trimmed
/// schema does not list.
fn currency_code<T: serde::Serialize>(code: &T) -> String {
    match serde_json::to_value(code) {
        Ok(serde_json::Value::String(code)) => code,
        _ => String::new(),
    }
}
