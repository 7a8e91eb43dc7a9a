//! Product type conversion functions.

use crate::shopify::types::{
    Product, ProductOption, ProductVariant, SelectedOption, VerifiedProduct,
};

use super::super::queries::{get_product_by_handle, get_wholesale_products};

money_and_image_conversions!(get_wholesale_products);
product_card_conversion!(get_wholesale_products);

money_and_image_conversions!(get_product_by_handle);
product_card_conversion!(get_product_by_handle);

fn convert_variant_handle(variant: get_product_by_handle::VariantFields) -> ProductVariant {
    ProductVariant {
        id: variant.id,
        title: variant.title,
        sku: variant.sku.filter(|sku| !sku.is_empty()),
        available_for_sale: variant.available_for_sale,
        price: variant.price.into(),
        image: variant.image.map(Into::into),
        selected_options: variant
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
    }
}

fn convert_product_handle(product: get_product_by_handle::GetProductByHandleProduct) -> Product {
    Product {
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                id: o.id,
                name: o.name,
                values: o.values,
            })
            .collect(),
        variants: product
            .variants
            .edges
            .into_iter()
            .map(|edge| convert_variant_handle(edge.node))
            .collect(),
        ..product.product_card.into()
    }
}

/// Convert a product list response, keeping upstream order.
pub fn convert_product_list(data: get_wholesale_products::ResponseData) -> Vec<Product> {
    data.products
        .edges
        .into_iter()
        .map(|edge| edge.node.into())
        .collect()
}

/// Pair the looked-up product with the verification sub-query's first match.
pub fn convert_verified_product(data: get_product_by_handle::ResponseData) -> VerifiedProduct {
    VerifiedProduct {
        product: data.product.map(convert_product_handle),
        verified_id: data
            .verification
            .edges
            .into_iter()
            .next()
            .map(|edge| edge.node.id),
    }
}
