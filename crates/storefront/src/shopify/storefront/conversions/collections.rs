//! Collection type conversion functions.

use crate::shopify::types::{Collection, Product};

use super::super::queries::{get_all_collections, get_collection_with_wholesale_products};

image_conversion!(get_all_collections);

money_and_image_conversions!(get_collection_with_wholesale_products);
product_card_conversion!(get_collection_with_wholesale_products);

/// Blank descriptions are treated as absent.
fn description(html: String) -> Option<String> {
    Some(html).filter(|html| !html.trim().is_empty())
}

fn convert_collection_list_item(fields: get_all_collections::CollectionFields) -> Collection {
    Collection {
        id: fields.id,
        handle: fields.handle,
        title: fields.title,
        description_html: description(fields.description_html),
        image: fields.image.map(Into::into),
        products: Vec::new(),
    }
}

/// Convert the collection listing, keeping upstream order. Listed
/// collections carry no products.
pub fn convert_collection_list(data: get_all_collections::ResponseData) -> Vec<Collection> {
    data.collections
        .edges
        .into_iter()
        .map(|edge| convert_collection_list_item(edge.node))
        .collect()
}

/// Convert a collection with its filtered products, or `None` when the
/// handle matched nothing.
pub fn convert_collection_detail(
    data: get_collection_with_wholesale_products::ResponseData,
) -> Option<Collection> {
    let collection = data.collection?;
    let fields = collection.collection_fields;

    Some(Collection {
        id: fields.id,
        handle: fields.handle,
        title: fields.title,
        description_html: description(fields.description_html),
        image: fields.image.map(Into::into),
        products: collection
            .products
            .edges
            .into_iter()
            .map(|edge| Product::from(edge.node))
            .collect(),
    })
}
