//! GraphQL query definitions for Shopify Storefront API.
//!
//! Operations live in `graphql/storefront/queries/*.graphql` and are checked
//! against the trimmed schema in `graphql/storefront/schema.graphql` at
//! compile time.

use graphql_client::GraphQLQuery;

// Custom scalars, named exactly as in the schema. The derive resolves them
// from this module.
#[allow(clippy::upper_case_acronyms)]
type Decimal = String;
#[allow(clippy::upper_case_acronyms)]
type URL = String;
#[allow(clippy::upper_case_acronyms)]
type HTML = String;

/// Build the search query used to confirm a product is in the B2B catalog.
///
/// `verification_query("blue-widget", "tag:B2B")` yields
/// `handle:blue-widget AND (tag:B2B)`.
#[must_use]
pub fn verification_query(handle: &str, tag_filter: &str) -> String {
    format!("handle:{handle} AND ({tag_filter})")
}

// Product queries
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetWholesaleProducts;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetProductByHandle;

// Collection queries
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/collections.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetAllCollections;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/collections.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetCollectionWithWholesaleProducts;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verification_query() {
        assert_eq!(
            verification_query("blue-widget", "tag:B2B"),
            "handle:blue-widget AND (tag:B2B)"
        );
        assert_eq!(
            verification_query("x", "tag:B2B OR tag:Wholesale"),
            "handle:x AND (tag:B2B OR tag:Wholesale)"
        );
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(get_wholesale_products::OPERATION_NAME, "GetWholesaleProducts");
        assert_eq!(get_product_by_handle::OPERATION_NAME, "GetProductByHandle");
        assert_eq!(get_all_collections::OPERATION_NAME, "GetAllCollections");
        assert_eq!(
            get_collection_with_wholesale_products::OPERATION_NAME,
            "GetCollectionWithWholesaleProducts"
        );
    }

    #[test]
    fn test_documents_define_their_operations() {
        assert!(get_wholesale_products::QUERY.contains("query GetWholesaleProducts("));
        assert!(get_product_by_handle::QUERY.contains("query GetProductByHandle("));
        assert!(get_product_by_handle::QUERY.contains("verification: products("));
        assert!(get_all_collections::QUERY.contains("query GetAllCollections {"));
        assert!(
            get_collection_with_wholesale_products::QUERY
                .contains("query GetCollectionWithWholesaleProducts(")
        );
        assert_eq!(
            get_collection_with_wholesale_products::QUERY
                .matches("fragment ProductCard on Product")
                .count(),
            1
        );
    }

    #[test]
    fn test_variables_use_schema_names() {
        let vars = get_product_by_handle::Variables {
            handle: "blue-widget".to_string(),
            product_query_for_verification: verification_query("blue-widget", "tag:B2B"),
        };
        assert_eq!(
            serde_json::to_value(vars).unwrap(),
            json!({
                "handle": "blue-widget",
                "productQueryForVerification": "handle:blue-widget AND (tag:B2B)"
            })
        );

        let vars = get_collection_with_wholesale_products::Variables {
            handle: "tools".to_string(),
            first_products: 24,
            product_filters: Some(vec![
                get_collection_with_wholesale_products::ProductFilter {
                    tag: Some("B2B".to_string()),
                },
            ]),
        };
        assert_eq!(
            serde_json::to_value(vars).unwrap(),
            json!({
                "handle": "tools",
                "firstProducts": 24,
                "productFilters": [{"tag": "B2B"}]
            })
        );
    }

    #[test]
    fn test_unit_variables_serialize_to_null() {
        let value = serde_json::to_value(get_all_collections::Variables).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_product_list_response_shape() {
        let data: get_wholesale_products::ResponseData = serde_json::from_value(json!({
            "products": {"edges": [{"node": {
                "id": "gid://shopify/Product/1",
                "handle": "blue-widget",
                "title": "Blue Widget",
                "descriptionHtml": "",
                "tags": ["B2B"],
                "vendor": "",
                "featuredImage": null,
                "priceRange": {
                    "minVariantPrice": {"amount": "10.0", "currencyCode": "USD"},
                    "maxVariantPrice": {"amount": "10.0", "currencyCode": "USD"}
                }
            }}]}
        }))
        .unwrap();

        let card = &data.products.edges.first().unwrap().node;
        assert_eq!(card.handle, "blue-widget");
        assert!(card.featured_image.is_none());
        assert_eq!(card.price_range.min_variant_price.amount, "10.0");
    }
}
