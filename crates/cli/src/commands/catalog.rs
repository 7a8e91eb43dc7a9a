//! Product commands.

use b2b_headless_core::Handle;
use b2b_headless_storefront::catalog::{FacetValueSet, FilterCriteria, ProductGrid};
use b2b_headless_storefront::routes::products::ProductListView;

use super::{CommandError, Context, print_json, require_data};

/// Fetch the wholesale slice, filter it like the grid, and print it.
///
/// # Errors
///
/// Returns an error if no products could be fetched.
pub async fn products(
    ctx: &Context,
    search: &str,
    tag: &str,
    vendor: &str,
) -> Result<(), CommandError> {
    let products = require_data(
        ctx.client
            .get_b2b_products(ctx.catalog.page_size, &ctx.catalog.tag_filter())
            .await,
    )?;

    let grid = ProductGrid::with_criteria(products, FilterCriteria::from_form(search, tag, vendor));
    tracing::info!(
        total = grid.items().len(),
        visible = grid.visible_count(),
        "Filtered wholesale products"
    );

    print_json(&ProductListView::from(&grid))
}

/// Print a product if it is part of the wholesale catalog.
///
/// # Errors
///
/// Returns an error if the handle is malformed, the fetch fails, or the
/// product is missing or unverified.
pub async fn product(ctx: &Context, handle: &str) -> Result<(), CommandError> {
    let handle = Handle::parse(handle)?;
    let lookup = require_data(
        ctx.client
            .get_product_with_verification(&handle, &ctx.catalog.tag_filter())
            .await,
    )?;

    let product = lookup
        .into_verified()
        .ok_or_else(|| CommandError::NotFound(format!("wholesale product {handle}")))?;

    print_json(&product)
}

/// Print the distinct tags and vendors of the wholesale slice.
///
/// # Errors
///
/// Returns an error if no products could be fetched.
pub async fn facets(ctx: &Context) -> Result<(), CommandError> {
    let products = require_data(
        ctx.client
            .get_b2b_products(ctx.catalog.page_size, &ctx.catalog.tag_filter())
            .await,
    )?;

    print_json(&FacetValueSet::from_items(&products))
}
