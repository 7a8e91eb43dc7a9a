//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{FacetValueSet, FilterCriteria, ProductGrid};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::{ImageView, page_title, parse_handle};
use crate::shopify::{Product, ProductVariant};
use crate::state::AppState;

/// Product card data for the grid.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCardView {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub vendor: Option<String>,
    pub tags: Vec<String>,
    /// Lowest variant price, formatted.
    pub price: String,
    pub featured_image: Option<ImageView>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            handle: product.handle.clone(),
            title: product.title.clone(),
            vendor: product.vendor.clone(),
            tags: product.tags.clone(),
            price: product.price_range.min_variant_price.formatted(),
            featured_image: product
                .featured_image
                .as_ref()
                .map(|image| ImageView::new(image, &product.title)),
        }
    }
}

/// Variant display data.
#[derive(Debug, Clone, Serialize)]
pub struct VariantView {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub available: bool,
    pub price: String,
    pub options: Vec<(String, String)>,
}

impl From<&ProductVariant> for VariantView {
    fn from(variant: &ProductVariant) -> Self {
        Self {
            id: variant.id.clone(),
            title: variant.title.clone(),
            sku: variant.sku.clone(),
            available: variant.available_for_sale,
            price: variant.price.formatted(),
            options: variant
                .selected_options
                .iter()
                .map(|o| (o.name.clone(), o.value.clone()))
                .collect(),
        }
    }
}

/// Option group display data.
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub name: String,
    pub values: Vec<String>,
}

/// Product detail page data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailView {
    pub page_title: String,
    pub id: String,
    pub handle: String,
    pub title: String,
    pub vendor: Option<String>,
    pub tags: Vec<String>,
    /// Formatted price, or a `min - max` range when variants differ.
    pub price: String,
    pub description_html: Option<String>,
    pub featured_image: Option<ImageView>,
    pub options: Vec<OptionView>,
    pub variants: Vec<VariantView>,
}

/// Product grid page data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListView {
    pub products: Vec<ProductCardView>,
    pub facets: FacetValueSet,
    pub criteria: FilterCriteria,
    /// Products fetched before filtering.
    pub total: usize,
    /// Products passing the filter.
    pub count: usize,
    pub filtered: bool,
}

impl From<&ProductGrid> for ProductListView {
    fn from(grid: &ProductGrid) -> Self {
        Self {
            products: grid.visible().map(ProductCardView::from).collect(),
            facets: grid.facets().clone(),
            criteria: grid.criteria().clone(),
            total: grid.items().len(),
            count: grid.visible_count(),
            filtered: grid.is_filtered(),
        }
    }
}

/// Grid query parameters; `tag` and `vendor` accept the `all` sentinel.
#[derive(Debug, Default, Deserialize)]
pub struct GridQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub vendor: String,
}

/// Display the wholesale product grid.
///
/// # Errors
///
/// Returns `AppError::Shopify` if the upstream fetch reports any error.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<ProductListView>> {
    let catalog = &state.config().catalog;
    let products = state
        .storefront()
        .get_b2b_products(catalog.page_size, &catalog.tag_filter())
        .await
        .into_result()?;

    let criteria = FilterCriteria::from_form(&query.q, &query.tag, &query.vendor);
    let grid = ProductGrid::with_criteria(products, criteria);

    Ok(Json(ProductListView::from(&grid)))
}

/// Display product detail page.
///
/// Products outside the wholesale catalog are reported as not found.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed handle and
/// `AppError::NotFound` when the fetch fails, the product is missing, or it
/// fails verification.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProductDetailView>> {
    let handle = parse_handle(&handle)?;
    let tag_filter = state.config().catalog.tag_filter();

    let result = state
        .storefront()
        .get_product_with_verification(&handle, &tag_filter)
        .await;

    let lookup = match result.into_result() {
        Ok(lookup) => lookup,
        Err(e) => {
            tracing::warn!(error = %e, "Product lookup failed");
            return Err(AppError::NotFound(format!("product {handle}")));
        }
    };

    let product = lookup.into_verified().ok_or_else(|| {
        tracing::info!("Product missing or not in the wholesale catalog");
        AppError::NotFound(format!("product {handle}"))
    })?;

    add_breadcrumb(
        "navigation",
        "Viewed product page",
        Some(&[("handle", handle.as_str())]),
    );

    Ok(Json(ProductDetailView {
        page_title: page_title(&handle),
        id: product.id.clone(),
        handle: product.handle.clone(),
        title: product.title.clone(),
        vendor: product.vendor.clone(),
        tags: product.tags.clone(),
        price: product.price_range.display(),
        description_html: Some(product.description_html.clone()).filter(|html| !html.is_empty()),
        featured_image: product
            .featured_image
            .as_ref()
            .map(|image| ImageView::new(image, &product.title)),
        options: product
            .options
            .iter()
            .map(|o| OptionView {
                name: o.name.clone(),
                values: o.values.clone(),
            })
            .collect(),
        variants: product.variants.iter().map(VariantView::from).collect(),
    }))
}
