//! Collection route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::products::ProductCardView;
use crate::routes::{ImageView, SITE_NAME, parse_handle};
use crate::shopify::Collection;
use crate::state::AppState;

/// Products shown on a collection page.
pub const COLLECTION_PRODUCT_COUNT: i64 = 24;

/// Collection summary for the listing page.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummaryView {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description_html: Option<String>,
    pub image: Option<ImageView>,
}

impl From<&Collection> for CollectionSummaryView {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.id.clone(),
            handle: collection.handle.clone(),
            title: collection.title.clone(),
            description_html: collection.description_html.clone(),
            image: collection
                .image
                .as_ref()
                .map(|image| ImageView::new(image, &collection.title)),
        }
    }
}

/// Collection listing page data.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionListView {
    pub collections: Vec<CollectionSummaryView>,
}

/// Collection detail page data.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionDetailView {
    pub page_title: String,
    #[serde(flatten)]
    pub collection: CollectionSummaryView,
    pub products: Vec<ProductCardView>,
}

/// Display collection listing page.
///
/// # Errors
///
/// Returns `AppError::Shopify` if the upstream fetch reports any error.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<CollectionListView>> {
    let collections = state.storefront().get_collections().await.into_result()?;

    Ok(Json(CollectionListView {
        collections: collections.iter().map(CollectionSummaryView::from).collect(),
    }))
}

/// Display collection detail page with its wholesale products.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed handle and
/// `AppError::NotFound` when the fetch fails or the collection is missing.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<CollectionDetailView>> {
    let handle = parse_handle(&handle)?;
    let tag = &state.config().catalog.b2b_tag;

    let result = state
        .storefront()
        .get_collection_by_handle(&handle, COLLECTION_PRODUCT_COUNT, tag)
        .await;

    let collection = match result.into_result() {
        Ok(Some(collection)) => collection,
        Ok(None) => return Err(AppError::NotFound(format!("collection {handle}"))),
        Err(e) => {
            tracing::warn!(error = %e, "Collection lookup failed");
            return Err(AppError::NotFound(format!("collection {handle}")));
        }
    };

    Ok(Json(CollectionDetailView {
        page_title: format!("Collection: {} | {SITE_NAME}", handle.to_title()),
        products: collection.products.iter().map(ProductCardView::from).collect(),
        collection: CollectionSummaryView::from(&collection),
    }))
}
