//! Distinct facet values for the filter dropdowns.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::shopify::Product;

/// Distinct tags and vendors of a product slice, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetValueSet {
    pub tags: Vec<String>,
    pub vendors: Vec<String>,
}

impl FacetValueSet {
    /// Collect facet values from `items`, skipping blank tags and vendors.
    #[must_use]
    pub fn from_items(items: &[Product]) -> Self {
        let mut tags = BTreeSet::new();
        let mut vendors = BTreeSet::new();

        for product in items {
            tags.extend(
                product
                    .tags
                    .iter()
                    .filter(|tag| !tag.trim().is_empty())
                    .cloned(),
            );
            if let Some(vendor) = product.vendor.as_ref().filter(|v| !v.trim().is_empty()) {
                vendors.insert(vendor.clone());
            }
        }

        Self {
            tags: tags.into_iter().collect(),
            vendors: vendors.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.vendors.is_empty()
    }
}
