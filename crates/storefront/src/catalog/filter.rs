//! Filter criteria and the pure filtering function.

use serde::{Deserialize, Serialize};

use crate::shopify::Product;

/// Dropdown value meaning "no filter".
pub const ALL_SELECTION: &str = "all";

/// A facet dropdown value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetSelection {
    /// No filter on this facet.
    All,
    /// Keep only items with exactly this value.
    Value(String),
}

impl FacetSelection {
    /// Parse a dropdown value; `all` and the empty string mean [`Self::All`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_SELECTION {
            Self::All
        } else {
            Self::Value(value.to_string())
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// A UI transition on the product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    /// The search box changed.
    SetSearch(String),
    /// A tag was picked from the dropdown (raw value, may be `all`).
    SelectTag(String),
    /// A vendor was picked from the dropdown (raw value, may be `all`).
    SelectVendor(String),
    /// Reset search, tag and vendor.
    ClearFilters,
}

/// Current search term and facet selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search, matched case-insensitively.
    #[serde(default)]
    pub search: String,
    /// Exact tag, if selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Exact vendor, if selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw form values, applying the `all` sentinel.
    #[must_use]
    pub fn from_form(search: &str, tag: &str, vendor: &str) -> Self {
        Self {
            search: search.to_string(),
            tag: FacetSelection::parse(tag).into_option(),
            vendor: FacetSelection::parse(vendor).into_option(),
        }
    }

    /// Whether no stage would remove anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.tag.is_none() && self.vendor.is_none()
    }

    /// Apply a transition, returning the next criteria.
    #[must_use]
    pub fn reduce(self, action: GridAction) -> Self {
        match action {
            GridAction::SetSearch(search) => Self { search, ..self },
            GridAction::SelectTag(tag) => Self {
                tag: FacetSelection::parse(&tag).into_option(),
                ..self
            },
            GridAction::SelectVendor(vendor) => Self {
                vendor: FacetSelection::parse(&vendor).into_option(),
                ..self
            },
            GridAction::ClearFilters => Self::default(),
        }
    }
}

/// The three filter stages with the search term pre-lowered.
pub(super) struct Stages<'a> {
    // The term is only trimmed to decide whether search applies.
    term: Option<String>,
    tag: Option<&'a str>,
    vendor: Option<&'a str>,
}

impl<'a> Stages<'a> {
    pub(super) fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            term: (!criteria.search.trim().is_empty()).then(|| criteria.search.to_lowercase()),
            tag: criteria.tag.as_deref(),
            vendor: criteria.vendor.as_deref(),
        }
    }

    pub(super) fn keep(&self, product: &Product) -> bool {
        self.search(product) && self.tag(product) && self.vendor(product)
    }

    fn search(&self, product: &Product) -> bool {
        let Some(term) = self.term.as_deref() else {
            return true;
        };
        product.title.to_lowercase().contains(term)
            || product
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(term))
            || product
                .vendor
                .as_ref()
                .is_some_and(|vendor| vendor.to_lowercase().contains(term))
    }

    fn tag(&self, product: &Product) -> bool {
        self.tag
            .is_none_or(|tag| product.tags.iter().any(|t| t == tag))
    }

    fn vendor(&self, product: &Product) -> bool {
        self.vendor
            .is_none_or(|vendor| product.vendor.as_deref() == Some(vendor))
    }
}

/// Narrow `items` to those matching `criteria`, preserving order.
#[must_use]
pub fn filter_products<'a>(items: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let stages = Stages::new(criteria);
    items.iter().filter(|product| stages.keep(product)).collect()
}
