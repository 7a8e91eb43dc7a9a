//! In-memory narrowing of the wholesale product list.
//!
//! # Architecture
//!
//! - The product slice is fetched once per page load; everything here works
//!   on that slice without further upstream calls.
//! - [`filter_products`] is pure: search, then tag, then vendor.
//! - [`ProductGrid`] owns the UI state and applies [`GridAction`]s through
//!   [`FilterCriteria::reduce`], recomputing the visible subset on change.
//! - [`FacetValueSet`] is derived once from the initial slice and never
//!   recomputed as filters narrow the list.

mod facets;
mod filter;
mod grid;

pub use facets::FacetValueSet;
pub use filter::{ALL_SELECTION, FacetSelection, FilterCriteria, GridAction, filter_products};
pub use grid::ProductGrid;
