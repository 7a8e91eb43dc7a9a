//! Product grid state: the fetched slice, its facets and the current filter.

use std::sync::Arc;

use tracing::debug;

use super::facets::FacetValueSet;
use super::filter::{FilterCriteria, GridAction, Stages};
use crate::shopify::Product;

/// The product grid behind the wholesale catalog page.
///
/// Facets are computed once in [`ProductGrid::new`]. The visible subset is
/// memoized and recomputed only when a transition changes the criteria.
#[derive(Debug, Clone)]
pub struct ProductGrid {
    items: Arc<[Product]>,
    facets: FacetValueSet,
    criteria: FilterCriteria,
    visible: Vec<usize>,
}

impl ProductGrid {
    /// A grid over `items` with no filters applied.
    #[must_use]
    pub fn new(items: impl Into<Arc<[Product]>>) -> Self {
        let items = items.into();
        let facets = FacetValueSet::from_items(&items);
        let visible = (0..items.len()).collect();

        Self {
            items,
            facets,
            criteria: FilterCriteria::default(),
            visible,
        }
    }

    /// A grid over `items` with `criteria` already applied.
    #[must_use]
    pub fn with_criteria(items: impl Into<Arc<[Product]>>, criteria: FilterCriteria) -> Self {
        let mut grid = Self::new(items);
        grid.criteria = criteria;
        grid.recompute();
        grid
    }

    /// Apply a UI transition.
    pub fn dispatch(&mut self, action: GridAction) {
        let next = self.criteria.clone().reduce(action);
        if next != self.criteria {
            self.criteria = next;
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let stages = Stages::new(&self.criteria);
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, product)| stages.keep(product))
            .map(|(i, _)| i)
            .collect();
        debug!(
            visible = self.visible.len(),
            total = self.items.len(),
            "Product grid recomputed"
        );
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn facets(&self) -> &FacetValueSet {
        &self.facets
    }

    /// Every fetched product, in upstream order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Products passing the current filter, in upstream order.
    pub fn visible(&self) -> impl Iterator<Item = &Product> + '_ {
        self.visible.iter().filter_map(|&i| self.items.get(i))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Whether any criterion is active (drives the "Clear filters" button).
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.criteria.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::{Money, PriceRange};

    fn product(id: u32, title: &str, tags: &[&str], vendor: &str) -> Product {
        let price = Money {
            amount: "1.00".to_string(),
            currency_code: "USD".to_string(),
        };
        Product {
            id: id.to_string(),
            handle: format!("product-{id}"),
            title: title.to_string(),
            description_html: String::new(),
            tags: tags.iter().map(ToString::to_string).collect(),
            vendor: Some(vendor.to_string()),
            featured_image: None,
            price_range: PriceRange {
                min_variant_price: price.clone(),
                max_variant_price: price,
            },
            options: Vec::new(),
            variants: Vec::new(),
        }
    }

    fn grid() -> ProductGrid {
        ProductGrid::new(vec![
            product(1, "Blue Widget", &["B2B", "Sale"], "Acme"),
            product(2, "Red Widget", &["B2B"], "Acme"),
            product(3, "Green Gadget", &["B2B", "New"], "Globex"),
        ])
    }

    fn visible_ids(grid: &ProductGrid) -> Vec<&str> {
        grid.visible().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_starts_unfiltered() {
        let grid = grid();
        assert_eq!(visible_ids(&grid), vec!["1", "2", "3"]);
        assert!(!grid.is_filtered());
        assert_eq!(grid.facets().vendors, vec!["Acme", "Globex"]);
    }

    #[test]
    fn test_transitions_narrow_and_clear() {
        let mut grid = grid();

        grid.dispatch(GridAction::SetSearch("widget".to_string()));
        assert_eq!(visible_ids(&grid), vec!["1", "2"]);

        grid.dispatch(GridAction::SelectTag("Sale".to_string()));
        assert_eq!(visible_ids(&grid), vec!["1"]);

        grid.dispatch(GridAction::SelectTag("all".to_string()));
        grid.dispatch(GridAction::SelectVendor("Globex".to_string()));
        assert!(grid.visible().next().is_none());
        assert!(grid.is_filtered());

        grid.dispatch(GridAction::ClearFilters);
        assert_eq!(visible_ids(&grid), vec!["1", "2", "3"]);
        assert_eq!(grid.criteria(), &FilterCriteria::default());
    }

    #[test]
    fn test_facets_do_not_narrow_with_filter() {
        let mut grid = grid();
        grid.dispatch(GridAction::SelectVendor("Globex".to_string()));

        assert_eq!(grid.visible_count(), 1);
        assert_eq!(grid.facets().tags, vec!["B2B", "New", "Sale"]);
        assert_eq!(grid.facets().vendors, vec!["Acme", "Globex"]);
        assert_eq!(grid.items().len(), 3);
    }

    #[test]
    fn test_with_criteria() {
        let grid = ProductGrid::with_criteria(
            grid().items().to_vec(),
            FilterCriteria::from_form("acme", "", ""),
        );
        assert_eq!(visible_ids(&grid), vec!["1", "2"]);
    }
}
