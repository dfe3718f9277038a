//! Filter criteria builder and sort keys.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::search::{CategoryFilter, PriceRange};
use serde::{Deserialize, Serialize};

/// Ordering applied to the filtered product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most reviewed first.
    #[default]
    Popular,
    /// Highest rated first.
    Rating,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl SortKey {
    /// Every key, in the order the sort menu lists them.
    pub const ALL: [SortKey; 4] = [
        SortKey::Popular,
        SortKey::Rating,
        SortKey::PriceLow,
        SortKey::PriceHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Rating => "rating",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Popular => "Popular",
            SortKey::Rating => "Top Rated",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| CommerceError::UnknownSortKey(s.to_string()))
    }
}

/// User-selected constraints narrowing the catalog view.
///
/// A product is shown only if it passes every constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterCriteria {
    /// Active category.
    pub category: CategoryFilter,
    /// Free-text query matched against name and brand.
    pub query: String,
    /// Inclusive price bounds.
    pub price: PriceRange,
    /// Selected brands; empty means no brand filter.
    pub brands: BTreeSet<String>,
    /// Result ordering.
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Criteria that match the whole catalog in popularity order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the text query.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.query = q.into();
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price = range;
        self
    }

    /// Add a brand to the selection.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Flip a brand's selection; returns whether it is now selected.
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        if self.brands.remove(brand) {
            false
        } else {
            self.brands.insert(brand.to_string());
            true
        }
    }

    /// Drop every constraint but keep the sort order.
    pub fn clear_filters(&mut self) {
        let sort = self.sort;
        *self = Self::default().with_sort(sort);
    }

    /// Whether any constraint narrows the catalog.
    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All
            && self.query.is_empty()
            && self.price.is_full()
            && self.brands.is_empty()
    }

    /// Whether a product passes every constraint.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_lowered(product, &self.query.to_lowercase())
    }

    /// As [`matches`](Self::matches), with the query already lowercased.
    pub(crate) fn matches_lowered(&self, product: &Product, needle: &str) -> bool {
        self.category.matches(product)
            && matches_text(product, needle)
            && self.price.contains(&product.price)
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
    }
}

fn matches_text(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.brand.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn gloves() -> Product {
        Product::new("bx", "Pro Style Training Gloves", "Everlast", "boxing", Money::usd(3999))
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("popular".parse::<SortKey>(), Ok(SortKey::Popular));
        assert_eq!("Price-High".parse::<SortKey>(), Ok(SortKey::PriceHigh));
        assert_eq!(
            "newest".parse::<SortKey>(),
            Err(CommerceError::UnknownSortKey("newest".to_string()))
        );
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn test_sort_key_serde_names() {
        assert_eq!(serde_json::to_string(&SortKey::PriceLow).unwrap(), "\"price-low\"");
        let key: SortKey = serde_json::from_str("\"rating\"").unwrap();
        assert_eq!(key, SortKey::Rating);
    }

    #[test]
    fn test_text_matches_name_or_brand() {
        let product = gloves();
        assert!(FilterCriteria::new().with_query("GLOVES").matches(&product));
        assert!(FilterCriteria::new().with_query("ever").matches(&product));
        assert!(!FilterCriteria::new().with_query("racket").matches(&product));
        assert!(FilterCriteria::new().with_query("").matches(&product));
    }

    #[test]
    fn test_brand_membership() {
        let product = gloves();
        assert!(FilterCriteria::new().with_brand("Everlast").matches(&product));
        assert!(!FilterCriteria::new().with_brand("Nike").matches(&product));
    }

    #[test]
    fn test_all_predicates_must_pass() {
        let product = gloves();
        let criteria = FilterCriteria::new()
            .with_category(CategoryFilter::Only("boxing".into()))
            .with_query("gloves")
            .with_brand("Everlast")
            .with_price_range(PriceRange::new(Money::usd(0), Money::usd(3000)).unwrap());
        assert!(!criteria.matches(&product));
    }

    #[test]
    fn test_toggle_brand() {
        let mut criteria = FilterCriteria::new();
        assert!(criteria.toggle_brand("Nike"));
        assert!(criteria.brands.contains("Nike"));
        assert!(!criteria.toggle_brand("Nike"));
        assert!(criteria.brands.is_empty());
    }

    #[test]
    fn test_clear_filters_keeps_sort() {
        let mut criteria = FilterCriteria::new()
            .with_query("ball")
            .with_brand("Wilson")
            .with_sort(SortKey::Rating);
        assert!(!criteria.is_unfiltered());

        criteria.clear_filters();
        assert!(criteria.is_unfiltered());
        assert_eq!(criteria.sort, SortKey::Rating);
    }
}
