//! The filter/sort pipeline.

use crate::catalog::Product;
use crate::search::{FilterCriteria, SortKey};

/// Filter `products` by `criteria` and order the survivors by its sort key.
///
/// The input slice is never modified, and equal sort keys keep their catalog
/// order, so identical inputs always produce identical output.
pub fn apply<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let needle = criteria.query.to_lowercase();
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| criteria.matches_lowered(p, &needle))
        .collect();

    sort_products(&mut matched, criteria.sort);

    tracing::debug!(
        category = criteria.category.as_str(),
        query = %criteria.query,
        brands = criteria.brands.len(),
        sort = %criteria.sort,
        matched = matched.len(),
        total = products.len(),
        "catalog filtered"
    );

    matched
}

/// Stable in-place sort of a product view.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::Popular => products.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceLow => products.sort_by_key(|p| p.price.amount_cents),
        SortKey::PriceHigh => {
            products.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
        }
    }
}
