//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
///
/// Products are seeded once and never mutated; the cart copies the fields it
/// displays instead of holding references into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Brand name, matched exactly by the brand filter.
    pub brand: String,
    /// Category id, matched case-insensitively by the category filter.
    pub category: String,
    /// Unit price.
    pub price: Money,
    /// Average rating in `0.0..=5.0`.
    pub rating: f64,
    /// Number of reviews; drives the "popular" ordering.
    pub reviews: u32,
    /// Image reference.
    pub image: String,
    /// Long-form description.
    pub description: String,
    /// Whether the product can be previewed in the AR viewer.
    pub has_ar: bool,
}

impl Product {
    /// Create an unrated product with the required fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            price,
            rating: 0.0,
            reviews: 0,
            image: String::new(),
            description: String::new(),
            has_ar: false,
        }
    }

    /// Set rating (clamped into `0.0..=5.0`) and review count.
    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, MAX_RATING)
        };
        self.reviews = reviews;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the product as AR-capable.
    pub fn with_ar(mut self) -> Self {
        self.has_ar = true;
        self
    }

    /// Whether the product belongs to the given category id (case-insensitive).
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }

    /// Number of whole stars to render for the rating.
    pub fn full_stars(&self) -> u8 {
        self.rating.floor() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("bb-001", "Pro Basketball", "Spalding", "basketball", Money::usd(4999))
            .with_rating(4.8, 234)
            .with_ar();

        assert_eq!(product.id.as_str(), "bb-001");
        assert_eq!(product.reviews, 234);
        assert!(product.has_ar);
        assert_eq!(product.full_stars(), 4);
    }

    #[test]
    fn test_rating_is_clamped() {
        let high = Product::new("x", "X", "B", "c", Money::usd(0)).with_rating(7.5, 1);
        let low = Product::new("y", "Y", "B", "c", Money::usd(0)).with_rating(-1.0, 1);
        assert_eq!(high.rating, 5.0);
        assert_eq!(low.rating, 0.0);
    }

    #[test]
    fn test_in_category_ignores_case() {
        let product = Product::new("t", "Racket", "Wilson", "Tennis", Money::usd(100));
        assert!(product.in_category("tennis"));
        assert!(product.in_category("TENNIS"));
        assert!(!product.in_category("boxing"));
    }
}
