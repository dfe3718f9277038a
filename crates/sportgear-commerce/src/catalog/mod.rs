//! Product catalog module.
//!
//! Contains the product and category types and the read-only `Catalog` the
//! rest of the storefront queries.

mod category;
mod product;
mod seed;

pub use category::{Category, ALL_CATEGORY_ID};
pub use product::{Product, MAX_RATING};
pub use seed::BRANDS;

use std::collections::HashSet;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::search::{self, CategoryFilter, FilterCriteria};

/// The static, read-only set of purchasable products and their categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, checking that product ids are unique, that every
    /// product references a known category and that all prices share one
    /// currency.
    ///
    /// The synthetic "All" category is inserted at the front if missing.
    pub fn new(products: Vec<Product>, mut categories: Vec<Category>) -> Result<Self, CommerceError> {
        if !categories.iter().any(Category::is_all) {
            categories.insert(0, Category::all());
        }

        let currency = products.first().map(|p| p.price.currency);
        let mut seen = HashSet::new();
        for product in &products {
            if let Some(expected) = currency {
                if product.price.currency != expected {
                    return Err(CommerceError::CurrencyMismatch {
                        expected,
                        found: product.price.currency,
                    });
                }
            }
            if !seen.insert(product.id.clone()) {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
            let known = categories
                .iter()
                .any(|c| !c.is_all() && c.matches_id(&product.category));
            if !known {
                return Err(CommerceError::UnknownCategory(product.category.clone()));
            }
        }

        Ok(Self {
            products,
            categories,
        })
    }

    /// The built-in SportGear catalog.
    pub fn seeded() -> Self {
        Self {
            products: seed::products(),
            categories: seed::categories(),
        }
    }

    /// Currency every price is quoted in, `None` for an empty catalog.
    pub fn currency(&self) -> Option<Currency> {
        self.products.first().map(|p| p.price.currency)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories, starting with "All".
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by id, reporting a missing product as an error.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products that can be previewed in the AR viewer.
    pub fn ar_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.has_ar).collect()
    }

    /// Distinct brands in first-seen catalog order.
    pub fn brands(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.brand.as_str())
            .filter(|b| seen.insert(*b))
            .collect()
    }

    /// Look up a category by id, ignoring case.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches_id(id))
    }

    /// Resolve a user-supplied category id against this catalog's closed set.
    pub fn resolve_category(&self, id: &str) -> Result<CategoryFilter, CommerceError> {
        match self.category(id.trim()) {
            Some(c) if c.is_all() => Ok(CategoryFilter::All),
            Some(c) => Ok(CategoryFilter::Only(c.id.clone())),
            None => Err(CommerceError::UnknownCategory(id.to_string())),
        }
    }

    /// Run the filter/sort pipeline over this catalog.
    pub fn query(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        search::apply(&self.products, criteria)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}
