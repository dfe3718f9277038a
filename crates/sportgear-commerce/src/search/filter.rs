//! Filter predicates: category and price range.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::CategoryId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Category constraint, resolved against a catalog's category list.
///
/// Build it with [`Catalog::resolve_category`](crate::catalog::Catalog::resolve_category)
/// to reject ids the catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every product matches.
    #[default]
    All,
    /// Only products whose category equals this id, ignoring case.
    Only(CategoryId),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => product.in_category(id.as_str()),
        }
    }

    /// The category id this filter selects, `"all"` for everything.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => crate::catalog::ALL_CATEGORY_ID,
            CategoryFilter::Only(id) => id.as_str(),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    min: Money,
    max: Money,
}

/// Unchecked wire form of [`PriceRange`].
#[derive(Deserialize)]
struct RawPriceRange {
    min: Money,
    max: Money,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = CommerceError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        PriceRange::new(raw.min, raw.max)
    }
}

impl PriceRange {
    /// Create a range, rejecting negative or inverted bounds.
    pub fn new(min: Money, max: Money) -> Result<Self, CommerceError> {
        if min.is_negative() || max.is_negative() || min.amount_cents > max.amount_cents {
            return Err(CommerceError::InvalidPriceRange {
                min_cents: min.amount_cents,
                max_cents: max.amount_cents,
            });
        }
        Ok(Self { min, max })
    }

    /// A range that admits every price.
    pub fn full() -> Self {
        Self {
            min: Money::usd(0),
            max: Money::usd(i64::MAX),
        }
    }

    /// Lower bound.
    pub fn min(&self) -> Money {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Money {
        self.max
    }

    /// Whether `price` lies within the bounds (both inclusive).
    pub fn contains(&self, price: &Money) -> bool {
        (self.min.amount_cents..=self.max.amount_cents).contains(&price.amount_cents)
    }

    pub fn is_full(&self) -> bool {
        *self == Self::full()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::full()
    }
}
