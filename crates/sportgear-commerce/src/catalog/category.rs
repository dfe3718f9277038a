//! Category reference data.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Id of the synthetic category that matches every product.
pub const ALL_CATEGORY_ID: &str = "all";

/// A browsing category shown as a pill above the product grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier; products reference it by value.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Icon glyph.
    pub icon: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// The synthetic "All" category.
    pub fn all() -> Self {
        Self::new(ALL_CATEGORY_ID, "All", "\u{1f3c6}")
    }

    /// Check if this is the synthetic "All" category.
    pub fn is_all(&self) -> bool {
        self.id.as_str().eq_ignore_ascii_case(ALL_CATEGORY_ID)
    }

    /// Check if this category has the given id, ignoring ASCII case.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.as_str().eq_ignore_ascii_case(id)
    }
}
