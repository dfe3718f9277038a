//! Search module.
//!
//! Contains the filter criteria record, sort keys and the pure pipeline that
//! turns a catalog plus criteria into an ordered product view.

mod filter;
mod pipeline;
mod query;

pub use filter::{CategoryFilter, PriceRange};
pub use pipeline::{apply, sort_products};
pub use query::{FilterCriteria, SortKey};
