//! Commerce error types.
//!
//! Cart mutations are total and never fail; errors only arise from parsing
//! user-selected criteria, from checkout transitions and from configuration.

use thiserror::Error;

use crate::money::Currency;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog products share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Category id is not part of the catalog's category list.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Sort key is not one of the supported orderings.
    #[error("Unknown sort key: {0} (expected popular, rating, price-low or price-high)")]
    UnknownSortKey(String),

    /// Price range bounds are negative or inverted.
    #[error("Invalid price range: {min_cents}..={max_cents} cents")]
    InvalidPriceRange { min_cents: i64, max_cents: i64 },

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// An order submission is already being processed.
    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    /// The outcome belongs to a submission that is no longer current.
    #[error("Order submission {0} is no longer current")]
    StaleSubmission(u64),

    /// The in-flight submission was cancelled before it completed.
    #[error("Order submission was cancelled")]
    CheckoutCancelled,

    /// Prices in different currencies were mixed.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// Configuration could not be parsed or is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::ConfigError(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::ConfigError(e.to_string())
    }
}
