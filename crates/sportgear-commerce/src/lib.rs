//! Storefront core for the SportGear sports equipment shop.
//!
//! - **Catalog**: products, categories and the seeded SportGear range
//! - **Search**: filter criteria, sort keys and the filter/sort pipeline
//! - **Cart**: the cart aggregator and order summary
//! - **Checkout**: step sequencing, guarded order submission, order history
//! - **Session**: the `Storefront` tying a shopper's state together
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sportgear_commerce::prelude::*;
//!
//! let mut store = Storefront::with_config(Arc::new(Catalog::seeded()), StoreConfig::default())?;
//! store.set_category("tennis")?;
//! store.set_sort(SortKey::PriceLow);
//! store.add_to_cart(&ProductId::new("tn-002"))?;
//!
//! store.continue_to_payment()?;
//! let confirmation = store.place_order().await?;
//! println!("Order {} total {}", confirmation.order_id, confirmation.summary.total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod ar;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod search;
pub mod session;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::ar::ArViewer;
    pub use crate::cart::{Cart, CartItem, OrderSummary};
    pub use crate::catalog::{Catalog, Category, Product, BRANDS};
    pub use crate::checkout::{
        CheckoutSequencer, CheckoutStep, OrderConfirmation, OrderHistory, OrderRecord,
        OrderStatus, PendingOrder, SubmissionOutcome, SubmissionStatus,
    };
    pub use crate::config::{CheckoutConfig, LoggingConfig, PricingConfig, StoreConfig};
    pub use crate::search::{CategoryFilter, FilterCriteria, PriceRange, SortKey};
    pub use crate::session::Storefront;
}
