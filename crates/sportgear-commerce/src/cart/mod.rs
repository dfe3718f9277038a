//! Shopping cart module.
//!
//! Contains the cart aggregator, its line items and the order summary derived
//! from them.

mod cart;
mod summary;

pub use cart::{Cart, CartItem};
pub use summary::OrderSummary;
