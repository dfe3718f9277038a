//! Order summary shown under the cart and on the checkout page.

use crate::cart::Cart;
use crate::config::PricingConfig;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotal, tax, shipping and grand total for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    /// Number of units in the cart.
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Sales tax on the subtotal.
    pub tax: Money,
    /// Flat shipping fee, waived for an empty cart.
    pub shipping: Money,
    /// subtotal + tax + shipping.
    pub total: Money,
}

impl OrderSummary {
    /// Derive the summary from the cart's current contents.
    pub fn for_cart(cart: &Cart, pricing: &PricingConfig) -> Self {
        let currency = cart.currency();
        let subtotal = cart.total_price();
        let tax = subtotal.basis_points(pricing.tax_rate_bps);
        let shipping = if cart.is_empty() {
            Money::zero(currency)
        } else {
            Money::new(pricing.flat_shipping_cents, currency)
        };

        Self {
            item_count: cart.total_items(),
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    /// Tax rate as a display percentage, e.g. "8%".
    pub fn tax_label(pricing: &PricingConfig) -> String {
        let whole = pricing.tax_rate_bps / 100;
        let frac = pricing.tax_rate_bps % 100;
        if frac == 0 {
            format!("{}%", whole)
        } else {
            format!("{}.{:02}%", whole, frac)
        }
    }
}
