//! Order numbers, confirmations and the order history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cart::OrderSummary;
use crate::config::CheckoutConfig;
use crate::ids::OrderId;
use crate::money::Money;

/// Fulfilment status shown in the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, not yet shipped.
    #[default]
    Processing,
    /// Order on its way.
    Shipping,
    /// Order delivered.
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipping => "Shipping",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

/// Issues order numbers of the form `<prefix><year><serial:03>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNumberSequence {
    prefix: String,
    year: u16,
    next_serial: u32,
}

impl OrderNumberSequence {
    pub fn new(prefix: impl Into<String>, year: u16, first_serial: u32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_serial: first_serial,
        }
    }

    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self::new(
            config.order_prefix.clone(),
            config.order_year,
            config.first_order_serial,
        )
    }

    /// The number the next call to [`next`](Self::next) will return.
    pub fn peek(&self) -> OrderId {
        OrderId::new(format!("{}{}{:03}", self.prefix, self.year, self.next_serial))
    }

    /// Issue the next order number.
    pub fn next(&mut self) -> OrderId {
        let id = self.peek();
        self.next_serial = self.next_serial.saturating_add(1);
        id
    }

    /// Make sure `id` is never issued, if it belongs to this sequence.
    pub fn reserve(&mut self, id: &OrderId) {
        let stem = format!("{}{}", self.prefix, self.year);
        let serial = id
            .as_str()
            .strip_prefix(stem.as_str())
            .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            .and_then(|rest| rest.parse::<u32>().ok());

        if let Some(serial) = serial {
            if serial >= self.next_serial {
                self.next_serial = serial.saturating_add(1);
            }
        }
    }
}

impl Default for OrderNumberSequence {
    fn default() -> Self {
        Self::from_config(&CheckoutConfig::default())
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    /// Totals at the moment the order was placed.
    pub summary: OrderSummary,
    pub placed_on: NaiveDate,
}

/// An entry in the order list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub placed_on: NaiveDate,
    pub item_count: u64,
    pub total: Money,
    pub status: OrderStatus,
}

impl OrderRecord {
    /// Date in list format, e.g. "Mar 15, 2025".
    pub fn placed_on_label(&self) -> String {
        self.placed_on.format("%b %-d, %Y").to_string()
    }
}

impl From<&OrderConfirmation> for OrderRecord {
    fn from(confirmation: &OrderConfirmation) -> Self {
        Self {
            id: confirmation.order_id.clone(),
            placed_on: confirmation.placed_on,
            item_count: confirmation.summary.item_count,
            total: confirmation.summary.total,
            status: OrderStatus::Processing,
        }
    }
}

/// Orders placed by the customer, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderHistory {
    orders: Vec<OrderRecord>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo history every new profile starts with.
    pub fn seeded() -> Self {
        let seed = [
            ("SPT2025001", (2025, 3, 15), 3, 17736, OrderStatus::Delivered),
            ("SPT2025002", (2025, 3, 10), 1, 8999, OrderStatus::Shipping),
            ("SPT2025003", (2025, 3, 5), 2, 15698, OrderStatus::Processing),
        ];

        let orders = seed
            .into_iter()
            .filter_map(|(id, (y, m, d), items, cents, status)| {
                Some(OrderRecord {
                    id: OrderId::new(id),
                    placed_on: NaiveDate::from_ymd_opt(y, m, d)?,
                    item_count: items,
                    total: Money::usd(cents),
                    status,
                })
            })
            .collect();

        Self { orders }
    }

    /// Record a newly placed order at the top of the list.
    pub fn record(&mut self, confirmation: &OrderConfirmation) {
        self.orders.insert(0, OrderRecord::from(confirmation));
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn get(&self, id: &OrderId) -> Option<&OrderRecord> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders not yet delivered; drives the "My Orders" badge.
    pub fn open_count(&self) -> usize {
        self.orders.iter().filter(|o| !o.status.is_terminal()).count()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_order_number() {
        let mut seq = OrderNumberSequence::default();
        assert_eq!(seq.next().as_str(), "SPT2025001");
        assert_eq!(seq.next().as_str(), "SPT2025002");
        assert_eq!(seq.peek().as_str(), "SPT2025003");
    }

    #[test]
    fn test_reserve_skips_taken_numbers() {
        let mut seq = OrderNumberSequence::default();
        seq.reserve(&OrderId::new("SPT2025003"));
        seq.reserve(&OrderId::new("SPT2025002"));
        seq.reserve(&OrderId::new("XYZ2025999"));
        seq.reserve(&OrderId::new("SPT2025"));
        assert_eq!(seq.next().as_str(), "SPT2025004");
    }

    #[test]
    fn test_seeded_history() {
        let history = OrderHistory::seeded();
        assert_eq!(history.len(), 3);
        assert_eq!(history.open_count(), 2);

        let first = history.get(&OrderId::new("SPT2025001")).unwrap();
        assert_eq!(first.placed_on_label(), "Mar 15, 2025");
        assert_eq!(first.total, Money::usd(17736));
        assert_eq!(first.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_record_puts_newest_first() {
        let mut history = OrderHistory::seeded();
        let confirmation = OrderConfirmation {
            order_id: OrderId::new("SPT2025004"),
            summary: OrderSummary {
                item_count: 2,
                subtotal: Money::usd(1000),
                tax: Money::usd(80),
                shipping: Money::usd(999),
                total: Money::usd(2079),
            },
            placed_on: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        };

        history.record(&confirmation);

        let newest = &history.orders()[0];
        assert_eq!(newest.id.as_str(), "SPT2025004");
        assert_eq!(newest.status, OrderStatus::Processing);
        assert_eq!(newest.total, Money::usd(2079));
        assert_eq!(history.open_count(), 3);
    }
}
