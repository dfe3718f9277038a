//! A shopper's session over the storefront.
//!
//! `Storefront` owns the per-session state (cart, browse criteria, checkout
//! flow, order history, AR viewer) over a shared read-only catalog, and logs
//! each state change through the session logger.

use std::sync::Arc;

use sportgear_observability::StructuredLogger;

use crate::ar::ArViewer;
use crate::cart::{Cart, OrderSummary};
use crate::catalog::{Catalog, Product};
use crate::checkout::{
    CheckoutSequencer, CheckoutStep, OrderConfirmation, OrderHistory, PendingOrder,
    SubmissionOutcome,
};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::{ProductId, SessionId};
use crate::search::{FilterCriteria, PriceRange, SortKey};

/// Session state for one shopper.
#[derive(Debug)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    config: StoreConfig,
    cart: Cart,
    criteria: FilterCriteria,
    checkout: CheckoutSequencer,
    orders: OrderHistory,
    ar: ArViewer,
    logger: StructuredLogger,
}

impl Storefront {
    /// Create a session with an explicit logger.
    ///
    /// The order history starts from the demo orders, and their numbers are
    /// reserved so new orders never reuse them. Fails if the configured
    /// currency differs from the one the catalog is priced in.
    pub fn new(
        catalog: Arc<Catalog>,
        config: StoreConfig,
        logger: StructuredLogger,
    ) -> Result<Self, CommerceError> {
        if let Some(catalog_currency) = catalog.currency() {
            if catalog_currency != config.pricing.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: catalog_currency,
                    found: config.pricing.currency,
                });
            }
        }

        let orders = OrderHistory::seeded();
        let mut checkout = CheckoutSequencer::new(&config.checkout);
        for order in orders.orders() {
            checkout.reserve_order_id(&order.id);
        }

        Ok(Self {
            cart: Cart::with_currency(config.pricing.currency),
            criteria: FilterCriteria::new(),
            ar: ArViewer::new(&catalog),
            checkout,
            orders,
            logger: logger.for_component("storefront"),
            catalog,
            config,
        })
    }

    /// Create a session that logs to stderr using the configured level and format.
    pub fn with_config(catalog: Arc<Catalog>, config: StoreConfig) -> Result<Self, CommerceError> {
        let logger = StructuredLogger::new(SessionId::generate().into_inner())
            .with_min_level(config.logging.level)
            .with_format(config.logging.format);
        Self::new(catalog, config, logger)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    // Cart

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a catalog product.
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        self.add_quantity(id, 1)
    }

    /// Add `quantity` units of a catalog product, as the product page's
    /// quantity picker does.
    pub fn add_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<(), CommerceError> {
        let product = self.catalog.get(id)?;
        self.cart.add_quantity(product, quantity);

        self.logger
            .info_builder("cart.add")
            .field("product_id", id.as_str())
            .field_i64("quantity", i64::from(quantity))
            .field_i64("total_items", self.cart.total_items() as i64)
            .emit();
        Ok(())
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let changed = self.cart.update_quantity(id, quantity);
        if changed {
            self.logger
                .info_builder("cart.update")
                .field("product_id", id.as_str())
                .field_i64("quantity", quantity.max(0))
                .field_i64("total_items", self.cart.total_items() as i64)
                .emit();
        }
        changed
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove_from_cart(id);
        if removed {
            self.logger
                .info_builder("cart.remove")
                .field("product_id", id.as_str())
                .emit();
        }
        removed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
        self.logger.info("cart.clear");
    }

    /// Totals for the current cart under the configured pricing.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::for_cart(&self.cart, &self.config.pricing)
    }

    // Browsing

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The catalog filtered and sorted by the current criteria.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog.query(&self.criteria)
    }

    /// Select a category by id ("all" clears the category filter).
    pub fn set_category(&mut self, id: &str) -> Result<(), CommerceError> {
        self.criteria.category = self.catalog.resolve_category(id)?;
        self.logger
            .debug_builder("browse.category")
            .field("category", self.criteria.category.as_str())
            .emit();
        Ok(())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.criteria.price = range;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
        self.logger
            .debug_builder("browse.sort")
            .field("sort", sort.as_str())
            .emit();
    }

    /// Toggle a brand in the brand filter; returns whether it is now selected.
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        self.criteria.toggle_brand(brand)
    }

    /// Drop every filter, keeping the sort order.
    pub fn clear_filters(&mut self) {
        self.criteria.clear_filters();
    }

    // Checkout

    pub fn checkout_step(&self) -> CheckoutStep {
        self.checkout.step()
    }

    pub fn is_submitting(&self) -> bool {
        self.checkout.is_submitting()
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.checkout.confirmation()
    }

    pub fn continue_to_payment(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.checkout.continue_to_payment()
    }

    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.checkout.go_back()
    }

    /// Accept the order and start the processing delay.
    pub fn begin_submission(&mut self) -> Result<PendingOrder, CommerceError> {
        match self.checkout.begin_submission() {
            Ok(pending) => {
                self.logger
                    .info_builder("checkout.submit")
                    .field_i64("serial", pending.serial() as i64)
                    .field_i64("total_items", self.cart.total_items() as i64)
                    .emit();
                Ok(pending)
            }
            Err(e) => {
                self.logger
                    .warn_builder("checkout.submit_rejected")
                    .field("reason", e.to_string())
                    .emit();
                Err(e)
            }
        }
    }

    pub fn cancel_submission(&mut self) -> bool {
        let cancelled = self.checkout.cancel_submission();
        if cancelled {
            self.logger.info("checkout.cancel");
        }
        cancelled
    }

    /// Finish a submission; a placed order is added to the order history.
    pub fn complete_submission(
        &mut self,
        outcome: SubmissionOutcome,
    ) -> Result<OrderConfirmation, CommerceError> {
        let confirmation =
            self.checkout
                .complete_submission(outcome, &mut self.cart, &self.config.pricing)?;
        self.orders.record(&confirmation);

        self.logger
            .info_builder("checkout.placed")
            .field("order_id", confirmation.order_id.as_str())
            .field("total", confirmation.summary.total.display())
            .field_i64("items", confirmation.summary.item_count as i64)
            .emit();
        Ok(confirmation)
    }

    /// Submit the order and wait out the processing delay.
    pub async fn place_order(&mut self) -> Result<OrderConfirmation, CommerceError> {
        let pending = self.begin_submission()?;
        let outcome = pending.wait().await;
        self.complete_submission(outcome)
    }

    pub fn start_over(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.checkout.start_over()
    }

    // Orders

    pub fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    // AR

    pub fn ar(&self) -> &ArViewer {
        &self.ar
    }

    pub fn ar_select(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        self.ar.select(&self.catalog, id)
    }

    pub fn ar_place(&mut self) -> bool {
        self.ar.place()
    }

    pub fn ar_reset(&mut self) {
        self.ar.reset();
    }

    /// Add the product being previewed to the cart.
    pub fn ar_add_to_cart(&mut self) -> Result<ProductId, CommerceError> {
        let id = self.ar.add_selected_to_cart(&self.catalog, &mut self.cart)?;
        self.logger
            .info_builder("cart.add")
            .field("product_id", id.as_str())
            .field_i64("quantity", 1)
            .field("source", "ar")
            .emit();
        Ok(id)
    }
}
