//! Checkout step sequencer.
//!
//! `Shipping -> Payment -> Confirmation`. Placing an order runs a simulated
//! processing delay as a cancellable task; only one submission may be in
//! flight at a time.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::cart::{Cart, OrderSummary};
use crate::checkout::{OrderConfirmation, OrderNumberSequence};
use crate::config::{CheckoutConfig, PricingConfig};
use crate::error::CommerceError;
use crate::ids::OrderId;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Shipping address form.
    #[default]
    Shipping,
    /// Payment details form.
    Payment,
    /// Order placed.
    Confirmation,
}

impl CheckoutStep {
    /// Number of form steps before confirmation.
    pub const FORM_STEPS: u8 = 2;

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmation => "confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping Address",
            CheckoutStep::Payment => "Payment Details",
            CheckoutStep::Confirmation => "Order Confirmed",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Confirmation => 3,
        }
    }

    /// Progress text for the form steps, e.g. "Step 1 of 2".
    pub fn progress_label(&self) -> Option<String> {
        match self {
            CheckoutStep::Confirmation => None,
            step => Some(format!("Step {} of {}", step.number(), Self::FORM_STEPS)),
        }
    }
}

/// How a pending submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Completed,
    Cancelled,
}

/// Outcome of [`PendingOrder::wait`], handed back to
/// [`CheckoutSequencer::complete_submission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub serial: u64,
    pub status: SubmissionStatus,
}

/// A submission that has been accepted and is waiting out the processing delay.
///
/// It does not borrow the sequencer, so the owner stays free to cancel it or
/// to observe that a submission is in flight while the delay runs. Dropping
/// it, or dropping the [`wait`](Self::wait) future before the delay ends,
/// cancels the submission and releases the sequencer.
#[derive(Debug)]
pub struct PendingOrder {
    serial: u64,
    delay: Duration,
    token: CancellationToken,
    guard: DropGuard,
}

impl PendingOrder {
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// A handle that cancels this submission when triggered.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait out the processing delay unless cancelled first.
    pub async fn wait(self) -> SubmissionOutcome {
        let PendingOrder {
            serial,
            delay,
            token,
            guard,
        } = self;

        let status = tokio::select! {
            _ = token.cancelled() => SubmissionStatus::Cancelled,
            _ = tokio::time::sleep(delay) => SubmissionStatus::Completed,
        };
        guard.disarm();

        SubmissionOutcome { serial, status }
    }
}

#[derive(Debug)]
struct InFlight {
    serial: u64,
    token: CancellationToken,
}

impl InFlight {
    fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }
}

/// Drives a single checkout from shipping to confirmation.
#[derive(Debug)]
pub struct CheckoutSequencer {
    step: CheckoutStep,
    in_flight: Option<InFlight>,
    cancelled_serial: Option<u64>,
    next_serial: u64,
    delay: Duration,
    numbers: OrderNumberSequence,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutSequencer {
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            step: CheckoutStep::Shipping,
            in_flight: None,
            cancelled_serial: None,
            next_serial: 1,
            delay: config.processing_delay(),
            numbers: OrderNumberSequence::from_config(config),
            confirmation: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Whether an order submission is waiting on the processing delay.
    ///
    /// A submission whose [`PendingOrder`] was dropped no longer counts.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.as_ref().map_or(false, InFlight::is_live)
    }

    /// The confirmation of the last placed order, while on the confirmation step.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Keep the order number sequence from issuing `id`.
    pub fn reserve_order_id(&mut self, id: &OrderId) {
        self.numbers.reserve(id);
    }

    /// Shipping -> Payment.
    pub fn continue_to_payment(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.transition(CheckoutStep::Shipping, CheckoutStep::Payment)
    }

    /// Payment -> Shipping. Not allowed while a submission is in flight.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        if self.is_submitting() {
            return Err(CommerceError::SubmissionInFlight);
        }
        self.release_abandoned();
        self.transition(CheckoutStep::Payment, CheckoutStep::Shipping)
    }

    /// Confirmation -> Shipping, ready for the next order.
    pub fn start_over(&mut self) -> Result<CheckoutStep, CommerceError> {
        let step = self.transition(CheckoutStep::Confirmation, CheckoutStep::Shipping)?;
        self.confirmation = None;
        Ok(step)
    }

    fn transition(
        &mut self,
        from: CheckoutStep,
        to: CheckoutStep,
    ) -> Result<CheckoutStep, CommerceError> {
        if self.step != from {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        tracing::debug!(from = from.as_str(), to = to.as_str(), "checkout step");
        self.step = to;
        Ok(to)
    }

    /// Forget a submission whose token was cancelled without going through
    /// [`cancel_submission`](Self::cancel_submission), e.g. a dropped future.
    fn release_abandoned(&mut self) {
        if self.in_flight.as_ref().map_or(false, |f| !f.is_live()) {
            if let Some(in_flight) = self.in_flight.take() {
                tracing::debug!(serial = in_flight.serial, "abandoned order submission released");
                self.cancelled_serial = Some(in_flight.serial);
            }
        }
    }

    /// Accept an order submission from the payment step.
    ///
    /// Fails with [`CommerceError::SubmissionInFlight`] while a previous
    /// submission has not been completed or cancelled.
    pub fn begin_submission(&mut self) -> Result<PendingOrder, CommerceError> {
        if self.is_submitting() {
            return Err(CommerceError::SubmissionInFlight);
        }
        self.release_abandoned();
        if self.step != CheckoutStep::Payment {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Confirmation.as_str().to_string(),
            });
        }

        let serial = self.next_serial;
        self.next_serial += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            serial,
            token: token.clone(),
        });
        tracing::debug!(serial, delay_ms = self.delay.as_millis() as u64, "order submission started");

        Ok(PendingOrder {
            serial,
            delay: self.delay,
            guard: token.clone().drop_guard(),
            token,
        })
    }

    /// Cancel the in-flight submission, if any. Returns whether one was cancelled.
    ///
    /// The sequencer is released at once; completing the cancelled
    /// submission afterwards reports [`CommerceError::CheckoutCancelled`].
    pub fn cancel_submission(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                let was_live = in_flight.is_live();
                in_flight.token.cancel();
                self.cancelled_serial = Some(in_flight.serial);
                tracing::debug!(serial = in_flight.serial, "order submission cancelled");
                was_live
            }
            None => false,
        }
    }

    /// Finish a submission.
    ///
    /// On success the order summary is taken from the cart, the cart is
    /// cleared and the flow moves to confirmation. A cancelled submission
    /// leaves the cart untouched and the flow on the payment step.
    pub fn complete_submission(
        &mut self,
        outcome: SubmissionOutcome,
        cart: &mut Cart,
        pricing: &PricingConfig,
    ) -> Result<OrderConfirmation, CommerceError> {
        if self.cancelled_serial == Some(outcome.serial) {
            self.cancelled_serial = None;
            return Err(CommerceError::CheckoutCancelled);
        }

        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.serial == outcome.serial => in_flight,
            other => {
                self.in_flight = other;
                return Err(CommerceError::StaleSubmission(outcome.serial));
            }
        };

        if outcome.status == SubmissionStatus::Cancelled || !in_flight.is_live() {
            tracing::debug!(serial = outcome.serial, "order submission cancelled");
            return Err(CommerceError::CheckoutCancelled);
        }

        let confirmation = OrderConfirmation {
            order_id: self.numbers.next(),
            summary: OrderSummary::for_cart(cart, pricing),
            placed_on: chrono::Local::now().date_naive(),
        };
        cart.clear_cart();
        self.step = CheckoutStep::Confirmation;
        self.confirmation = Some(confirmation.clone());
        tracing::debug!(serial = outcome.serial, order_id = %confirmation.order_id, "order placed");

        Ok(confirmation)
    }

    /// Begin, wait out and complete a submission in one call.
    pub async fn place_order(
        &mut self,
        cart: &mut Cart,
        pricing: &PricingConfig,
    ) -> Result<OrderConfirmation, CommerceError> {
        let pending = self.begin_submission()?;
        let outcome = pending.wait().await;
        self.complete_submission(outcome, cart, pricing)
    }
}

impl Default for CheckoutSequencer {
    fn default() -> Self {
        Self::new(&CheckoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Money;

    fn cart_with_ball() -> Cart {
        let mut cart = Cart::new();
        let ball = Product::new("bb", "Ball", "Spalding", "basketball", Money::usd(4999));
        cart.add_quantity(&ball, 2);
        cart
    }

    fn at_payment() -> CheckoutSequencer {
        let mut flow = CheckoutSequencer::default();
        flow.continue_to_payment().unwrap();
        flow
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(CheckoutStep::Shipping.progress_label().as_deref(), Some("Step 1 of 2"));
        assert_eq!(CheckoutStep::Payment.progress_label().as_deref(), Some("Step 2 of 2"));
        assert_eq!(CheckoutStep::Confirmation.progress_label(), None);
    }

    #[test]
    fn test_forward_and_back() {
        let mut flow = CheckoutSequencer::default();
        assert_eq!(flow.step(), CheckoutStep::Shipping);

        assert_eq!(flow.continue_to_payment(), Ok(CheckoutStep::Payment));
        assert!(flow.continue_to_payment().is_err());
        assert_eq!(flow.go_back(), Ok(CheckoutStep::Shipping));
        assert!(flow.go_back().is_err());
    }

    #[test]
    fn test_cannot_submit_from_shipping() {
        let mut flow = CheckoutSequencer::default();
        assert!(matches!(
            flow.begin_submission(),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
        assert!(!flow.is_submitting());
    }

    #[test]
    fn test_second_submission_is_rejected_while_in_flight() {
        let mut flow = at_payment();
        let _pending = flow.begin_submission().unwrap();

        assert_eq!(flow.begin_submission().unwrap_err(), CommerceError::SubmissionInFlight);
        assert_eq!(flow.go_back(), Err(CommerceError::SubmissionInFlight));
        assert!(flow.is_submitting());
    }

    #[test]
    fn test_complete_clears_cart_and_confirms() {
        let mut flow = at_payment();
        let mut cart = cart_with_ball();
        let pending = flow.begin_submission().unwrap();
        let outcome = SubmissionOutcome {
            serial: pending.serial(),
            status: SubmissionStatus::Completed,
        };

        let confirmation = flow
            .complete_submission(outcome, &mut cart, &PricingConfig::default())
            .unwrap();

        assert_eq!(confirmation.order_id.as_str(), "SPT2025001");
        assert_eq!(confirmation.summary.subtotal, Money::usd(9998));
        assert_eq!(confirmation.summary.item_count, 2);
        assert!(cart.is_empty());
        assert_eq!(flow.step(), CheckoutStep::Confirmation);
        assert!(!flow.is_submitting());
        assert_eq!(flow.confirmation(), Some(&confirmation));
    }

    #[test]
    fn test_cancelled_submission_keeps_cart() {
        let mut flow = at_payment();
        let mut cart = cart_with_ball();
        let pending = flow.begin_submission().unwrap();

        assert!(flow.cancel_submission());
        assert!(!flow.cancel_submission());

        let outcome = SubmissionOutcome {
            serial: pending.serial(),
            status: SubmissionStatus::Completed,
        };
        let result = flow.complete_submission(outcome, &mut cart, &PricingConfig::default());

        assert_eq!(result, Err(CommerceError::CheckoutCancelled));
        assert_eq!(cart.total_items(), 2);
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert!(!flow.is_submitting());
        assert!(flow.begin_submission().is_ok());
    }

    #[test]
    fn test_stale_outcome_is_rejected() {
        let mut flow = at_payment();
        let mut cart = cart_with_ball();
        let pending = flow.begin_submission().unwrap();
        let stale = SubmissionOutcome {
            serial: pending.serial() + 7,
            status: SubmissionStatus::Completed,
        };

        let result = flow.complete_submission(stale, &mut cart, &PricingConfig::default());

        assert_eq!(result, Err(CommerceError::StaleSubmission(pending.serial() + 7)));
        assert!(flow.is_submitting());
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_start_over() {
        let mut flow = at_payment();
        let mut cart = cart_with_ball();
        let pending = flow.begin_submission().unwrap();
        let outcome = SubmissionOutcome {
            serial: pending.serial(),
            status: SubmissionStatus::Completed,
        };
        flow.complete_submission(outcome, &mut cart, &PricingConfig::default())
            .unwrap();

        assert_eq!(flow.start_over(), Ok(CheckoutStep::Shipping));
        assert!(flow.confirmation().is_none());
        assert!(flow.start_over().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_waits_for_delay() {
        let mut flow = at_payment();
        let mut cart = cart_with_ball();
        let started = tokio::time::Instant::now();

        let confirmation = flow
            .place_order(&mut cart, &PricingConfig::default())
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert_eq!(confirmation.order_id.as_str(), "SPT2025001");
        assert!(cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_order_cancelled_by_handle() {
        let mut flow = at_payment();
        let pending = flow.begin_submission().unwrap();
        let handle = pending.cancel_handle();

        let waiter = tokio::spawn(pending.wait());
        handle.cancel();
        let outcome = waiter.await.unwrap();

        assert_eq!(outcome.status, SubmissionStatus::Cancelled);
    }

    #[test]
    fn test_cancel_releases_guard_at_once() {
        let mut flow = at_payment();
        let mut cart = cart_with_ball();
        let pending = flow.begin_submission().unwrap();

        assert!(flow.cancel_submission());
        assert!(!flow.is_submitting());
        assert_eq!(flow.go_back(), Ok(CheckoutStep::Shipping));
        flow.continue_to_payment().unwrap();

        let late = SubmissionOutcome {
            serial: pending.serial(),
            status: SubmissionStatus::Completed,
        };
        assert_eq!(
            flow.complete_submission(late, &mut cart, &PricingConfig::default()),
            Err(CommerceError::CheckoutCancelled)
        );
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_dropped_pending_order_releases_guard() {
        let mut flow = at_payment();
        let pending = flow.begin_submission().unwrap();
        let handle = pending.cancel_handle();

        drop(pending);

        assert!(handle.is_cancelled());
        assert!(!flow.is_submitting());
        assert!(!flow.cancel_submission());
        assert!(flow.begin_submission().is_ok());
        assert!(flow.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_place_order_releases_guard() {
        let mut flow = at_payment();
        let mut cart = cart_with_ball();
        let pricing = PricingConfig::default();

        let timed_out = tokio::time::timeout(
            Duration::from_millis(100),
            flow.place_order(&mut cart, &pricing),
        )
        .await;
        assert!(timed_out.is_err());

        assert!(!flow.is_submitting());
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert_eq!(cart.total_items(), 2);

        let confirmation = flow.place_order(&mut cart, &pricing).await.unwrap();
        assert_eq!(confirmation.order_id.as_str(), "SPT2025001");
        assert!(cart.is_empty());
    }
}
