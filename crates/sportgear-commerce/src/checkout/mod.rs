//! Checkout module.
//!
//! Step sequencing, guarded order submission, order numbers and history.

mod flow;
mod order;

pub use flow::{
    CheckoutSequencer, CheckoutStep, PendingOrder, SubmissionOutcome, SubmissionStatus,
};
pub use order::{OrderConfirmation, OrderHistory, OrderNumberSequence, OrderRecord, OrderStatus};
