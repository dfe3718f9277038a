//! End-to-end shopper flows through the storefront session.

use std::sync::Arc;
use std::time::Duration;

use sportgear_commerce::prelude::*;
use sportgear_observability::StructuredLogger;

fn storefront() -> Storefront {
    Storefront::new(
        Arc::new(Catalog::seeded()),
        StoreConfig::default(),
        StructuredLogger::disabled(),
    )
    .unwrap()
}

fn ready_to_pay(store: &mut Storefront) {
    store.add_quantity(&ProductId::new("bb-001"), 2).unwrap();
    store.add_to_cart(&ProductId::new("tn-002")).unwrap();
    store.continue_to_payment().unwrap();
}

#[test]
fn test_browse_then_buy_from_results() {
    let mut store = storefront();
    store.set_query("nike");
    store.set_sort(SortKey::PriceLow);

    let first = store.visible_products()[0].id.clone();
    assert_eq!(first.as_str(), "fb-001");

    store.add_to_cart(&first).unwrap();
    store.add_to_cart(&first).unwrap();
    assert!(store.update_quantity(&first, 1));

    let summary = store.summary();
    assert_eq!(summary.item_count, 1);
    assert_eq!(summary.subtotal, Money::usd(8999));
    assert_eq!(summary.tax, Money::usd(720));
    assert_eq!(summary.shipping, Money::usd(999));
    assert_eq!(summary.total, Money::usd(8999 + 720 + 999));
}

#[tokio::test(start_paused = true)]
async fn test_second_submit_is_rejected_while_processing() {
    let mut store = storefront();
    ready_to_pay(&mut store);

    let pending = store.begin_submission().unwrap();
    assert!(store.is_submitting());
    assert_eq!(
        store.begin_submission().unwrap_err(),
        CommerceError::SubmissionInFlight
    );

    let outcome = pending.wait().await;
    let confirmation = store.complete_submission(outcome).unwrap();

    assert_eq!(confirmation.order_id.as_str(), "SPT2025004");
    assert_eq!(store.orders().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_keeps_cart_and_allows_retry() {
    let mut store = storefront();
    ready_to_pay(&mut store);
    let before = store.cart().clone();

    let pending = store.begin_submission().unwrap();
    let waiter = tokio::spawn(pending.wait());
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(store.cancel_submission());

    let outcome = waiter.await.unwrap();
    assert_eq!(outcome.status, SubmissionStatus::Cancelled);
    assert_eq!(
        store.complete_submission(outcome),
        Err(CommerceError::CheckoutCancelled)
    );

    assert_eq!(store.cart(), &before);
    assert_eq!(store.checkout_step(), CheckoutStep::Payment);
    assert_eq!(store.orders().len(), 3);

    let confirmation = store.place_order().await.unwrap();
    assert_eq!(confirmation.summary.item_count, 3);
    assert!(store.cart().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_completed_order_clears_cart_and_records_history() {
    let mut store = storefront();
    ready_to_pay(&mut store);
    let expected = store.summary();
    let started = tokio::time::Instant::now();

    let confirmation = store.place_order().await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(2000));
    assert_eq!(confirmation.summary, expected);
    assert!(store.cart().is_empty());
    assert_eq!(store.summary().total, Money::usd(0));
    assert_eq!(store.confirmation(), Some(&confirmation));

    let newest = &store.orders().orders()[0];
    assert_eq!(newest.id, confirmation.order_id);
    assert_eq!(newest.status, OrderStatus::Processing);
    assert_eq!(newest.total, expected.total);
    assert_eq!(store.orders().open_count(), 3);

    assert_eq!(store.start_over(), Ok(CheckoutStep::Shipping));
    store.continue_to_payment().unwrap();
    let next = store.place_order().await.unwrap();
    assert_eq!(next.order_id.as_str(), "SPT2025005");
}

#[test]
fn test_go_back_blocked_while_submitting() {
    let mut store = storefront();
    ready_to_pay(&mut store);

    let _pending = store.begin_submission().unwrap();

    assert_eq!(store.go_back(), Err(CommerceError::SubmissionInFlight));
    assert_eq!(store.checkout_step(), CheckoutStep::Payment);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_place_order_does_not_wedge_checkout() {
    let mut store = storefront();
    ready_to_pay(&mut store);

    let timed_out =
        tokio::time::timeout(Duration::from_millis(100), store.place_order()).await;
    assert!(timed_out.is_err());

    assert!(!store.is_submitting());
    assert!(!store.cancel_submission());
    assert_eq!(store.checkout_step(), CheckoutStep::Payment);
    assert_eq!(store.cart().total_items(), 3);

    assert_eq!(store.go_back(), Ok(CheckoutStep::Shipping));
    store.continue_to_payment().unwrap();
    let confirmation = store.place_order().await.unwrap();
    assert_eq!(confirmation.summary.item_count, 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_frees_checkout_before_outcome_arrives() {
    let mut store = storefront();
    ready_to_pay(&mut store);

    let pending = store.begin_submission().unwrap();
    assert!(store.cancel_submission());
    assert!(!store.is_submitting());
    assert_eq!(store.go_back(), Ok(CheckoutStep::Shipping));

    let outcome = pending.wait().await;
    assert_eq!(
        store.complete_submission(outcome),
        Err(CommerceError::CheckoutCancelled)
    );
    assert_eq!(store.checkout_step(), CheckoutStep::Shipping);
    assert_eq!(store.orders().len(), 3);
}

#[test]
fn test_dropped_pending_order_releases_submission() {
    let mut store = storefront();
    ready_to_pay(&mut store);

    drop(store.begin_submission().unwrap());

    assert!(!store.is_submitting());
    assert!(store.begin_submission().is_ok());
}
