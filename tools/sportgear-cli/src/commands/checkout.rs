//! Place an order.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use sportgear_commerce::cart::OrderSummary;
use sportgear_commerce::checkout::CheckoutStep;
use sportgear_commerce::error::CommerceError;
use sportgear_commerce::ids::ProductId;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.storefront()?;

    for item in &args.items {
        let (id, quantity) = parse_item(item)?;
        store
            .add_quantity(&id, quantity)
            .with_context(|| format!("Cannot add '{}' to the cart", item))?;
    }

    let summary = store.summary();
    ctx.output.header("Order Summary");
    for line in store.cart().items() {
        ctx.output.list_item(&format!(
            "{} x {} ({}) {}",
            line.quantity,
            line.name,
            line.brand,
            line.line_total()
        ));
    }
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    ctx.output.kv(
        &format!("Tax ({})", OrderSummary::tax_label(&store.config().pricing)),
        &summary.tax.display(),
    );
    ctx.output.kv("Shipping", &summary.shipping.display());
    ctx.output.kv("Total", &summary.total.display());

    print_step(ctx, CheckoutStep::Shipping);
    store.continue_to_payment()?;
    print_step(ctx, CheckoutStep::Payment);

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", summary.total))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order not placed");
            return Ok(());
        }
    }

    let pending = store.begin_submission()?;
    let spinner = ctx.output.spinner("Processing payment (Ctrl-C to cancel)");
    let mut waiter = tokio::spawn(pending.wait());

    let outcome = tokio::select! {
        joined = &mut waiter => joined?,
        _ = tokio::signal::ctrl_c() => {
            store.cancel_submission();
            waiter.await?
        }
    };
    spinner.finish_and_clear();

    match store.complete_submission(outcome) {
        Ok(confirmation) => {
            if ctx.output.is_json() {
                ctx.output.json(&confirmation);
                return Ok(());
            }
            ctx.output.success("Order Confirmed!");
            ctx.output.kv("Order", confirmation.order_id.as_str());
            ctx.output.kv("Total", &confirmation.summary.total.display());
            ctx.output.info("You'll receive a confirmation email shortly.");
            Ok(())
        }
        Err(CommerceError::CheckoutCancelled) => {
            ctx.output.warn("Order cancelled; your cart was kept");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_step(ctx: &Context, step: CheckoutStep) {
    if let Some(label) = step.progress_label() {
        ctx.output.step(&label, step.display_name());
    }
}

/// Parse `ID` or `ID:QUANTITY`.
fn parse_item(item: &str) -> Result<(ProductId, u32)> {
    let (id, quantity) = match item.rsplit_once(':') {
        Some((id, qty)) => {
            let qty: u32 = qty
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", item))?;
            (id, qty)
        }
        None => (item, 1),
    };

    if id.is_empty() {
        bail!("Missing product id in '{}'", item);
    }
    if quantity == 0 {
        bail!("Quantity must be at least 1 in '{}'", item);
    }
    Ok((ProductId::new(id), quantity))
}
