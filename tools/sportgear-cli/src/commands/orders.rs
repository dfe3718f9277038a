//! Order history.

use anyhow::Result;

use super::OrdersArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let orders: Vec<_> = store
        .orders()
        .orders()
        .iter()
        .filter(|o| !args.open || !o.status.is_terminal())
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("My Orders");
    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return Ok(());
    }

    let widths = [12, 14, 8, 10, 12];
    ctx.output.table_row(&["ORDER", "DATE", "ITEMS", "TOTAL", "STATUS"], &widths);
    for order in &orders {
        let date = order.placed_on_label();
        let items = order.item_count.to_string();
        let total = order.total.display();
        let status = status_badge(order.status);
        ctx.output.table_row(
            &[order.id.as_str(), &date, &items, &total, &status],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "{} order(s), {} open",
        store.orders().len(),
        store.orders().open_count()
    ));

    Ok(())
}
