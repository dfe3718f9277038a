//! Product details.

use anyhow::Result;
use sportgear_commerce::ids::ProductId;

use super::ShowArgs;
use crate::context::Context;
use crate::output::rating_stars;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog().get(&ProductId::new(args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Brand", &product.brand);
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv(
        "Rating",
        &format!(
            "{} ({} reviews)",
            rating_stars(product.full_stars(), product.rating),
            product.reviews
        ),
    );
    if product.has_ar {
        ctx.output.kv("AR", "View in your space");
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    Ok(())
}
