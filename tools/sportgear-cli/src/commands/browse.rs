//! Catalog browsing.

use anyhow::{Context as _, Result};
use serde::Serialize;
use sportgear_commerce::money::Money;
use sportgear_commerce::search::{FilterCriteria, PriceRange, SortKey};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::rating_stars;

#[derive(Serialize)]
struct ProductRow<'a> {
    id: &'a str,
    name: &'a str,
    brand: &'a str,
    category: &'a str,
    price: String,
    rating: f64,
    reviews: u32,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let criteria = criteria_from_args(&args, ctx)?;
    let products = ctx.catalog().query(&criteria);

    if ctx.output.is_json() {
        let rows: Vec<ProductRow<'_>> = products
            .iter()
            .map(|p| ProductRow {
                id: p.id.as_str(),
                name: &p.name,
                brand: &p.brand,
                category: &p.category,
                price: p.price.display(),
                rating: p.rating,
                reviews: p.reviews,
            })
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} product(s), sorted by {}",
        products.len(),
        criteria.sort.display_name()
    ));

    if products.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [8, 30, 10, 10, 16, 8];
    ctx.output.table_row(&["ID", "NAME", "BRAND", "PRICE", "RATING", "REVIEWS"], &widths);
    for p in &products {
        let price = p.price.display();
        let rating = rating_stars(p.full_stars(), p.rating);
        let reviews = p.reviews.to_string();
        ctx.output.table_row(
            &[p.id.as_str(), &p.name, &p.brand, &price, &rating, &reviews],
            &widths,
        );
    }

    Ok(())
}

fn criteria_from_args(args: &BrowseArgs, ctx: &Context) -> Result<FilterCriteria> {
    let category = ctx.catalog().resolve_category(&args.category)?;
    let sort: SortKey = args.sort.parse()?;

    let price = match (args.min_price, args.max_price) {
        (None, None) => PriceRange::full(),
        (min, max) => {
            let min = Money::usd(i64::from(min.unwrap_or(0)) * 100);
            let max = max.map_or(PriceRange::full().max(), |m| Money::usd(i64::from(m) * 100));
            PriceRange::new(min, max).context("Invalid --min-price/--max-price")?
        }
    };

    let mut criteria = FilterCriteria::new()
        .with_category(category)
        .with_query(args.query.as_str())
        .with_price_range(price)
        .with_sort(sort);
    for brand in &args.brands {
        criteria = criteria.with_brand(brand.as_str());
    }

    ctx.output.debug(&format!("criteria: {:?}", criteria));
    Ok(criteria)
}
