//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use sportgear_commerce::cart::OrderSummary;
use sportgear_commerce::config::StoreConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let cfg = &ctx.config;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", cfg.pricing.currency.code());
    ctx.output.kv("tax", &OrderSummary::tax_label(&cfg.pricing));
    ctx.output.kv("flat_shipping_cents", &cfg.pricing.flat_shipping_cents.to_string());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv("processing_delay_ms", &cfg.checkout.processing_delay_ms.to_string());
    ctx.output.kv("order_prefix", &cfg.checkout.order_prefix);
    ctx.output.kv("order_year", &cfg.checkout.order_year.to_string());
    ctx.output.kv("first_order_serial", &cfg.checkout.first_order_serial.to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &cfg.logging.level.to_string());
    ctx.output.kv("format", cfg.logging.format.as_str());

    Ok(())
}

fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(path);
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let content = config::render(&StoreConfig::default(), &path)?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        ctx.output.info("No config file found; using defaults.");
        return Ok(());
    };

    // Context::load already parsed and validated it.
    ctx.config.validate()?;
    ctx.output.success(&format!("{} is valid", path.display()));
    Ok(())
}
