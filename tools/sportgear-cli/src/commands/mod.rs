//! CLI command implementations.

pub mod browse;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category id (e.g. tennis), or "all".
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Text matched against product name and brand.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Lowest price in whole dollars.
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Highest price in whole dollars.
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Only show these brands (repeatable).
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    /// Sort order: popular, rating, price-low or price-high.
    #[arg(short, long, default_value = "popular")]
    pub sort: String,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Products to buy, as `ID` or `ID:QUANTITY`.
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Only show orders that have not been delivered.
    #[arg(long)]
    pub open: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a config file with every default spelled out.
    Init {
        /// Output path (default: sportgear.toml).
        #[arg(default_value = "sportgear.toml")]
        path: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
