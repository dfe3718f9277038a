//! SportGear CLI - browse the catalog and place orders from a terminal.
//!
//! Commands:
//! - `sportgear browse` - Filter and sort the catalog
//! - `sportgear show` - Show a product
//! - `sportgear checkout` - Add products to a cart and place an order
//! - `sportgear orders` - List the order history
//! - `sportgear config` - Show or create configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ShowArgs};

/// SportGear CLI - shop the SportGear catalog
#[derive(Parser)]
#[command(name = "sportgear")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output and session logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Browse(BrowseArgs),

    /// Show product details
    Show(ShowArgs),

    /// Place an order for one or more products
    Checkout(CheckoutArgs),

    /// List orders
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing::subscriber::set_global_default(output::diagnostics(cli.verbose, std::io::stderr))?;

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
