//! Stride CLI - manage a shopping cart against a storefront API.
//!
//! Commands:
//! - `stride show` - Print the cart
//! - `stride add` - Add one unit of a product
//! - `stride remove` - Remove a product from the cart
//! - `stride update` - Set the quantity of a product
//! - `stride config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stride_observability::{init_logging, LogLevel};

use commands::{AddArgs, ConfigArgs, RemoveArgs, UpdateArgs};

/// Stride CLI - a stock-aware shopping cart in your terminal
#[derive(Parser)]
#[command(name = "stride")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storefront API base URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Storage file path (overrides the config file)
    #[arg(long, global = true)]
    storage: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,

    /// Add one unit of a product
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Change the quantity of a product already in the cart
    Update(UpdateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config, then let flags win
    let ctx = context::Context::load(cli.config.as_deref(), output)?
        .with_overrides(cli.api_url, cli.storage);

    let mut log_config = ctx.config.logging.clone();
    if cli.verbose {
        log_config.level = log_config.level.min(LogLevel::Debug);
    }
    if let Err(e) = init_logging(&log_config) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }
    tracing::debug!(
        config_file = ?ctx.config_file,
        api = %ctx.config.api.base_url,
        "context loaded"
    );

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
