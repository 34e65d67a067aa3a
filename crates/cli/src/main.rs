//! Hempline CLI - cart inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! hempline show
//!
//! # Add two units of a variant
//! hempline add -v tincture-30ml -n "Hemp Tincture 30ml" -p 24.50 -q 2
//!
//! # Set an absolute quantity (0 removes the line)
//! hempline update -v tincture-30ml -q 3
//!
//! # Remove a line / empty the cart
//! hempline remove -v tincture-30ml
//! hempline clear
//! ```
//!
//! The snapshot location is configured via `HEMPLINE_CART_DIR` and
//! `HEMPLINE_CART_KEY` (see [`config`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "hempline")]
#[command(author, version, about = "Hempline cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cart contents and totals
    Show,
    /// Add a line item, merging by variant
    Add {
        /// Variant identifier (merge key)
        #[arg(short, long)]
        variant_id: String,

        /// Parent product identifier
        #[arg(long)]
        product_id: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price (e.g., 24.50)
        #[arg(short, long)]
        price: Decimal,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: i64,

        /// ISO 4217 currency code
        #[arg(short, long)]
        currency: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Set an absolute quantity for a variant (0 or less removes it)
    Update {
        /// Variant identifier
        #[arg(short, long)]
        variant_id: String,

        /// New absolute quantity
        #[arg(short, long)]
        qty: i64,
    },
    /// Remove a variant from the cart
    Remove {
        /// Variant identifier
        #[arg(short, long)]
        variant_id: String,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    // Load .env if present, then initialize tracing
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load()?;

    match cli.command {
        Commands::Show => commands::cart::show(&config)?,
        Commands::Add {
            variant_id,
            product_id,
            name,
            price,
            qty,
            currency,
            image,
        } => commands::cart::add(
            &config,
            &variant_id,
            product_id.as_deref(),
            &name,
            price,
            qty,
            currency.as_deref(),
            image.as_deref(),
        )?,
        Commands::Update { variant_id, qty } => commands::cart::update(&config, &variant_id, qty)?,
        Commands::Remove { variant_id } => commands::cart::remove(&config, &variant_id)?,
        Commands::Clear => commands::cart::clear(&config)?,
    }
    Ok(())
}
