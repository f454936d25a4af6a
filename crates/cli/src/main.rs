//! Murela CLI - seeding and inspecting the local document store.
//!
//! # Usage
//!
//! ```bash
//! # Write the built-in catalog (keeps an existing one unless --force)
//! murela-cli seed
//! murela-cli seed --force
//!
//! # Show the stored catalog
//! murela-cli products list
//!
//! # Show (and optionally drop) the order awaiting payment
//! murela-cli orders pending
//! murela-cli orders pending --clear
//!
//! # Empty the stored cart
//! murela-cli cart clear
//! ```
//!
//! The data directory comes from `--data-dir`, then `MURELA_DATA_DIR`, then
//! defaults to `.murela`. Stop the storefront before changing the cart; it
//! keeps its own copy in memory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use murela_storefront::storage::{FileStore, KeyValueStore};

mod commands;

#[derive(Parser)]
#[command(name = "murela-cli")]
#[command(author, version, about = "Murela storefront CLI tools")]
struct Cli {
    /// Data directory of the storefront document store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in product catalog
    Seed {
        /// Overwrite an existing catalog
        #[arg(long)]
        force: bool,
    },
    /// Inspect the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Manage the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List stored products
    List,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Show the order awaiting payment confirmation
    Pending {
        /// Remove the pending order after showing it
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Remove every line from the stored cart
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn KeyValueStore> = Arc::new(open_store(cli.data_dir)?);

    match cli.command {
        Commands::Seed { force } => commands::seed::catalog(store, force)?,
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list(store),
        },
        Commands::Orders { action } => match action {
            OrdersAction::Pending { clear } => commands::orders::pending(store, clear)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Clear => commands::cart::clear(store)?,
        },
    }
    Ok(())
}

/// Open the document store from the flag, the environment or the default.
fn open_store(flag: Option<PathBuf>) -> Result<FileStore, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let dir = flag
        .or_else(|| std::env::var_os("MURELA_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".murela"));
    tracing::debug!(dir = %dir.display(), "Opening document store");
    Ok(FileStore::open(dir)?)
}
