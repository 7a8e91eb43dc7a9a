//! B2B CLI - query the wholesale catalog from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Wholesale products, optionally filtered like the product grid
//! b2b-cli products --search widget --tag Sale --vendor Acme
//!
//! # Verified product detail
//! b2b-cli product blue-widget
//!
//! # Collections
//! b2b-cli collections
//!
//! # Distinct tags and vendors of the wholesale slice
//! b2b-cli facets
//! ```
//!
//! Reads the same environment variables as the storefront binary. Output is
//! JSON on stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "b2b-cli")]
#[command(author, version, about = "B2B wholesale catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List wholesale products
    Products {
        /// Case-insensitive search over title, tags and vendor
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact tag (`all` for any)
        #[arg(short, long, default_value = "")]
        tag: String,

        /// Exact vendor (`all` for any)
        #[arg(short, long, default_value = "")]
        vendor: String,
    },
    /// Show a verified wholesale product
    Product {
        /// Product handle (e.g., `blue-widget`)
        handle: String,
    },
    /// List collections
    Collections,
    /// Show distinct tags and vendors of the wholesale products
    Facets,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "b2b_headless_cli=info,b2b_headless_storefront=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Products {
            search,
            tag,
            vendor,
        } => commands::catalog::products(&ctx, &search, &tag, &vendor).await,
        Commands::Product { handle } => commands::catalog::product(&ctx, &handle).await,
        Commands::Collections => commands::collections::list(&ctx).await,
        Commands::Facets => commands::catalog::facets(&ctx).await,
    }
}
