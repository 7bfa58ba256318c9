//! Basket CLI - Drive a persisted cart from the command line.
//!
//! Each invocation is one page session: the cart is read from the storage
//! directory, the command is applied, and the result is written back.
//! Running two commands in a row behaves like two tabs sharing a cart.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of product 3 (looked up in the catalog)
//! basket add 3 -q 2
//!
//! # Adjust or drop a line
//! basket increase 3
//! basket decrease 3
//! basket remove 3
//!
//! # Inspect
//! basket show
//! basket show --html
//! basket count
//! basket subtotal
//!
//! # Check out (fails on an empty cart)
//! basket checkout
//! ```
//!
//! See [`basket_cart::config`] for the environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use basket_core::ProductId;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Basket cart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a product in the catalog and add it to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Add one unit to a line
    Increase {
        /// Product id
        id: ProductId,
    },
    /// Remove one unit from a line, dropping it at zero
    Decrease {
        /// Product id
        id: ProductId,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Print the cart contents
    Show {
        /// Print the rendered popup markup instead of text
        #[arg(long)]
        html: bool,
    },
    /// Print the badge count
    Count,
    /// Print the subtotal
    Subtotal,
    /// Print the checkout summary
    Checkout,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "basket_cart=info,basket_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = basket_cart::CartConfig::from_env()?;

    match cli.command {
        Commands::Add { id, quantity } => {
            let mut page = commands::session::open_with_catalog(&config).await?;
            commands::cart::add(&mut page, &id, quantity).await?;
        }
        Commands::Increase { id } => {
            commands::cart::apply(&config, &basket_cart::CartCommand::Increase(id))?;
        }
        Commands::Decrease { id } => {
            commands::cart::apply(&config, &basket_cart::CartCommand::Decrease(id))?;
        }
        Commands::Remove { id } => {
            commands::cart::apply(&config, &basket_cart::CartCommand::Remove(id))?;
        }
        Commands::Clear => commands::cart::apply(&config, &basket_cart::CartCommand::Clear)?,
        Commands::Show { html } => commands::cart::show(&commands::session::open(&config)?, html),
        Commands::Count => commands::cart::count(&commands::session::open(&config)?),
        Commands::Subtotal => commands::cart::subtotal(&commands::session::open(&config)?),
        Commands::Checkout => commands::cart::checkout(&commands::session::open(&config)?)?,
    }
    Ok(())
}
