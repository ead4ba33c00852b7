//! CLI commands and argument parsing

use crate::types::{CategoryFilter, CartItemId, ProductId, SortField, SortOrder};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storefront catalog client CLI
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storefront API base URL (overrides config and environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// User id for Basic auth
    #[arg(short, long, global = true, requires = "password")]
    pub user: Option<String>,

    /// Password for Basic auth
    #[arg(short, long, global = true, requires = "user")]
    pub password: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load catalog pages
    Browse {
        /// Category to filter by (empty or `all` for every category)
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Field to sort by
        #[arg(long, default_value = "price")]
        sort_by: SortField,

        /// Sort direction
        #[arg(long, default_value = "asc")]
        order: SortOrder,

        /// Number of pages to load, including the first
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Cart operations
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },

    /// Validate the configuration
    Validate,
}

/// Cart subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCommand {
    /// List cart items
    List,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: ProductId,
    },
    /// Remove a cart item
    Remove {
        /// Cart item id
        cart_item_id: CartItemId,
    },
    /// Add the product if absent, remove it otherwise
    Toggle {
        /// Product id
        product_id: ProductId,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
