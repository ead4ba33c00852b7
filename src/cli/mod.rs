//! CLI module
//!
//! Command-line interface for browsing the catalog and managing the cart.
//!
//! # Commands
//!
//! - `browse` - Load catalog pages with a filter and sort
//! - `cart` - List, add, remove or toggle cart items
//! - `validate` - Check the configuration without contacting the API

mod commands;
mod runner;

pub use commands::{CartCommand, Cli, Commands, OutputFormat};
pub use runner::Runner;
