//! CLI runner - executes commands

use crate::api::StorefrontApi;
use crate::auth::AuthConfig;
use crate::cart::{CartAction, CartStore};
use crate::cli::commands::{CartCommand, Cli, Commands, OutputFormat};
use crate::config::StorefrontConfig;
use crate::error::{Error, Result};
use crate::feed::{ProductFeed, QueryState};
use crate::types::{CategoryFilter, SortField, SortOrder, SortSpec};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Browse {
                category,
                sort_by,
                order,
                pages,
            } => self.browse(*category, *sort_by, *order, *pages).await,
            Commands::Cart { command } => self.cart(*command).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load configuration: file, then environment, then flags
    pub fn load_config(&self) -> Result<StorefrontConfig> {
        let config = match &self.cli.config {
            Some(path) => StorefrontConfig::from_file(path)?,
            None => StorefrontConfig::default(),
        };
        Ok(self.apply_overrides(config.with_env()))
    }

    /// Apply command-line overrides to a config
    pub fn apply_overrides(&self, mut config: StorefrontConfig) -> StorefrontConfig {
        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let (Some(user), Some(password)) = (&self.cli.user, &self.cli.password) {
            config.auth = AuthConfig::basic(user.clone(), password.clone());
        }
        config
    }

    /// Load catalog pages
    async fn browse(
        &self,
        category: CategoryFilter,
        sort_by: SortField,
        order: SortOrder,
        pages: u32,
    ) -> Result<()> {
        let config = self.load_config()?;
        let api = StorefrontApi::from_config(&config)?;
        let query = QueryState {
            category,
            sort: SortSpec::from([(sort_by, order)]),
        };

        info!(%category, %sort_by, %order, pages, "Browsing catalog");
        let mut feed = ProductFeed::new(api, config.paginator()?).with_query(query);
        feed.initialize().await;
        for _ in 1..pages {
            if feed.is_last() || feed.error().is_some() {
                break;
            }
            feed.fetch_next_page().await;
        }
        debug!(?feed, "Browse finished");

        self.output(&feed.snapshot())?;
        match feed.error() {
            Some(failure) => Err(Error::Other(format!("Catalog request failed: {failure}"))),
            None => Ok(()),
        }
    }

    /// Run a cart command
    async fn cart(&self, command: CartCommand) -> Result<()> {
        let config = self.load_config()?;
        let api = StorefrontApi::from_config(&config)?;
        let mut store = CartStore::load(api).await;

        let action = match command {
            CartCommand::List => None,
            CartCommand::Add { product_id } => Some(CartAction::Add(product_id)),
            CartCommand::Remove { cart_item_id } => Some(CartAction::Remove(cart_item_id)),
            CartCommand::Toggle { product_id } => Some(CartAction::Toggle(product_id)),
        };
        if let Some(action) = action {
            if store.error().is_none() {
                store.dispatch(action).await;
            }
        }

        self.output(&store.snapshot())?;
        match store.error() {
            Some(failure) => Err(Error::Other(format!("Cart request failed: {failure}"))),
            None => Ok(()),
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;

        self.output(&json!({
            "status": "valid",
            "base_url": config.base_url,
            "auth": if config.auth.is_none() { "none" } else { "configured" },
            "first_page_size": config.pagination.first_page_size,
            "page_size": config.pagination.page_size,
        }))
    }

    /// Output a value
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}
