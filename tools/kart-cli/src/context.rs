//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use kart_cache::{Cache, FileStore};
use kart_commerce::inventory::InMemoryInventory;
use kart_commerce::ports::{CatalogSource, Notifier, StockSource};
use kart_commerce::{CartStore, Collaborators, StoreConfig};
use kart_data::{FetchClient, InventoryApi, ReqwestTransport};

use crate::config::{ApiConfig, CliConfig};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["kart.toml", ".kart.toml", "kart.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.is_file() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the cart store with the configured storage and inventory.
    pub fn open_store(&self, notifier: Arc<dyn Notifier>) -> Result<CartStore> {
        let storage_dir = self.resolve_path(&self.config.storage.path);
        tracing::debug!(path = %storage_dir.display(), "opening cart storage");
        let storage = FileStore::open(storage_dir.clone()).with_context(|| {
            format!("Failed to open cart storage: {}", storage_dir.display())
        })?;

        let (stock, catalog) = self.inventory()?;

        Ok(CartStore::open(
            StoreConfig::default().with_storage_key(self.config.storage.key.clone()),
            Collaborators {
                stock,
                catalog,
                storage: Cache::new(storage),
                notifier,
            },
        ))
    }

    fn inventory(&self) -> Result<(Arc<dyn StockSource>, Arc<dyn CatalogSource>)> {
        match &self.config.inventory.fixture {
            Some(path) => {
                let path = self.resolve_path(path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read inventory fixture: {}", path.display()))?;
                let inventory = InMemoryInventory::from_json(&json)
                    .with_context(|| format!("Failed to parse inventory fixture: {}", path.display()))?;
                self.output
                    .debug(&format!("Using inventory fixture {}", path.display()));
                let inventory = Arc::new(inventory);
                let stock: Arc<dyn StockSource> = inventory.clone();
                let catalog: Arc<dyn CatalogSource> = inventory;
                Ok((stock, catalog))
            }
            None => {
                let client = fetch_client(&self.config.api)?;
                self.output
                    .debug(&format!("Using inventory API at {}", self.config.api.base_url));
                let api = Arc::new(InventoryApi::new(client));
                let stock: Arc<dyn StockSource> = api.clone();
                let catalog: Arc<dyn CatalogSource> = api;
                Ok((stock, catalog))
            }
        }
    }
}

/// Build the HTTP client described by `[api]`.
fn fetch_client(api: &ApiConfig) -> Result<FetchClient> {
    let client = match api.timeout_secs {
        Some(secs) => {
            let transport = ReqwestTransport::with_timeout(Duration::from_secs(secs))
                .context("Failed to build HTTP client")?;
            FetchClient::with_transport(transport)
        }
        None => FetchClient::new(),
    };
    Ok(api
        .headers
        .iter()
        .fold(client.with_base_url(api.base_url.clone()), |client, (key, value)| {
            client.with_default_header(key.clone(), value.clone())
        }))
}
