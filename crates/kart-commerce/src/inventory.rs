//! In-memory stock and catalog source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::{Product, StockInfo};
use crate::error::LookupError;
use crate::ids::ProductId;
use crate::ports::{CatalogSource, StockSource};

/// Contents of an inventory fixture file.
///
/// Same shape as the mock API database the storefront is developed
/// against: `{"products": [...], "stock": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryFixture {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock: Vec<StockInfo>,
}

/// Seeded stock and catalog data served from memory.
///
/// Counts every lookup so callers can check how often the store reached
/// out to its collaborators.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    stock_lookups: AtomicUsize,
    catalog_lookups: AtomicUsize,
}

impl InMemoryInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from a fixture.
    pub fn from_fixture(fixture: InventoryFixture) -> Self {
        let inventory = Self::new();
        for product in fixture.products {
            inventory.upsert_product(product);
        }
        for level in fixture.stock {
            inventory.set_stock(level.id, level.amount);
        }
        inventory
    }

    /// Parse a JSON fixture.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let fixture: InventoryFixture = serde_json::from_str(json)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Add a product with a stock level.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.set_stock(product.id, stock);
        self.upsert_product(product);
        self
    }

    /// Insert or replace a catalog record.
    pub fn upsert_product(&self, product: Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id, product);
    }

    /// Drop a catalog record; its stock level is kept.
    pub fn remove_product(&self, product_id: ProductId) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&product_id);
    }

    /// Set the stock level of a product.
    pub fn set_stock(&self, product_id: ProductId, amount: i64) {
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id, amount);
    }

    /// Number of stock lookups served so far.
    pub fn stock_lookups(&self) -> usize {
        self.stock_lookups.load(Ordering::SeqCst)
    }

    /// Number of catalog lookups served so far.
    pub fn catalog_lookups(&self) -> usize {
        self.catalog_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockSource for InMemoryInventory {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, LookupError> {
        self.stock_lookups.fetch_add(1, Ordering::SeqCst);
        self.stock
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product_id)
            .map(|&amount| StockInfo::new(product_id, amount))
            .ok_or(LookupError::NotFound(product_id))
    }
}

#[async_trait]
impl CatalogSource for InMemoryInventory {
    async fn product(&self, product_id: ProductId) -> Result<Product, LookupError> {
        self.catalog_lookups.fetch_add(1, Ordering::SeqCst);
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product_id)
            .cloned()
            .ok_or(LookupError::NotFound(product_id))
    }
}
