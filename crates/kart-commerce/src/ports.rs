//! Collaborator traits the store depends on.
//!
//! The store owns none of these systems; the composition root injects
//! implementations (HTTP clients, in-memory fixtures, UI toast sinks).

use async_trait::async_trait;

use crate::catalog::{Product, StockInfo};
use crate::error::LookupError;
use crate::ids::ProductId;

/// Source of current stock levels.
#[async_trait]
pub trait StockSource: Send + Sync {
    /// Fetch the purchasable quantity for a product.
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, LookupError>;
}

/// Source of product records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the catalog record for a product.
    async fn product(&self, product_id: ProductId) -> Result<Product, LookupError>;
}

/// Sink for user-facing failure messages.
pub trait Notifier: Send + Sync {
    /// Show an error message to the user.
    fn error(&self, message: &str);
}
