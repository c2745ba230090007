//! Catalog module.
//!
//! Contains the product record and stock level types served by the
//! catalog and inventory collaborators.

mod product;
mod stock;

pub use product::Product;
pub use stock::StockInfo;
