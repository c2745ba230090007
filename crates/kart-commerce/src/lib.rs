//! Shopping cart state management for the kart storefront.
//!
//! This crate provides the cart core a storefront UI drives:
//!
//! - **Catalog**: Product records and stock levels
//! - **Cart**: The ordered, id-unique cart and its pure transition function
//! - **Store**: Stock-checked add / update / remove with persistence and
//!   user notifications
//!
//! Stock, catalog, storage and notification are injected collaborators; see
//! [`ports`] for the traits and [`inventory`] / [`notify`] for in-memory
//! implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use kart_commerce::prelude::*;
//! use kart_cache::{Cache, MemoryStore};
//!
//! let inventory = Arc::new(InMemoryInventory::from_json(DB_JSON)?);
//! let store = CartStore::open(
//!     StoreConfig::default(),
//!     Collaborators {
//!         stock: inventory.clone(),
//!         catalog: inventory,
//!         storage: Cache::new(MemoryStore::new()),
//!         notifier: Arc::new(TracingNotifier),
//!     },
//! );
//!
//! store.add_product(ProductId::new(1)).await?;
//! assert_eq!(store.cart().amount_of(ProductId::new(1)), Some(1));
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;
pub mod inventory;
pub mod notify;
pub mod ports;
pub mod store;

pub use error::{CartAction, CartError, LookupError};
pub use ids::ProductId;
pub use store::{CartStore, Collaborators, StoreConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartAction, CartError, LookupError};
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{Product, StockInfo};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartOp};

    // Store and collaborators
    pub use crate::inventory::{InMemoryInventory, InventoryFixture};
    pub use crate::notify::{RecordingNotifier, TracingNotifier};
    pub use crate::ports::{CatalogSource, Notifier, StockSource};
    pub use crate::store::{CartStore, Collaborators, StoreConfig};
}
