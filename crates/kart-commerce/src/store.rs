//! Cart store: stock-checked cart mutations with persistence.
//!
//! Every operation follows the same shape: suspend on the stock (and, for a
//! new product, catalog) lookup, then commit a [`CartOp`] through the pure
//! reducer. A commit validates against the latest committed cart, writes the
//! result to storage and only then swaps it in, all under the snapshot
//! channel's write lock. Operations are not serialized against each other,
//! so two calls on the same product can interleave at their lookups; the
//! membership checks run inside the commit and see whatever landed first.
//!
//! The persistence write runs synchronously inside that lock, so the
//! storage collaborator must be fast and is allowed to block the calling
//! thread (one small file write for [`kart_cache::FileStore`]). Slow or
//! remote storage belongs behind its own buffering store.
//!
//! Failures are classified as [`CartError`], logged, and shown to the user
//! through the [`Notifier`] exactly once per call before being returned.

use std::sync::Arc;

use kart_cache::{cache_key, Cache};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::cart::{reducer, Cart, CartOp};
use crate::error::{CartAction, CartError, LookupError};
use crate::ids::ProductId;
use crate::ports::{CatalogSource, Notifier, StockSource};

/// Storage key used when none is configured.
pub fn default_storage_key() -> String {
    cache_key!("rocketshoes", "cart")
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key of the persisted cart slot.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

impl StoreConfig {
    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

/// The external systems a store talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub stock: Arc<dyn StockSource>,
    pub catalog: Arc<dyn CatalogSource>,
    pub storage: Cache,
    pub notifier: Arc<dyn Notifier>,
}

/// Shopping cart store.
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::open(StoreConfig::default(), collaborators);
///
/// store.add_product(ProductId::new(1)).await?;
/// store.update_product_amount(ProductId::new(1), 3).await?;
/// store.remove_product(ProductId::new(1))?;
///
/// println!("{} products in cart", store.cart().len());
/// ```
pub struct CartStore {
    stock: Arc<dyn StockSource>,
    catalog: Arc<dyn CatalogSource>,
    storage: Cache,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    state: watch::Sender<Cart>,
}

impl CartStore {
    /// Create a store, hydrating the cart from storage.
    ///
    /// A missing, unreadable or malformed persisted value yields an empty
    /// cart. No stock validation happens here.
    pub fn open(config: StoreConfig, collaborators: Collaborators) -> Self {
        let cart = hydrate(&collaborators.storage, &config.storage_key);
        debug!(
            key = %config.storage_key,
            lines = cart.len(),
            "cart store opened"
        );

        Self {
            stock: collaborators.stock,
            catalog: collaborators.catalog,
            storage: collaborators.storage,
            notifier: collaborators.notifier,
            storage_key: config.storage_key,
            state: watch::Sender::new(cart),
        }
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receive a fresh snapshot after every successful commit.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Key of the persisted cart slot.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart is bumped by one if stock covers the
    /// new total; otherwise the catalog record is fetched and appended with
    /// amount 1.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add_product(product_id).await;
        self.finish(CartAction::Add, result)
    }

    /// Set the amount of a product already in the cart.
    ///
    /// An `amount` of zero or less is ignored without notification; use
    /// [`CartStore::remove_product`] to drop an entry.
    #[instrument(skip_all, fields(product_id = %product_id, amount = amount))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            debug!("ignoring non-positive amount");
            return Ok(());
        }
        let result = self.try_update_product_amount(product_id, amount).await;
        self.finish(CartAction::UpdateAmount, result)
    }

    /// Remove a product from the cart.
    ///
    /// Fails with [`CartError::ProductNotInCart`] if there is nothing to
    /// remove.
    pub fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.commit(CartOp::Remove { product_id });
        self.finish(CartAction::Remove, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.stock.stock(product_id).await?;
        if !stock.is_available() {
            return Err(CartError::OutOfStock { product_id });
        }

        let in_cart = self.state.borrow().contains(product_id);
        if in_cart {
            return self.commit(CartOp::Increment { product_id, stock });
        }

        let product = self
            .catalog
            .product(product_id)
            .await
            .map_err(|e| match e {
                LookupError::NotFound(_) => CartError::ProductNotFound(product_id),
                other => CartError::LookupFailed(other),
            })?;

        self.commit(CartOp::Insert { product, stock })
    }

    async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let stock = self.stock.stock(product_id).await?;
        self.commit(CartOp::SetAmount {
            product_id,
            amount,
            stock,
        })
    }

    /// Apply `op` to the latest cart, persist, then publish.
    ///
    /// The storage write is blocking and happens with the channel lock held.
    fn commit(&self, op: CartOp) -> Result<(), CartError> {
        let mut outcome = Ok(());
        let mut lines = 0;

        self.state.send_if_modified(|cart| {
            let next = match reducer::apply(cart, &op) {
                Ok(next) => next,
                Err(e) => {
                    outcome = Err(e);
                    return false;
                }
            };
            if next == *cart {
                return false;
            }
            if let Err(e) = self.storage.set(&self.storage_key, &next) {
                outcome = Err(e.into());
                return false;
            }
            lines = next.len();
            *cart = next;
            true
        });

        if outcome.is_ok() {
            debug!(
                op = op.name(),
                product_id = %op.product_id(),
                lines,
                "cart committed"
            );
        }
        outcome
    }

    fn finish(&self, action: CartAction, result: Result<(), CartError>) -> Result<(), CartError> {
        if let Err(ref e) = result {
            warn!(
                action = %action,
                kind = e.kind(),
                error = %e,
                "cart operation failed"
            );
            self.notifier.error(e.user_message(action));
        }
        result
    }
}

fn hydrate(storage: &Cache, key: &str) -> Cart {
    match storage.get::<Cart>(key) {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable persisted cart");
            Cart::new()
        }
    }
}
