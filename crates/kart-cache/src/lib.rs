//! Type-safe Key-Value persistence layer for the kart cart store.
//!
//! Provides a small [`KvStore`] seam over raw byte slots, two stores
//! ([`MemoryStore`] for tests and embedding, [`FileStore`] for durable
//! local state) and a [`Cache`] wrapper with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use kart_cache::{cache_key, Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".kart")?);
//! let key = cache_key!("rocketshoes", "cart");
//!
//! // Store a value
//! cache.set(&key, &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<CartItem>> = cache.get(&key)?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
