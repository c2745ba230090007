//! Cart error types.

use std::fmt;

use thiserror::Error;

use crate::ids::ProductId;

/// Message shown when a requested quantity cannot be covered by stock.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

/// Message shown when a collaborator failed for reasons unrelated to the cart.
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not complete this action";

/// The store operation a failure happened in.
///
/// Used to pick the user-facing message for failures whose wording depends
/// on what the user was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartAction {
    Add,
    UpdateAmount,
    Remove,
}

impl CartAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartAction::Add => "add_product",
            CartAction::UpdateAmount => "update_product_amount",
            CartAction::Remove => "remove_product",
        }
    }

    /// Message shown when the action fails on the cart or catalog itself.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartAction::Add => "Error adding product",
            CartAction::UpdateAmount => "Error changing product quantity",
            CartAction::Remove => "Error removing product",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a stock or catalog collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The collaborator has no record for the product.
    #[error("no record for product {0}")]
    NotFound(ProductId),

    /// Transport or service failure.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Errors produced by cart operations.
///
/// Every variant leaves the cart and its persisted copy unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Nothing (more) of the product can be added.
    #[error("Product {product_id} is out of stock")]
    OutOfStock { product_id: ProductId },

    /// An explicit quantity exceeds available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The catalog has no record for a product being added.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The operation targets a product that is not in the cart.
    #[error("Product not in cart: {0}")]
    ProductNotInCart(ProductId),

    /// A stock or catalog lookup failed.
    #[error("Lookup failed: {0}")]
    LookupFailed(#[from] LookupError),

    /// The new cart could not be written to storage.
    #[error("Storage failed: {0}")]
    StorageFailed(String),
}

impl CartError {
    /// Short, stable classification for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartError::OutOfStock { .. } => "out_of_stock",
            CartError::InsufficientStock { .. } => "insufficient_stock",
            CartError::ProductNotFound(_) => "product_not_found",
            CartError::ProductNotInCart(_) => "product_not_in_cart",
            CartError::LookupFailed(_) => "lookup_failed",
            CartError::StorageFailed(_) => "storage_failed",
        }
    }

    /// The single message shown to the user for this failure.
    pub fn user_message(&self, action: CartAction) -> &'static str {
        match self {
            CartError::OutOfStock { .. } | CartError::InsufficientStock { .. } => {
                OUT_OF_STOCK_MESSAGE
            }
            CartError::ProductNotFound(_) | CartError::ProductNotInCart(_) => {
                action.failure_message()
            }
            CartError::LookupFailed(_) | CartError::StorageFailed(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<kart_cache::CacheError> for CartError {
    fn from(e: kart_cache::CacheError) -> Self {
        CartError::StorageFailed(e.to_string())
    }
}
