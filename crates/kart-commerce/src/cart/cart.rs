//! Cart and cart item types.

use std::collections::{BTreeMap, HashSet};

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A cart state that breaks one of the cart invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two entries share a product id.
    #[error("duplicate cart entry for product {0}")]
    DuplicateProduct(ProductId),

    /// An entry has a quantity below one.
    #[error("cart entry for product {product_id} has amount {amount}")]
    NonPositiveAmount { product_id: ProductId, amount: i64 },
}

/// A shopping cart: an ordered sequence of items, at most one per product.
///
/// Serializes as the bare JSON array of items. Deserialization re-checks the
/// invariants, so a persisted array with a duplicate id or a zero amount is
/// rejected like any other malformed value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, checking the invariants.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, InvariantViolation> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount < 1 {
                return Err(InvariantViolation::NonPositiveAmount {
                    product_id: item.id(),
                    amount: item.amount,
                });
            }
            if !seen.insert(item.id()) {
                return Err(InvariantViolation::DuplicateProduct(item.id()));
            }
        }
        Ok(Self { items })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the entry for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Check if the product has an entry.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Quantity of a product, if present.
    pub fn amount_of(&self, product_id: ProductId) -> Option<i64> {
        self.get(product_id).map(|i| i.amount)
    }

    /// Sum of all quantities.
    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Quantity per product, for listings that badge each product.
    pub fn amounts(&self) -> BTreeMap<ProductId, i64> {
        self.items.iter().map(|i| (i.id(), i.amount)).collect()
    }

    pub(crate) fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == product_id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<CartItem> {
        &mut self.items
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = InvariantViolation;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A product line in the cart.
///
/// Serializes as the product fields with `amount` alongside them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// The product as returned by the catalog when it was first added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always at least one.
    pub amount: i64,
}

impl CartItem {
    /// Create a new cart item.
    pub fn new(product: Product, amount: i64) -> Self {
        Self { product, amount }
    }

    /// Product ID.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}
