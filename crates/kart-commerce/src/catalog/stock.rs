//! Stock level reported by the inventory service.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Purchasable quantity of a product at lookup time.
///
/// Never cached: every cart mutation fetches a fresh value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockInfo {
    /// Product the level belongs to.
    pub id: ProductId,
    /// Maximum quantity that can be purchased. Zero or negative means none.
    pub amount: i64,
}

impl StockInfo {
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if at least one unit is purchasable.
    pub fn is_available(&self) -> bool {
        self.amount >= 1
    }

    /// Check if a total of `quantity` units can be purchased.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.amount >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_availability() {
        let stock = StockInfo::new(ProductId::new(1), 3);
        assert!(stock.is_available());
        assert!(stock.can_fulfill(3));
        assert!(!stock.can_fulfill(4));
    }

    #[test]
    fn test_empty_stock() {
        assert!(!StockInfo::new(ProductId::new(1), 0).is_available());
        assert!(!StockInfo::new(ProductId::new(1), -2).is_available());
    }
}
