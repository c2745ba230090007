//! Pure cart transitions.
//!
//! [`apply`] computes the next cart from the current one and a validated
//! operation. It performs no I/O; the store supplies the stock it observed
//! and commits the result.

use crate::cart::{Cart, CartItem};
use crate::catalog::{Product, StockInfo};
use crate::error::CartError;
use crate::ids::ProductId;

/// A cart mutation together with the stock observed for it.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOp {
    /// Append the product with amount 1, or bump an existing entry by one.
    Insert { product: Product, stock: StockInfo },
    /// Bump an existing entry by one.
    Increment {
        product_id: ProductId,
        stock: StockInfo,
    },
    /// Replace the amount of an existing entry.
    SetAmount {
        product_id: ProductId,
        amount: i64,
        stock: StockInfo,
    },
    /// Drop an existing entry.
    Remove { product_id: ProductId },
}

impl CartOp {
    /// Product the operation targets.
    pub fn product_id(&self) -> ProductId {
        match self {
            CartOp::Insert { product, .. } => product.id,
            CartOp::Increment { product_id, .. }
            | CartOp::SetAmount { product_id, .. }
            | CartOp::Remove { product_id } => *product_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CartOp::Insert { .. } => "insert",
            CartOp::Increment { .. } => "increment",
            CartOp::SetAmount { .. } => "set_amount",
            CartOp::Remove { .. } => "remove",
        }
    }
}

/// Compute the cart that results from `op`.
///
/// Never yields a cart with a duplicate product or an amount below one.
/// A `SetAmount` below one returns the cart unchanged.
pub fn apply(cart: &Cart, op: &CartOp) -> Result<Cart, CartError> {
    match op {
        CartOp::Insert { product, stock } => match cart.position(product.id) {
            Some(index) => increment_at(cart, index, stock),
            None => {
                if !stock.is_available() {
                    return Err(CartError::OutOfStock {
                        product_id: product.id,
                    });
                }
                let mut next = cart.clone();
                next.items_mut().push(CartItem::new(product.clone(), 1));
                Ok(next)
            }
        },

        CartOp::Increment { product_id, stock } => {
            let index = cart
                .position(*product_id)
                .ok_or(CartError::ProductNotInCart(*product_id))?;
            increment_at(cart, index, stock)
        }

        CartOp::SetAmount {
            product_id,
            amount,
            stock,
        } => {
            if *amount < 1 {
                return Ok(cart.clone());
            }
            if !stock.can_fulfill(*amount) {
                return Err(CartError::InsufficientStock {
                    product_id: *product_id,
                    requested: *amount,
                    available: stock.amount,
                });
            }
            let index = cart
                .position(*product_id)
                .ok_or(CartError::ProductNotInCart(*product_id))?;

            let mut next = cart.clone();
            if let Some(item) = next.items_mut().get_mut(index) {
                item.amount = *amount;
            }
            Ok(next)
        }

        CartOp::Remove { product_id } => {
            if !cart.contains(*product_id) {
                return Err(CartError::ProductNotInCart(*product_id));
            }
            let mut next = cart.clone();
            next.items_mut().retain(|i| i.id() != *product_id);
            Ok(next)
        }
    }
}

fn increment_at(cart: &Cart, index: usize, stock: &StockInfo) -> Result<Cart, CartError> {
    let mut next = cart.clone();
    let Some(item) = next.items_mut().get_mut(index) else {
        return Err(CartError::ProductNotInCart(stock.id));
    };
    let wanted = item.amount.saturating_add(1);
    if !stock.can_fulfill(wanted) {
        return Err(CartError::OutOfStock {
            product_id: item.id(),
        });
    }
    item.amount = wanted;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product::new(ProductId::new(id), format!("Shoe {}", id), 139.9, "shoe.jpg")
    }

    fn stock(id: u64, amount: i64) -> StockInfo {
        StockInfo::new(ProductId::new(id), amount)
    }

    fn cart_of(entries: &[(u64, i64)]) -> Cart {
        Cart::from_items(
            entries
                .iter()
                .map(|&(id, amount)| CartItem::new(product(id), amount))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_into_empty_cart() {
        let next = apply(
            &Cart::new(),
            &CartOp::Insert {
                product: product(1),
                stock: stock(1, 5),
            },
        )
        .unwrap();

        assert_eq!(next.len(), 1);
        assert_eq!(next.amount_of(ProductId::new(1)), Some(1));
    }

    #[test]
    fn test_insert_existing_increments_instead_of_appending() {
        let cart = cart_of(&[(1, 1), (2, 1)]);
        let next = apply(
            &cart,
            &CartOp::Insert {
                product: product(1),
                stock: stock(1, 5),
            },
        )
        .unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next.amount_of(ProductId::new(1)), Some(2));
    }

    #[test]
    fn test_insert_without_stock() {
        let result = apply(
            &Cart::new(),
            &CartOp::Insert {
                product: product(1),
                stock: stock(1, 0),
            },
        );
        assert_eq!(
            result,
            Err(CartError::OutOfStock {
                product_id: ProductId::new(1)
            })
        );
    }

    #[test]
    fn test_increment_bounded_by_stock() {
        let cart = cart_of(&[(1, 1)]);
        let op = CartOp::Increment {
            product_id: ProductId::new(1),
            stock: stock(1, 1),
        };
        assert_eq!(
            apply(&cart, &op),
            Err(CartError::OutOfStock {
                product_id: ProductId::new(1)
            })
        );

        let op = CartOp::Increment {
            product_id: ProductId::new(1),
            stock: stock(1, 2),
        };
        assert_eq!(apply(&cart, &op).unwrap().amount_of(ProductId::new(1)), Some(2));
    }

    #[test]
    fn test_increment_missing_product() {
        let op = CartOp::Increment {
            product_id: ProductId::new(1),
            stock: stock(1, 10),
        };
        assert_eq!(
            apply(&Cart::new(), &op),
            Err(CartError::ProductNotInCart(ProductId::new(1)))
        );
    }

    #[test]
    fn test_set_amount_preserves_position() {
        let cart = cart_of(&[(1, 1), (2, 1), (3, 1)]);
        let next = apply(
            &cart,
            &CartOp::SetAmount {
                product_id: ProductId::new(2),
                amount: 4,
                stock: stock(2, 4),
            },
        )
        .unwrap();

        let entries: Vec<(u64, i64)> = next.iter().map(|i| (i.id().get(), i.amount)).collect();
        assert_eq!(entries, vec![(1, 1), (2, 4), (3, 1)]);
    }

    #[test]
    fn test_set_amount_checks_stock_before_membership() {
        let result = apply(
            &Cart::new(),
            &CartOp::SetAmount {
                product_id: ProductId::new(1),
                amount: 3,
                stock: stock(1, 2),
            },
        );
        assert_eq!(
            result,
            Err(CartError::InsufficientStock {
                product_id: ProductId::new(1),
                requested: 3,
                available: 2,
            })
        );

        let result = apply(
            &Cart::new(),
            &CartOp::SetAmount {
                product_id: ProductId::new(1),
                amount: 2,
                stock: stock(1, 2),
            },
        );
        assert_eq!(result, Err(CartError::ProductNotInCart(ProductId::new(1))));
    }

    #[test]
    fn test_set_amount_below_one_is_noop() {
        let cart = cart_of(&[(1, 2)]);
        for amount in [0, -3] {
            let next = apply(
                &cart,
                &CartOp::SetAmount {
                    product_id: ProductId::new(1),
                    amount,
                    stock: stock(1, 10),
                },
            )
            .unwrap();
            assert_eq!(next, cart);
        }
    }

    #[test]
    fn test_remove_keeps_others_in_order() {
        let cart = cart_of(&[(1, 1), (2, 2), (3, 3)]);
        let next = apply(
            &cart,
            &CartOp::Remove {
                product_id: ProductId::new(2),
            },
        )
        .unwrap();

        let entries: Vec<(u64, i64)> = next.iter().map(|i| (i.id().get(), i.amount)).collect();
        assert_eq!(entries, vec![(1, 1), (3, 3)]);
    }

    #[test]
    fn test_remove_missing_product() {
        let result = apply(
            &cart_of(&[(1, 1)]),
            &CartOp::Remove {
                product_id: ProductId::new(2),
            },
        );
        assert_eq!(result, Err(CartError::ProductNotInCart(ProductId::new(2))));
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let cart = cart_of(&[(1, 1)]);
        let _ = apply(
            &cart,
            &CartOp::Remove {
                product_id: ProductId::new(1),
            },
        )
        .unwrap();
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(1));
    }
}
