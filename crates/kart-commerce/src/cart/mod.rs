//! Shopping cart module.
//!
//! Contains the cart state types and the pure transition function the store
//! commits through.

mod cart;
pub mod reducer;

pub use cart::{Cart, CartItem, InvariantViolation};
pub use reducer::{apply, CartOp};
