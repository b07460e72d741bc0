//! Customer carts.
//!
//! One mutable line list per customer, created lazily on first add, mutated
//! by the owning customer only. Stock is deliberately NOT enforced here,
//! only at checkout.

pub mod cart;
pub mod store;

pub use cart::{Cart, CartLine, LineKey, NewCartLine};
pub use store::{CartStore, InMemoryCartStore};
