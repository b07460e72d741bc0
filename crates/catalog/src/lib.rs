//! Product catalog and stock ledger.
//!
//! Stock is shared mutable state contended by concurrent buyers. The one
//! rule of this crate: stock is mutated **only** through [`StockLedger`]'s
//! atomic reserve/release operations; there is no plain get/set pair across
//! the mutation boundary.

pub mod ledger;
pub mod memory;
pub mod product;

pub use ledger::{ProductCatalog, ProductSnapshot, StockLedger};
pub use memory::InMemoryCatalog;
pub use product::Product;
