//! Shared domain primitives.
//!
//! This crate contains **pure domain** building blocks (no infrastructure
//! concerns): typed identifiers, money, and the error taxonomy shared by
//! every store and the checkout orchestrator.

pub mod error;
pub mod id;
pub mod money;

pub use error::{CoreError, CoreResult};
pub use id::{OrderId, ProductId, UserId};
pub use money::Money;
