//! Shared error taxonomy.
//!
//! Keep this focused on deterministic, caller-distinguishable failures.
//! Every variant maps to a stable outward status so callers can decide
//! whether to retry (`StorageUnavailable`), fix input (`Validation`,
//! `InsufficientStock`), or stop (`Forbidden`, `NotFound`,
//! `InvalidTransition`).

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain and store layers.
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed input (empty line list, non-positive quantity, bad id).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested resource is absent. Carries the resource kind for
    /// diagnostics ("product", "order", ...).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A reservation asked for more than the product has.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product exists but is not available for sale.
    #[error("product {0} is not available")]
    ProductInactive(ProductId),

    /// Access policy denial.
    #[error("forbidden")]
    Forbidden,

    /// An illegal order status change (including any exit from a terminal
    /// state).
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Transient storage failure; safe to retry.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound(what)
    }

    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// True for failures where a retry of the same call can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
