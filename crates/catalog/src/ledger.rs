//! Catalog lookup and atomic stock mutation contracts.

use vendora_core::{CoreResult, Money, ProductId, UserId};

use crate::product::Product;

/// Read-time snapshot of a product, captured by [`StockLedger::try_reserve`]
/// in the same critical section as the stock decrement.
///
/// Order lines are built from this snapshot, so a later price change or
/// deletion never alters an existing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub vendor_id: UserId,
    pub name: String,
    pub unit_price: Money,
}

/// Product lookup (the catalog side; stock excluded from mutation).
pub trait ProductCatalog: Send + Sync {
    /// Fetch a product by id. `NotFound` if absent.
    fn get(&self, product_id: ProductId) -> CoreResult<Product>;

    /// Insert a new product (vendor/admin path).
    fn insert(&self, product: Product) -> CoreResult<()>;

    /// Flip the active flag (vendor/admin path). Returns the updated record.
    fn set_active(&self, product_id: ProductId, is_active: bool) -> CoreResult<Product>;
}

/// Atomic per-product stock operations.
///
/// ## Reserve semantics
///
/// `try_reserve` must read the current stock and, only if
/// `stock >= quantity` and the product is active, decrement it **in the same
/// atomic step**, with no read-modify-write window visible to another caller.
/// Under N concurrent attempts against one product the outcome is some
/// serialization of the attempts: final stock equals
/// `initial - sum(successful reservations)` and is never negative.
///
/// ## Release semantics
///
/// `release` is an unconditional atomic increment used for cancellation and
/// for rolling back partially reserved placements. The ledger enforces no
/// upper bound; callers must not release more than they reserved.
pub trait StockLedger: Send + Sync {
    fn try_reserve(&self, product_id: ProductId, quantity: u32) -> CoreResult<ProductSnapshot>;

    fn release(&self, product_id: ProductId, quantity: u32) -> CoreResult<()>;
}

impl<T> ProductCatalog for std::sync::Arc<T>
where
    T: ProductCatalog + ?Sized,
{
    fn get(&self, product_id: ProductId) -> CoreResult<Product> {
        (**self).get(product_id)
    }

    fn insert(&self, product: Product) -> CoreResult<()> {
        (**self).insert(product)
    }

    fn set_active(&self, product_id: ProductId, is_active: bool) -> CoreResult<Product> {
        (**self).set_active(product_id, is_active)
    }
}

impl<T> StockLedger for std::sync::Arc<T>
where
    T: StockLedger + ?Sized,
{
    fn try_reserve(&self, product_id: ProductId, quantity: u32) -> CoreResult<ProductSnapshot> {
        (**self).try_reserve(product_id, quantity)
    }

    fn release(&self, product_id: ProductId, quantity: u32) -> CoreResult<()> {
        (**self).release(product_id, quantity)
    }
}
