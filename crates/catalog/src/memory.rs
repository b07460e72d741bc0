use std::collections::HashMap;
use std::sync::RwLock;

use vendora_core::{CoreError, CoreResult, ProductId};

use crate::ledger::{ProductCatalog, ProductSnapshot, StockLedger};
use crate::product::Product;

/// In-memory catalog + ledger.
///
/// One lock over the product map; a reservation performs its
/// check-and-decrement (and snapshot capture) inside a single write-lock
/// critical section, so no other caller observes an intermediate state.
/// A poisoned lock surfaces as `StorageUnavailable`.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn get(&self, product_id: ProductId) -> CoreResult<Product> {
        let products = self
            .products
            .read()
            .map_err(|_| CoreError::storage("catalog lock poisoned"))?;

        products
            .get(&product_id)
            .cloned()
            .ok_or(CoreError::not_found("product"))
    }

    fn insert(&self, product: Product) -> CoreResult<()> {
        let mut products = self
            .products
            .write()
            .map_err(|_| CoreError::storage("catalog lock poisoned"))?;

        products.insert(product.id, product);
        Ok(())
    }

    fn set_active(&self, product_id: ProductId, is_active: bool) -> CoreResult<Product> {
        let mut products = self
            .products
            .write()
            .map_err(|_| CoreError::storage("catalog lock poisoned"))?;

        let product = products
            .get_mut(&product_id)
            .ok_or(CoreError::not_found("product"))?;
        product.is_active = is_active;
        Ok(product.clone())
    }
}

impl StockLedger for InMemoryCatalog {
    fn try_reserve(&self, product_id: ProductId, quantity: u32) -> CoreResult<ProductSnapshot> {
        if quantity == 0 {
            return Err(CoreError::validation("reservation quantity must be positive"));
        }

        let mut products = self
            .products
            .write()
            .map_err(|_| CoreError::storage("catalog lock poisoned"))?;

        let product = products
            .get_mut(&product_id)
            .ok_or(CoreError::not_found("product"))?;

        if !product.can_be_sold() {
            return Err(CoreError::ProductInactive(product_id));
        }

        if product.stock < quantity {
            return Err(CoreError::InsufficientStock {
                product_id,
                requested: quantity,
                available: product.stock,
            });
        }

        product.stock -= quantity;

        tracing::debug!(
            product_id = %product_id,
            quantity,
            remaining = product.stock,
            "stock reserved"
        );

        Ok(ProductSnapshot {
            product_id,
            vendor_id: product.vendor_id,
            name: product.name.clone(),
            unit_price: product.price,
        })
    }

    fn release(&self, product_id: ProductId, quantity: u32) -> CoreResult<()> {
        let mut products = self
            .products
            .write()
            .map_err(|_| CoreError::storage("catalog lock poisoned"))?;

        let product = products
            .get_mut(&product_id)
            .ok_or(CoreError::not_found("product"))?;

        product.stock = product.stock.saturating_add(quantity);

        tracing::debug!(
            product_id = %product_id,
            quantity,
            stock = product.stock,
            "stock released"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use vendora_core::{Money, UserId};

    use super::*;

    fn seeded(stock: u32) -> (InMemoryCatalog, ProductId) {
        let catalog = InMemoryCatalog::new();
        let product =
            Product::new(UserId::new(), "Denim Jacket", Money::from_cents(4500), stock).unwrap();
        let id = product.id;
        catalog.insert(product).unwrap();
        (catalog, id)
    }

    #[test]
    fn reserve_decrements_and_snapshots() {
        let (catalog, id) = seeded(5);

        let snapshot = catalog.try_reserve(id, 2).unwrap();
        assert_eq!(snapshot.unit_price, Money::from_cents(4500));
        assert_eq!(snapshot.name, "Denim Jacket");
        assert_eq!(catalog.get(id).unwrap().stock, 3);
    }

    #[test]
    fn reserve_more_than_available_fails_with_availability() {
        let (catalog, id) = seeded(3);

        let err = catalog.try_reserve(id, 4).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: id,
                requested: 4,
                available: 3,
            }
        );
        // Failed reservation must not touch stock.
        assert_eq!(catalog.get(id).unwrap().stock, 3);
    }

    #[test]
    fn inactive_product_cannot_be_reserved() {
        let (catalog, id) = seeded(3);
        catalog.set_active(id, false).unwrap();

        assert_eq!(
            catalog.try_reserve(id, 1).unwrap_err(),
            CoreError::ProductInactive(id)
        );
    }

    #[test]
    fn unknown_product_is_not_found() {
        let catalog = InMemoryCatalog::new();
        assert_eq!(
            catalog.try_reserve(ProductId::new(), 1).unwrap_err(),
            CoreError::not_found("product")
        );
    }

    #[test]
    fn zero_quantity_is_rejected_before_lookup() {
        let catalog = InMemoryCatalog::new();
        assert!(matches!(
            catalog.try_reserve(ProductId::new(), 0).unwrap_err(),
            CoreError::Validation(_)
        ));
    }

    #[test]
    fn release_restores_stock() {
        let (catalog, id) = seeded(10);
        catalog.try_reserve(id, 4).unwrap();
        catalog.release(id, 4).unwrap();
        assert_eq!(catalog.get(id).unwrap().stock, 10);
    }

    /// Spec property: K concurrent attempts whose quantities sum past the
    /// available stock: exactly the attempts that fit succeed, final stock
    /// is `initial - sum(successful)`, never negative.
    #[test]
    fn concurrent_reservations_never_oversell() {
        const INITIAL: u32 = 50;
        const THREADS: usize = 16;
        const PER_THREAD: u32 = 7; // 16 * 7 = 112 requested, only 50 available

        let (catalog, id) = seeded(INITIAL);
        let catalog = Arc::new(catalog);

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.try_reserve(id, PER_THREAD).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&succeeded| succeeded)
            .count() as u32;

        let remaining = catalog.get(id).unwrap().stock;
        assert_eq!(remaining, INITIAL - successes * PER_THREAD);
        // Every attempt that still fit must have succeeded.
        assert!(remaining < PER_THREAD, "remaining {remaining} would fit another attempt");
    }

    proptest! {
        /// Any sequence of reserves and releases keeps stock consistent:
        /// stock tracks the successful operations exactly and reserves
        /// beyond the current level always fail.
        #[test]
        fn reserve_release_sequences_track_stock(
            initial in 0u32..200,
            ops in prop::collection::vec((any::<bool>(), 1u32..20), 0..40),
        ) {
            let (catalog, id) = seeded(initial);
            let mut expected = initial;

            for (is_reserve, qty) in ops {
                if is_reserve {
                    match catalog.try_reserve(id, qty) {
                        Ok(_) => {
                            prop_assert!(expected >= qty);
                            expected -= qty;
                        }
                        Err(CoreError::InsufficientStock { available, .. }) => {
                            prop_assert_eq!(available, expected);
                            prop_assert!(expected < qty);
                        }
                        Err(e) => return Err(TestCaseError::fail(format!("unexpected: {e}"))),
                    }
                } else {
                    catalog.release(id, qty).unwrap();
                    expected = expected.saturating_add(qty);
                }
                prop_assert_eq!(catalog.get(id).unwrap().stock, expected);
            }
        }
    }
}
