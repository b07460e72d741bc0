use std::collections::HashMap;
use std::sync::RwLock;

use vendora_core::{CoreError, CoreResult, UserId};

use crate::cart::{Cart, LineKey, NewCartLine};

/// Cart persistence boundary.
///
/// Mutations for one customer are serialized by the implementation; only the
/// owning customer writes their cart, so there is no cross-customer
/// contention to manage beyond that.
pub trait CartStore: Send + Sync {
    /// Returns the customer's cart, or an empty cart if none exists, never
    /// an error for an absent cart.
    fn get(&self, customer_id: UserId) -> CoreResult<Cart>;

    fn add_or_merge(&self, customer_id: UserId, line: NewCartLine) -> CoreResult<Cart>;

    fn set_quantity(&self, customer_id: UserId, key: &LineKey, quantity: u32) -> CoreResult<Cart>;

    /// Empty the customer's line list. Idempotent; absent carts are fine.
    fn clear(&self, customer_id: UserId) -> CoreResult<()>;
}

impl<T> CartStore for std::sync::Arc<T>
where
    T: CartStore + ?Sized,
{
    fn get(&self, customer_id: UserId) -> CoreResult<Cart> {
        (**self).get(customer_id)
    }

    fn add_or_merge(&self, customer_id: UserId, line: NewCartLine) -> CoreResult<Cart> {
        (**self).add_or_merge(customer_id, line)
    }

    fn set_quantity(&self, customer_id: UserId, key: &LineKey, quantity: u32) -> CoreResult<Cart> {
        (**self).set_quantity(customer_id, key, quantity)
    }

    fn clear(&self, customer_id: UserId) -> CoreResult<()> {
        (**self).clear(customer_id)
    }
}

/// In-memory cart store. Write-lock mutations serialize each customer's
/// cart; a poisoned lock surfaces as `StorageUnavailable`.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<UserId, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for InMemoryCartStore {
    fn get(&self, customer_id: UserId) -> CoreResult<Cart> {
        let carts = self
            .carts
            .read()
            .map_err(|_| CoreError::storage("cart lock poisoned"))?;

        Ok(carts
            .get(&customer_id)
            .cloned()
            .unwrap_or_else(|| Cart::empty(customer_id)))
    }

    fn add_or_merge(&self, customer_id: UserId, line: NewCartLine) -> CoreResult<Cart> {
        let mut carts = self
            .carts
            .write()
            .map_err(|_| CoreError::storage("cart lock poisoned"))?;

        let cart = carts
            .entry(customer_id)
            .or_insert_with(|| Cart::empty(customer_id));
        cart.add_or_merge(line)?;
        Ok(cart.clone())
    }

    fn set_quantity(&self, customer_id: UserId, key: &LineKey, quantity: u32) -> CoreResult<Cart> {
        let mut carts = self
            .carts
            .write()
            .map_err(|_| CoreError::storage("cart lock poisoned"))?;

        let cart = carts
            .get_mut(&customer_id)
            .ok_or(CoreError::not_found("cart"))?;
        cart.set_quantity(key, quantity)?;
        Ok(cart.clone())
    }

    fn clear(&self, customer_id: UserId) -> CoreResult<()> {
        let mut carts = self
            .carts
            .write()
            .map_err(|_| CoreError::storage("cart lock poisoned"))?;

        if let Some(cart) = carts.get_mut(&customer_id) {
            cart.clear();
        }
        Ok(())
    }
}
