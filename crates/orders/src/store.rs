use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{CoreError, CoreResult, Money, OrderId, UserId};

use crate::order::{NewOrder, Order, OrderLine, OrderStatus};

/// A vendor's view of a shared order: only their lines, and a subtotal
/// computed from those lines alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOrderView {
    pub order_id: OrderId,
    pub customer_id: UserId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    pub vendor_subtotal: Money,
}

/// Administrative report filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminOrderFilter {
    pub status: Option<OrderStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Aggregates over the *unfiltered* full line set of each matching order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_revenue: Money,
    pub pending_orders: usize,
    pub processing_orders: usize,
    pub shipped_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrderReport {
    pub orders: Vec<Order>,
    pub stats: OrderStats,
}

/// Order persistence boundary.
///
/// Status transitions are evaluated atomically against the stored status:
/// when a cancel races a status update on the same order, exactly one state
/// change reaches a terminal state and the loser observes
/// `InvalidTransition`, never silent corruption.
pub trait OrderStore: Send + Sync {
    /// Single atomic append; assigns the id and `created_at`, status starts
    /// `pending`. `Validation` on empty lines or a zero quantity.
    fn create(&self, new: NewOrder) -> CoreResult<Order>;

    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> CoreResult<Order>;

    /// Transition to `cancelled` (only from `pending`/`processing`).
    /// The caller owns releasing reserved stock afterwards.
    fn cancel(&self, order_id: OrderId, reason: Option<String>) -> CoreResult<Order>;

    fn by_id(&self, order_id: OrderId) -> CoreResult<Order>;

    /// Customer's orders, newest first.
    fn by_customer(&self, customer_id: UserId) -> CoreResult<Vec<Order>>;

    /// Orders containing at least one line for the vendor, newest first,
    /// line lists filtered to that vendor.
    fn by_vendor(&self, vendor_id: UserId) -> CoreResult<Vec<VendorOrderView>>;

    /// Administrative listing + aggregate stats.
    fn report(&self, filter: &AdminOrderFilter) -> CoreResult<AdminOrderReport>;
}

impl<T> OrderStore for std::sync::Arc<T>
where
    T: OrderStore + ?Sized,
{
    fn create(&self, new: NewOrder) -> CoreResult<Order> {
        (**self).create(new)
    }

    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> CoreResult<Order> {
        (**self).update_status(order_id, status, tracking_number)
    }

    fn cancel(&self, order_id: OrderId, reason: Option<String>) -> CoreResult<Order> {
        (**self).cancel(order_id, reason)
    }

    fn by_id(&self, order_id: OrderId) -> CoreResult<Order> {
        (**self).by_id(order_id)
    }

    fn by_customer(&self, customer_id: UserId) -> CoreResult<Vec<Order>> {
        (**self).by_customer(customer_id)
    }

    fn by_vendor(&self, vendor_id: UserId) -> CoreResult<Vec<VendorOrderView>> {
        (**self).by_vendor(vendor_id)
    }

    fn report(&self, filter: &AdminOrderFilter) -> CoreResult<AdminOrderReport> {
        (**self).report(filter)
    }
}

/// In-memory order store. Transitions re-check the stored status under the
/// write lock; a poisoned lock surfaces as `StorageUnavailable`.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, new: NewOrder) -> CoreResult<Order> {
        let order = Order::create(new, Utc::now())?;

        let mut orders = self
            .orders
            .write()
            .map_err(|_| CoreError::storage("order lock poisoned"))?;
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = %order.id, customer_id = %order.customer_id, "order created");
        Ok(order)
    }

    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> CoreResult<Order> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| CoreError::storage("order lock poisoned"))?;

        let order = orders.get_mut(&order_id).ok_or(CoreError::not_found("order"))?;
        order.apply_status(status, tracking_number, Utc::now())?;

        tracing::info!(order_id = %order_id, status = %status, "order status updated");
        Ok(order.clone())
    }

    fn cancel(&self, order_id: OrderId, reason: Option<String>) -> CoreResult<Order> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| CoreError::storage("order lock poisoned"))?;

        let order = orders.get_mut(&order_id).ok_or(CoreError::not_found("order"))?;
        order.cancel(reason, Utc::now())?;

        tracing::info!(order_id = %order_id, "order cancelled");
        Ok(order.clone())
    }

    fn by_id(&self, order_id: OrderId) -> CoreResult<Order> {
        let orders = self
            .orders
            .read()
            .map_err(|_| CoreError::storage("order lock poisoned"))?;

        orders
            .get(&order_id)
            .cloned()
            .ok_or(CoreError::not_found("order"))
    }

    fn by_customer(&self, customer_id: UserId) -> CoreResult<Vec<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|_| CoreError::storage("order lock poisoned"))?;

        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn by_vendor(&self, vendor_id: UserId) -> CoreResult<Vec<VendorOrderView>> {
        let orders = self
            .orders
            .read()
            .map_err(|_| CoreError::storage("order lock poisoned"))?;

        let mut result: Vec<VendorOrderView> = orders
            .values()
            .filter(|o| o.has_vendor(vendor_id))
            .map(|o| VendorOrderView {
                order_id: o.id,
                customer_id: o.customer_id,
                status: o.status,
                created_at: o.created_at,
                lines: o.lines_for_vendor(vendor_id),
                vendor_subtotal: o.vendor_subtotal(vendor_id),
            })
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn report(&self, filter: &AdminOrderFilter) -> CoreResult<AdminOrderReport> {
        let orders = self
            .orders
            .read()
            .map_err(|_| CoreError::storage("order lock poisoned"))?;

        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| filter.start_date.is_none_or(|d| o.created_at >= d))
            .filter(|o| filter.end_date.is_none_or(|d| o.created_at <= d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut stats = OrderStats {
            total_orders: matching.len(),
            ..OrderStats::default()
        };
        for order in &matching {
            stats.total_revenue = stats.total_revenue + order.totals.total;
            match order.status {
                OrderStatus::Pending => stats.pending_orders += 1,
                OrderStatus::Processing => stats.processing_orders += 1,
                OrderStatus::Shipped => stats.shipped_orders += 1,
                OrderStatus::Delivered => stats.delivered_orders += 1,
                OrderStatus::Cancelled => stats.cancelled_orders += 1,
            }
        }

        Ok(AdminOrderReport {
            orders: matching,
            stats,
        })
    }
}
