use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{CoreError, CoreResult, Money, OrderId, ProductId, UserId};

/// Order status lifecycle.
///
/// `pending → processing | shipped | delivered`,
/// `processing → shipped | delivered`, `shipped → delivered`.
/// `delivered` and `cancelled` are terminal. `cancelled` is only reachable
/// through [`Order::cancel`], never through a status update, so the stock
/// release tied to cancellation happens exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Legal `update_status` targets. Cancellation is not one of them.
    fn allows_update_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            // `pending` is entered only at creation; `cancelled` only via cancel.
            OrderStatus::Pending | OrderStatus::Cancelled => false,
            // A shipped order cannot go back to processing.
            OrderStatus::Processing => matches!(self, OrderStatus::Pending | OrderStatus::Processing),
            // Re-asserting the current state is allowed (tracking-number updates).
            OrderStatus::Shipped | OrderStatus::Delivered => true,
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of a product at order-creation time. Never altered,
/// even if the underlying product later changes price or is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub vendor_id: UserId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    Stripe,
}

/// Caller-computed totals, stored verbatim on the order snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

/// Input for order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: UserId,
    pub lines: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
}

/// A placed order. Lines from multiple vendors may coexist; vendor-scoped
/// views filter by line `vendor_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub lines: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Validate and materialize a new order in `pending`.
    pub fn create(new: NewOrder, now: DateTime<Utc>) -> CoreResult<Self> {
        if new.lines.is_empty() {
            return Err(CoreError::validation("order must contain at least one line"));
        }
        if new.lines.iter().any(|l| l.quantity == 0) {
            return Err(CoreError::validation("line quantity must be at least 1"));
        }

        Ok(Self {
            id: OrderId::new(),
            customer_id: new.customer_id,
            lines: new.lines,
            shipping_address: new.shipping_address,
            payment_method: new.payment_method,
            totals: new.totals,
            status: OrderStatus::Pending,
            tracking_number: None,
            cancellation_reason: None,
            created_at: now,
            delivered_at: None,
            cancelled_at: None,
        })
    }

    /// Apply a vendor/admin status update. Entering `delivered` stamps
    /// `delivered_at`.
    pub fn apply_status(
        &mut self,
        next: OrderStatus,
        tracking_number: Option<String>,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        if !self.status.allows_update_to(next) {
            return Err(CoreError::invalid_transition(
                self.status.as_str(),
                next.as_str(),
            ));
        }

        self.status = next;
        if next == OrderStatus::Delivered && self.delivered_at.is_none() {
            self.delivered_at = Some(now);
        }
        if let Some(tracking) = tracking_number {
            self.tracking_number = Some(tracking);
        }
        Ok(())
    }

    /// Cancel the order. Legal only from `pending` or `processing`.
    pub fn cancel(&mut self, reason: Option<String>, now: DateTime<Utc>) -> CoreResult<()> {
        if !matches!(self.status, OrderStatus::Pending | OrderStatus::Processing) {
            return Err(CoreError::invalid_transition(
                self.status.as_str(),
                OrderStatus::Cancelled.as_str(),
            ));
        }

        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.cancellation_reason =
            Some(reason.unwrap_or_else(|| "cancelled by customer".to_string()));
        Ok(())
    }

    /// Distinct vendors owning at least one line.
    pub fn vendor_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.lines.iter().map(|l| l.vendor_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn has_vendor(&self, vendor_id: UserId) -> bool {
        self.lines.iter().any(|l| l.vendor_id == vendor_id)
    }

    pub fn lines_for_vendor(&self, vendor_id: UserId) -> Vec<OrderLine> {
        self.lines
            .iter()
            .filter(|l| l.vendor_id == vendor_id)
            .cloned()
            .collect()
    }

    /// Subtotal over the vendor's own lines only.
    pub fn vendor_subtotal(&self, vendor_id: UserId) -> Money {
        self.lines
            .iter()
            .filter(|l| l.vendor_id == vendor_id)
            .map(OrderLine::line_total)
            .sum()
    }
}
