use serde::{Deserialize, Serialize};

use vendora_core::{CoreError, CoreResult, ProductId};
use vendora_orders::{OrderTotals, PaymentMethod, ShippingAddress};

/// One requested line of a placement. Quantity is taken from the request;
/// name, vendor, and unit price are snapshotted from the catalog at
/// reservation time, never from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A checkout submission: the cart snapshot plus shipping/payment inputs and
/// caller-computed totals. Payment confirmation is an external collaborator
/// and is assumed settled by the time this request is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub lines: Vec<RequestedLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
}

impl PlacementRequest {
    /// Up-front validation; runs before any mutation so a rejection here has
    /// no side effects.
    pub fn validate(&self) -> CoreResult<()> {
        if self.lines.is_empty() {
            return Err(CoreError::validation("order must contain at least one item"));
        }
        if self.lines.iter().any(|l| l.quantity == 0) {
            return Err(CoreError::validation("item quantity must be at least 1"));
        }
        Ok(())
    }
}
