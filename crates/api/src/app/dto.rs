use chrono::{DateTime, Utc};
use serde::Deserialize;

use vendora_core::{Money, ProductId};
use vendora_orders::{OrderStatus, OrderTotals, PaymentMethod, ShippingAddress};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct PlaceOrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub lines: Vec<PlaceOrderLineRequest>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelOrderRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub product_id: ProductId,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    /// Price in cents.
    pub price: Money,
    pub stock: u32,
}

/// Query parameters for the admin order report.
#[derive(Debug, Default, Deserialize)]
pub struct AdminOrdersQuery {
    pub status: Option<OrderStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
