//! Order aggregate and store.
//!
//! Orders are created once, atomically, and never deleted. After creation
//! only `status`, `tracking_number`, `cancellation_reason`, and the
//! timestamps may change, and only through the defined transitions.

pub mod order;
pub mod store;

pub use order::{
    NewOrder, Order, OrderLine, OrderStatus, OrderTotals, PaymentMethod, ShippingAddress,
};
pub use store::{
    AdminOrderFilter, AdminOrderReport, InMemoryOrderStore, OrderStats, OrderStore,
    VendorOrderView,
};
