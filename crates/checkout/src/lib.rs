//! Order placement orchestration.
//!
//! Converting a cart into a durable order is a saga over independent
//! per-product atomic operations: reserve stock line by line, write the
//! order, clear the cart, with explicit compensation (releasing
//! reservations in reverse) when any forward step fails. Partial failure is
//! a first-class, tested code path here, not an accident.

pub mod placement;
pub mod storefront;

pub use placement::{PlacementRequest, RequestedLine};
pub use storefront::Storefront;
