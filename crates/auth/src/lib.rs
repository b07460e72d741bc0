//! Pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Identity
//! issuance (login, tokens) is an external collaborator; the core consumes a
//! resolved [`Principal`] and nothing else.

pub mod policy;
pub mod principal;
pub mod role;

pub use policy::{
    authorize_admin, authorize_order, authorize_product, OrderAction, OrderResource, ProductAction,
};
pub use principal::Principal;
pub use role::Role;
