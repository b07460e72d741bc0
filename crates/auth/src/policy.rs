//! Access policy decisions.
//!
//! One pure function per resource kind, consumed uniformly by every
//! operation instead of role conditionals scattered across handlers.
//!
//! - No IO
//! - No panics
//! - No business logic beyond the allow/deny table

use vendora_core::{CoreError, CoreResult, UserId};

use crate::principal::Principal;
use crate::role::Role;

/// Operations on an order record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Read,
    UpdateStatus,
    Cancel,
}

/// Operations on a product record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProductAction {
    Read,
    Write,
}

/// The ownership facts an order decision needs, detached from the full
/// aggregate so this crate stays storage-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResource<'a> {
    pub customer_id: UserId,
    /// Vendors owning at least one line of the order.
    pub vendor_ids: &'a [UserId],
}

impl OrderResource<'_> {
    fn has_vendor(&self, vendor: UserId) -> bool {
        self.vendor_ids.contains(&vendor)
    }
}

/// Decide whether `principal` may perform `action` on the given order.
pub fn authorize_order(
    principal: &Principal,
    action: OrderAction,
    resource: &OrderResource<'_>,
) -> CoreResult<()> {
    let allowed = match (principal.role, action) {
        (Role::Admin, _) => true,
        (Role::Customer, OrderAction::Read | OrderAction::Cancel) => {
            resource.customer_id == principal.user_id
        }
        (Role::Customer, OrderAction::UpdateStatus) => false,
        (Role::Vendor, OrderAction::Read | OrderAction::UpdateStatus) => {
            resource.has_vendor(principal.user_id)
        }
        (Role::Vendor, OrderAction::Cancel) => false,
    };

    if allowed { Ok(()) } else { Err(CoreError::Forbidden) }
}

/// Decide whether `principal` may perform `action` on a product owned by
/// `owner`.
pub fn authorize_product(
    principal: &Principal,
    action: ProductAction,
    owner: UserId,
) -> CoreResult<()> {
    let allowed = match (principal.role, action) {
        (_, ProductAction::Read) => true,
        (Role::Admin, ProductAction::Write) => true,
        (Role::Vendor, ProductAction::Write) => owner == principal.user_id,
        (Role::Customer, ProductAction::Write) => false,
    };

    if allowed { Ok(()) } else { Err(CoreError::Forbidden) }
}

/// Admin-only operations (reporting, full listings).
pub fn authorize_admin(principal: &Principal) -> CoreResult<()> {
    if principal.role == Role::Admin {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}
