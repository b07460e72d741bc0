use serde::{Deserialize, Serialize};

use vendora_core::UserId;

use crate::role::Role;

/// Identity of an authenticated actor, as resolved by the upstream
/// identity collaborator.
///
/// Construction is decoupled from transport: the API layer derives this from
/// trusted request metadata, tests build it directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn vendor(user_id: UserId) -> Self {
        Self::new(user_id, Role::Vendor)
    }

    pub fn customer(user_id: UserId) -> Self {
        Self::new(user_id, Role::Customer)
    }
}
