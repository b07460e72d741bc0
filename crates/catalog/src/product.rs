use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{CoreError, CoreResult, Money, ProductId, UserId};

/// A catalog product, owned by exactly one vendor.
///
/// `stock` is only ever changed through the ledger's reserve/release
/// operations; price, name, and active flag are vendor/admin edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub vendor_id: UserId,
    pub name: String,
    pub price: Money,
    pub stock: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        vendor_id: UserId,
        name: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id: ProductId::new(),
            vendor_id,
            name,
            price,
            stock,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    pub fn can_be_sold(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_is_active() {
        let p = Product::new(UserId::new(), "Linen Shirt", Money::from_cents(2000), 5).unwrap();
        assert!(p.is_active);
        assert_eq!(p.stock, 5);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Product::new(UserId::new(), "  ", Money::ZERO, 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
