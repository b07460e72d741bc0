use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{CoreError, CoreResult, Money, ProductId, UserId};

/// Identity of a cart line: the same product in a different size or color is
/// a separate line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

/// A line in a customer's cart. `unit_price` is a snapshot taken at
/// add-time; the authoritative price is re-read at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub unit_price: Money,
}

impl CartLine {
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            selected_size: self.selected_size.clone(),
            selected_color: self.selected_color.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id
            && self.selected_size == key.selected_size
            && self.selected_color == key.selected_color
    }
}

/// Input for an add-or-merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub unit_price: Money,
}

/// A customer's cart. Cleared (not deleted) on successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub owner_id: UserId,
    pub lines: Vec<CartLine>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn empty(owner_id: UserId) -> Self {
        Self {
            owner_id,
            lines: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .map(|l| l.unit_price.times(l.quantity))
            .sum()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Merge quantity into an existing line with the same key, else append.
    pub fn add_or_merge(&mut self, new: NewCartLine) -> CoreResult<()> {
        if new.quantity == 0 {
            return Err(CoreError::validation("quantity must be at least 1"));
        }

        let key = LineKey {
            product_id: new.product_id,
            selected_size: new.selected_size.clone(),
            selected_color: new.selected_color.clone(),
        };

        match self.lines.iter_mut().find(|l| l.matches(&key)) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(new.quantity);
            }
            None => self.lines.push(CartLine {
                product_id: new.product_id,
                quantity: new.quantity,
                selected_size: new.selected_size,
                selected_color: new.selected_color,
                unit_price: new.unit_price,
            }),
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Overwrite a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> CoreResult<()> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.matches(key))
            .ok_or(CoreError::not_found("cart line"))?;

        if quantity == 0 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity = quantity;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Empty the line list. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.updated_at = Utc::now();
    }
}
