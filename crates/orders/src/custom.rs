//! Ad-hoc custom items, stored per title.

use serde::{Deserialize, Serialize};

use printdesk_core::{CustomItemId, DomainError, DomainResult, Money};

/// Unvalidated custom-item input, as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomItemDraft {
    pub name: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: Money,
}

/// A validated custom item. Its id links it to the line item it is
/// materialized into, so deleting either removes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomItem {
    pub id: CustomItemId,
    pub name: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: Money,
}

impl CustomItemDraft {
    pub fn validate(self) -> DomainResult<CustomItem> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("custom item name cannot be empty"));
        }
        if self.quantity <= 0.0 {
            return Err(DomainError::validation("custom item quantity must be positive"));
        }
        if !self.unit_price.is_positive() {
            return Err(DomainError::validation("custom item price must be positive"));
        }
        Ok(CustomItem {
            id: CustomItemId::new(),
            name,
            description: self.description.trim().to_string(),
            quantity: self.quantity,
            unit_price: self.unit_price,
        })
    }
}
