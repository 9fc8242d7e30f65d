//! Order and order item types

use super::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line on an order; immutable once attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    /// Positive
    pub quantity: u32,
    /// Non-negative
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn new(menu_item_id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            quantity,
            unit_price,
        }
    }

    /// `unit_price * quantity`, saturating at `Decimal::MAX`
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A checked-out order for one outlet
///
/// Stored as one document per order in the `orders` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub outlet_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Saturates instead of overflowing; stored documents are not
    /// bounds-checked on read
    pub fn total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(OrderItem::line_total))
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }
}

/// Sum of amounts, saturating at `Decimal::MAX`
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Create order payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub outlet_id: String,
    pub items: Vec<OrderItem>,
}
