use crate::utils::validation::{
    MAX_ID_LEN, validate_price, validate_quantity, validate_required_text,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{OrderCreate, OrderItem, saturating_sum};

/// A cart line; quantity stays mutable until checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item_id: String,
    /// Display name as shown on the menu
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl CartItem {
    pub fn new(
        menu_item_id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

impl From<CartItem> for OrderItem {
    fn from(item: CartItem) -> Self {
        OrderItem::new(item.menu_item_id, item.quantity, item.unit_price)
    }
}

/// In-progress selection for exactly one outlet
///
/// Binding to a different outlet clears the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSession {
    outlet_id: Option<String>,
    items: Vec<CartItem>,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outlet_id(&self) -> Option<&str> {
        self.outlet_id.as_deref()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(CartItem::line_total))
    }

    /// Bind the cart to an outlet, clearing it if the outlet changes
    pub fn bind_outlet(&mut self, outlet_id: &str) {
        if self.outlet_id.as_deref() == Some(outlet_id) {
            return;
        }
        if !self.items.is_empty() {
            tracing::debug!(
                from = ?self.outlet_id,
                to = %outlet_id,
                dropped = self.items.len(),
                "Outlet switch cleared cart"
            );
        }
        self.items.clear();
        self.outlet_id = Some(outlet_id.to_string());
    }

    /// Add an item for `outlet_id`
    ///
    /// An item already in the cart has its quantity incremented.
    pub fn add_item(&mut self, outlet_id: &str, item: CartItem) -> AppResult<()> {
        validate_required_text(outlet_id, "outletId", MAX_ID_LEN)?;
        validate_required_text(&item.menu_item_id, "menuItemId", MAX_ID_LEN)?;
        validate_quantity(item.quantity, "quantity")?;
        validate_price(item.unit_price, "unitPrice")?;

        self.bind_outlet(outlet_id);
        match self
            .items
            .iter_mut()
            .find(|existing| existing.menu_item_id == item.menu_item_id)
        {
            Some(existing) => {
                let quantity = existing.quantity.saturating_add(item.quantity);
                validate_quantity(quantity, "quantity")?;
                existing.quantity = quantity;
            }
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Remove an entry; no-op when absent
    pub fn remove_item(&mut self, menu_item_id: &str) {
        self.items.retain(|i| i.menu_item_id != menu_item_id);
    }

    /// Set an entry's quantity; 0 removes it
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) -> AppResult<()> {
        let Some(pos) = self
            .items
            .iter()
            .position(|i| i.menu_item_id == menu_item_id)
        else {
            return Err(
                AppError::with_message(
                    ErrorCode::CartItemNotFound,
                    format!("Item {menu_item_id} is not in the cart"),
                )
                .with_detail("menu_item_id", menu_item_id),
            );
        };
        if quantity == 0 {
            self.items.remove(pos);
        } else {
            validate_quantity(quantity, "quantity")?;
            self.items[pos].quantity = quantity;
        }
        Ok(())
    }

    /// Empty the cart and release the outlet binding
    pub fn clear(&mut self) {
        self.items.clear();
        self.outlet_id = None;
    }

    /// Take the current contents and clear the cart
    ///
    /// Fails with `EmptyCart`, leaving the cart untouched, when nothing is
    /// in it.
    pub fn checkout(&mut self) -> AppResult<CartSnapshot> {
        let outlet_id = match (&self.outlet_id, self.items.is_empty()) {
            (Some(outlet_id), false) => outlet_id.clone(),
            _ => return Err(AppError::empty_cart()),
        };
        let items = std::mem::take(&mut self.items);
        self.outlet_id = None;
        Ok(CartSnapshot { outlet_id, items })
    }
}

/// Immutable copy of a checked-out cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    outlet_id: String,
    items: Vec<CartItem>,
}

impl CartSnapshot {
    pub fn outlet_id(&self) -> &str {
        &self.outlet_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(CartItem::line_total))
    }
}

impl From<CartSnapshot> for OrderCreate {
    fn from(snapshot: CartSnapshot) -> Self {
        OrderCreate {
            outlet_id: snapshot.outlet_id,
            items: snapshot.items.into_iter().map(OrderItem::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::MAX_QUANTITY;

    fn latte(quantity: u32) -> CartItem {
        CartItem::new("latte", "Latte", quantity, Decimal::new(350, 2))
    }

    fn bagel() -> CartItem {
        CartItem::new("bagel", "Bagel", 1, Decimal::new(225, 2))
    }

    #[test]
    fn test_outlet_switch_clears_prior_items() {
        let mut cart = CartSession::new();
        cart.add_item("o1", latte(1)).unwrap();
        cart.add_item("o2", bagel()).unwrap();

        assert_eq!(cart.outlet_id(), Some("o2"));
        assert_eq!(cart.items(), &[bagel()]);
    }

    #[test]
    fn test_same_item_increments_quantity() {
        let mut cart = CartSession::new();
        cart.add_item("o1", latte(1)).unwrap();
        cart.add_item("o1", latte(2)).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total(), Decimal::new(1050, 2));
    }

    #[test]
    fn test_add_rejects_zero_quantity_and_negative_price() {
        let mut cart = CartSession::new();
        let err = cart.add_item("o1", latte(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let refund = CartItem::new("refund", "Refund", 1, Decimal::new(-100, 2));
        assert!(cart.add_item("o1", refund).is_err());
        assert!(cart.is_empty());
        assert_eq!(cart.outlet_id(), None);
    }

    #[test]
    fn test_oversized_lines_rejected_before_totals() {
        let mut cart = CartSession::new();
        let caviar = CartItem::new("caviar", "Caviar", 2, Decimal::MAX);
        let err = cart.add_item("north", caviar).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(cart.total(), Decimal::ZERO);

        cart.add_item("north", latte(MAX_QUANTITY)).unwrap();
        assert!(cart.add_item("north", latte(1)).is_err());
        assert!(cart.set_quantity("latte", MAX_QUANTITY + 1).is_err());
        assert_eq!(cart.item_count(), MAX_QUANTITY);
        assert_eq!(cart.total(), Decimal::new(350, 2) * Decimal::from(MAX_QUANTITY));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartSession::new();
        cart.add_item("o1", latte(1)).unwrap();
        cart.remove_item("missing");
        assert_eq!(cart.item_count(), 1);
        cart.remove_item("latte");
        assert!(cart.is_empty());
        assert_eq!(cart.outlet_id(), Some("o1"));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = CartSession::new();
        cart.add_item("o1", latte(1)).unwrap();
        cart.add_item("o1", bagel()).unwrap();

        cart.set_quantity("latte", 4).unwrap();
        assert_eq!(cart.items()[0].quantity, 4);

        cart.set_quantity("bagel", 0).unwrap();
        assert_eq!(cart.items().len(), 1);

        let err = cart.set_quantity("scone", 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartItemNotFound);
    }

    #[test]
    fn test_bind_same_outlet_keeps_items() {
        let mut cart = CartSession::new();
        cart.add_item("o1", latte(1)).unwrap();
        cart.bind_outlet("o1");
        assert_eq!(cart.item_count(), 1);
        cart.bind_outlet("o2");
        assert!(cart.is_empty());
        assert_eq!(cart.outlet_id(), Some("o2"));
    }

    #[test]
    fn test_checkout_snapshots_and_clears() {
        let mut cart = CartSession::new();
        cart.add_item("o1", latte(2)).unwrap();
        let snapshot = cart.checkout().unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.outlet_id(), None);
        assert_eq!(snapshot.outlet_id(), "o1");
        assert_eq!(snapshot.total(), Decimal::new(700, 2));

        let create = OrderCreate::from(snapshot);
        assert_eq!(create.items, vec![OrderItem::new("latte", 2, Decimal::new(350, 2))]);
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let mut cart = CartSession::new();
        cart.bind_outlet("o1");
        let err = cart.checkout().unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(cart.outlet_id(), Some("o1"));
    }
}
