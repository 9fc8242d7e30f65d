//! Order persistence
//!
//! One document per order in the `orders` collection. Orders are never
//! deleted; they end in a terminal status instead. Reads never fall back.

use crate::db::store::to_body;
use crate::db::{ORDERS, StoreError, StoreHandle};
use crate::utils::validation::{MAX_ID_LEN, validate_price, validate_quantity, validate_required_text};
use chrono::Utc;
use serde_json::{Map, Value, json};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{Order, OrderCreate, OrderStatus};

#[derive(Debug, Clone)]
pub struct OrderStore {
    store: StoreHandle,
}

impl OrderStore {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Create a `pending` order; the store assigns the id
    pub async fn create(&self, data: OrderCreate) -> AppResult<Order> {
        validate_create(&data)?;
        let store = self.store.store()?;

        let mut order = Order {
            id: String::new(),
            outlet_id: data.outlet_id,
            items: data.items,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        };
        order.id = store.insert(ORDERS, to_body(&order)?).await?;

        tracing::info!(
            order_id = %order.id,
            outlet_id = %order.outlet_id,
            items = order.items.len(),
            total = %order.total(),
            "Order created"
        );
        Ok(order)
    }

    /// Order by id; `None` when absent
    pub async fn get(&self, id: &str) -> AppResult<Option<Order>> {
        match self.store.store()?.get(ORDERS, id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Order by id; `OrderNotFound` when absent
    pub async fn require(&self, id: &str) -> AppResult<Order> {
        self.get(id)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))
    }

    /// Every order for an outlet, oldest first (ties broken by id)
    pub async fn list_for_outlet(&self, outlet_id: &str) -> AppResult<Vec<Order>> {
        let docs = self
            .store
            .store()?
            .find_by_field(ORDERS, "outletId", &Value::String(outlet_id.to_string()))
            .await?;

        let mut orders = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = doc.id.clone();
            match doc.decode::<Order>() {
                Ok(order) => orders.push(order),
                Err(e) => tracing::error!(order_id = %id, error = %e, "Skipping malformed order document"),
            }
        }
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// Write the order's status, stamping `updatedAt`
    ///
    /// The write only lands while the stored status is still `expected`;
    /// a concurrent change in between is reported as an illegal transition.
    /// `order` is only modified once the write succeeds.
    pub async fn persist(&self, order: &mut Order, expected: OrderStatus) -> AppResult<()> {
        let store = self.store.store()?;
        let now = Utc::now();
        let mut patch = Map::new();
        patch.insert("status".to_string(), json!(order.status));
        patch.insert("updatedAt".to_string(), json!(now));

        let written = store
            .merge_if(ORDERS, &order.id, "status", &json!(expected), patch)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => AppError::order_not_found(&order.id),
                other => other.into(),
            })?;
        if !written {
            return Err(AppError::with_message(
                ErrorCode::IllegalTransition,
                format!("Order {} is no longer {expected}", order.id),
            )
            .with_detail("order_id", order.id.as_str())
            .with_detail("expected", expected.to_string())
            .with_detail("to", order.status.to_string()));
        }
        order.updated_at = Some(now);
        Ok(())
    }
}

fn validate_create(data: &OrderCreate) -> AppResult<()> {
    validate_required_text(&data.outlet_id, "outletId", MAX_ID_LEN)?;
    if data.items.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "An order needs at least one item",
        ));
    }
    for item in &data.items {
        validate_required_text(&item.menu_item_id, "menuItemId", MAX_ID_LEN)?;
        validate_quantity(item.quantity, "quantity")?;
        validate_price(item.unit_price, "unitPrice")?;
    }
    Ok(())
}
