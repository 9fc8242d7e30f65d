#![allow(dead_code)]

use dinehub_core::{AppState, CartItem, CartSession, Config, ExecutionContext, MemoryStore, StoreHandle};
use rust_decimal::Decimal;
use shared::models::OutletCreate;
use shared::order::Order;
use std::sync::Arc;

/// App state over a fresh in-memory store; the store is returned so tests
/// can take it offline
pub fn memory_state(config: Config) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let handle = StoreHandle::connected(store.clone(), ExecutionContext::Server);
    (AppState::with_store(config, handle), store)
}

pub fn outlet_create(name: &str) -> OutletCreate {
    OutletCreate {
        name: name.to_string(),
        description: format!("{name} description"),
        image_id: name.to_lowercase().replace(' ', "-"),
        is_active: true,
        base_delivery_time: 15,
    }
}

pub fn latte(quantity: u32) -> CartItem {
    CartItem::new("latte", "Latte", quantity, Decimal::new(350, 2))
}

/// Create an outlet and place one latte order against it
pub async fn place_latte_order(state: &AppState, outlet_id: &str) -> Order {
    let mut cart = CartSession::new();
    cart.add_item(outlet_id, latte(1)).unwrap();
    state.place_order(cart.checkout().unwrap()).await.unwrap()
}
