use crate::cart::CartSnapshot;
use crate::core::Config;
use crate::db::StoreHandle;
use crate::orders::{OrderLifecycle, OrderStore, StaffAuthorizer, StaffDashboard};
use crate::outlets::OutletDirectory;
use shared::error::{AppError, AppResult};
use shared::order::{Order, OrderStatus};

/// Application state
///
/// Built once at process start. Every component shares the same
/// [`StoreHandle`]; cloning is cheap.
///
/// | Field | Role |
/// |-------|------|
/// | config | runtime configuration |
/// | store | backing store (possibly disconnected) |
/// | outlets | outlet registry with read fallback |
/// | orders | order persistence |
/// | lifecycle | status state machine |
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub store: StoreHandle,
    pub outlets: OutletDirectory,
    pub orders: OrderStore,
    pub lifecycle: OrderLifecycle,
}

impl AppState {
    /// Open the configured store and wire every component to it
    ///
    /// Never fails: an unreachable store leaves the handle disconnected.
    pub fn initialize(config: &Config) -> Self {
        let store = StoreHandle::open(config.store.as_ref(), config.context);
        Self::with_store(config.clone(), store)
    }

    /// Wire components to an existing handle
    pub fn with_store(config: Config, store: StoreHandle) -> Self {
        tracing::debug!(
            context = %config.context,
            connected = store.is_connected(),
            policy = %config.transition_policy,
            mode = %config.update_mode,
            "Application state initialized"
        );
        Self {
            outlets: OutletDirectory::new(store.clone()),
            orders: OrderStore::new(store.clone()),
            lifecycle: OrderLifecycle::new(config.transition_policy),
            store,
            config,
        }
    }

    /// Create an order from a checked-out cart
    ///
    /// The outlet must exist in the store; synthetic fallback outlets do
    /// not count.
    pub async fn place_order(&self, snapshot: CartSnapshot) -> AppResult<Order> {
        let outlet_id = snapshot.outlet_id().to_string();
        if !self.outlets.exists(&outlet_id).await? {
            return Err(AppError::outlet_not_found(outlet_id));
        }
        self.orders.create(snapshot.into()).await
    }

    /// Move an order to `target` and persist it
    pub async fn advance_order(&self, order_id: &str, target: OrderStatus) -> AppResult<Order> {
        self.lifecycle.advance(&self.orders, order_id, target).await
    }

    /// Open a staff dashboard using the configured update mode
    pub async fn open_dashboard(
        &self,
        staff_id: &str,
        outlet_id: &str,
        authorizer: &dyn StaffAuthorizer,
    ) -> AppResult<StaffDashboard> {
        StaffDashboard::open(
            staff_id,
            outlet_id,
            authorizer,
            self.orders.clone(),
            self.lifecycle,
            self.config.update_mode,
        )
        .await
    }
}
