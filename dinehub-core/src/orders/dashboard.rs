//! Staff review dashboard
//!
//! ```text
//! pending, accepted ──▶ New Orders
//! preparing         ──▶ In Preparation
//! ready             ──▶ Ready for Pickup
//! completed, cancelled  (not shown)
//! ```
//!
//! [`partition`] is a pure function of the order set. [`StaffDashboard`]
//! keeps one outlet's local order set, re-partitions after every mutation
//! and publishes the result on a broadcast channel.
//!
//! Concurrent dashboards for the same outlet are not reconciled; each sees
//! other sessions' changes only after [`StaffDashboard::refresh`].

use super::staff::StaffAuthorizer;
use super::{OrderLifecycle, OrderStore};
use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::order::{Order, OrderStatus};
use std::fmt;
use std::str::FromStr;
use tokio::sync::broadcast;

/// Capacity of each dashboard's update channel
const UPDATE_CHANNEL_CAPACITY: usize = 64;

// ============================================================================
// Buckets
// ============================================================================

/// Display bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bucket {
    #[serde(rename = "New Orders")]
    NewOrders,
    #[serde(rename = "In Preparation")]
    InPreparation,
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::NewOrders, Bucket::InPreparation, Bucket::ReadyForPickup];

    pub const fn label(&self) -> &'static str {
        match self {
            Bucket::NewOrders => "New Orders",
            Bucket::InPreparation => "In Preparation",
            Bucket::ReadyForPickup => "Ready for Pickup",
        }
    }

    /// Bucket for a status; `None` for terminal statuses
    pub const fn for_status(status: OrderStatus) -> Option<Bucket> {
        match status {
            OrderStatus::Pending | OrderStatus::Accepted => Some(Bucket::NewOrders),
            OrderStatus::Preparing => Some(Bucket::InPreparation),
            OrderStatus::Ready => Some(Bucket::ReadyForPickup),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Partitioned view; each bucket preserves input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardBuckets {
    #[serde(rename = "New Orders")]
    pub new_orders: Vec<Order>,
    #[serde(rename = "In Preparation")]
    pub in_preparation: Vec<Order>,
    #[serde(rename = "Ready for Pickup")]
    pub ready_for_pickup: Vec<Order>,
}

impl DashboardBuckets {
    pub fn get(&self, bucket: Bucket) -> &[Order] {
        match bucket {
            Bucket::NewOrders => &self.new_orders,
            Bucket::InPreparation => &self.in_preparation,
            Bucket::ReadyForPickup => &self.ready_for_pickup,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<Order> {
        match bucket {
            Bucket::NewOrders => &mut self.new_orders,
            Bucket::InPreparation => &mut self.in_preparation,
            Bucket::ReadyForPickup => &mut self.ready_for_pickup,
        }
    }

    /// Orders across all buckets
    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.get(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket currently holding an order
    pub fn locate(&self, order_id: &str) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .find(|b| self.get(*b).iter().any(|o| o.id == order_id))
    }
}

/// Group orders into display buckets, dropping terminal orders
pub fn partition(orders: &[Order]) -> DashboardBuckets {
    let mut buckets = DashboardBuckets::default();
    for order in orders {
        if let Some(bucket) = Bucket::for_status(order.status) {
            buckets.get_mut(bucket).push(order.clone());
        }
    }
    buckets
}

// ============================================================================
// Live dashboard
// ============================================================================

/// When a staff action becomes visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Persist first, then reflect
    #[default]
    Confirmed,
    /// Reflect first, then persist; roll back on failure
    Optimistic,
}

impl UpdateMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "optimistic" => Ok(Self::Optimistic),
            other => Err(format!("unknown dashboard update mode: {other}")),
        }
    }
}

/// Why the view was recomputed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateReason {
    Refreshed,
    Transitioned { order_id: String, status: OrderStatus },
    RolledBack { order_id: String },
}

/// Published after every recompute
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpdate {
    pub outlet_id: String,
    pub reason: UpdateReason,
    pub buckets: DashboardBuckets,
}

/// One staff member's live view of an outlet's orders
#[derive(Debug)]
pub struct StaffDashboard {
    outlet_id: String,
    orders: Vec<Order>,
    buckets: DashboardBuckets,
    store: OrderStore,
    lifecycle: OrderLifecycle,
    mode: UpdateMode,
    tx: broadcast::Sender<DashboardUpdate>,
}

impl StaffDashboard {
    /// Open the dashboard for `outlet_id` and load its orders
    ///
    /// `PermissionDenied` unless `staff_id` is staff for the outlet.
    pub async fn open(
        staff_id: &str,
        outlet_id: &str,
        authorizer: &dyn StaffAuthorizer,
        store: OrderStore,
        lifecycle: OrderLifecycle,
        mode: UpdateMode,
    ) -> AppResult<Self> {
        if !authorizer.is_staff(staff_id, outlet_id).await? {
            tracing::warn!(staff_id = %staff_id, outlet_id = %outlet_id, "Dashboard access denied");
            return Err(AppError::permission_denied(format!(
                "Not staff for outlet {outlet_id}"
            ))
            .with_detail("outlet_id", outlet_id));
        }

        let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let mut dashboard = Self {
            outlet_id: outlet_id.to_string(),
            orders: Vec::new(),
            buckets: DashboardBuckets::default(),
            store,
            lifecycle,
            mode,
            tx,
        };
        dashboard.refresh().await?;
        Ok(dashboard)
    }

    pub fn outlet_id(&self) -> &str {
        &self.outlet_id
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Current bucketed view
    pub fn view(&self) -> &DashboardBuckets {
        &self.buckets
    }

    /// Local order set, including terminal orders
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardUpdate> {
        self.tx.subscribe()
    }

    /// Re-fetch the outlet's orders from the store
    pub async fn refresh(&mut self) -> AppResult<&DashboardBuckets> {
        self.orders = self.store.list_for_outlet(&self.outlet_id).await?;
        self.recompute(UpdateReason::Refreshed);
        Ok(&self.buckets)
    }

    /// Move an order to `target` according to the update mode
    pub async fn apply(&mut self, order_id: &str, target: OrderStatus) -> AppResult<Order> {
        match self.mode {
            UpdateMode::Confirmed => self.apply_confirmed(order_id, target).await,
            UpdateMode::Optimistic => self.apply_optimistic(order_id, target).await,
        }
    }

    /// Check the transition against the stored order and persist it
    ///
    /// The local copy may be stale; only the stored status decides
    /// legality.
    async fn commit(&self, order_id: &str, target: OrderStatus) -> AppResult<Order> {
        let stored = self.store.require(order_id).await?;
        self.ensure_own(&stored)?;
        let mut updated = self.lifecycle.transition(&stored, target)?;
        self.store.persist(&mut updated, stored.status).await?;
        Ok(updated)
    }

    async fn apply_confirmed(&mut self, order_id: &str, target: OrderStatus) -> AppResult<Order> {
        let updated = self.commit(order_id, target).await?;

        match self.orders.iter_mut().find(|o| o.id == updated.id) {
            Some(local) => *local = updated.clone(),
            None => self.orders.push(updated.clone()),
        }
        self.recompute(UpdateReason::Transitioned {
            order_id: updated.id.clone(),
            status: updated.status,
        });
        Ok(updated)
    }

    async fn apply_optimistic(&mut self, order_id: &str, target: OrderStatus) -> AppResult<Order> {
        let pos = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| AppError::order_not_found(order_id))?;
        let previous = self.orders[pos].clone();
        let reflected = self.lifecycle.transition(&previous, target)?;

        self.orders[pos] = reflected;
        self.recompute(UpdateReason::Transitioned {
            order_id: order_id.to_string(),
            status: target,
        });

        match self.commit(order_id, target).await {
            Ok(updated) => {
                self.orders[pos] = updated.clone();
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(
                    order_id = %order_id,
                    outlet_id = %self.outlet_id,
                    error = %e,
                    "Commit failed; rolling back optimistic update"
                );
                self.orders[pos] = previous;
                self.recompute(UpdateReason::RolledBack {
                    order_id: order_id.to_string(),
                });
                Err(e)
            }
        }
    }

    fn ensure_own(&self, order: &Order) -> AppResult<()> {
        if order.outlet_id != self.outlet_id {
            return Err(AppError::permission_denied(format!(
                "Order {} belongs to another outlet",
                order.id
            ))
            .with_detail("order_id", order.id.as_str()));
        }
        Ok(())
    }

    fn recompute(&mut self, reason: UpdateReason) {
        self.buckets = partition(&self.orders);
        tracing::debug!(
            outlet_id = %self.outlet_id,
            new = self.buckets.new_orders.len(),
            preparing = self.buckets.in_preparation.len(),
            ready = self.buckets.ready_for_pickup.len(),
            "Dashboard recomputed"
        );
        // No subscribers is fine
        let _ = self.tx.send(DashboardUpdate {
            outlet_id: self.outlet_id.clone(),
            reason,
            buckets: self.buckets.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn orders(statuses: &[OrderStatus]) -> Vec<Order> {
        let start = Utc::now();
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Order {
                id: format!("o-{i}"),
                outlet_id: "north".into(),
                items: vec![],
                status: *status,
                created_at: start + Duration::seconds(i as i64),
                updated_at: None,
            })
            .collect()
    }

    #[test]
    fn test_partition_pipeline_scenario() {
        let input = orders(&[
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ]);
        let buckets = partition(&input);
        assert_eq!(buckets.new_orders.len(), 2);
        assert_eq!(buckets.in_preparation.len(), 1);
        assert_eq!(buckets.ready_for_pickup.len(), 1);
    }

    #[test]
    fn test_partition_is_exhaustive_and_exclusive() {
        // Every status twice, interleaved
        let statuses: Vec<_> = OrderStatus::ALL
            .iter()
            .chain(OrderStatus::ALL.iter().rev())
            .copied()
            .collect();
        let input = orders(&statuses);
        let buckets = partition(&input);

        for order in &input {
            let holding: Vec<_> = Bucket::ALL
                .into_iter()
                .filter(|b| buckets.get(*b).iter().any(|o| o.id == order.id))
                .collect();
            if order.status.is_terminal() {
                assert!(holding.is_empty(), "{} shown", order.id);
            } else {
                assert_eq!(holding.len(), 1, "{} in {holding:?}", order.id);
            }
        }
        assert_eq!(buckets.len(), 8);
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        let input = orders(&[OrderStatus::Accepted, OrderStatus::Ready, OrderStatus::Pending]);
        let buckets = partition(&input);
        let ids: Vec<_> = buckets.new_orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o-0", "o-2"]);
        assert_eq!(partition(&input), buckets);
    }

    #[test]
    fn test_buckets_serialize_with_labels() {
        let buckets = partition(&orders(&[OrderStatus::Ready]));
        let value = serde_json::to_value(&buckets).unwrap();
        assert_eq!(value["New Orders"].as_array().unwrap().len(), 0);
        assert_eq!(value["In Preparation"].as_array().unwrap().len(), 0);
        assert_eq!(value["Ready for Pickup"].as_array().unwrap().len(), 1);
        assert_eq!(buckets.locate("o-0"), Some(Bucket::ReadyForPickup));
    }

    #[test]
    fn test_update_mode_parsing() {
        assert_eq!("optimistic".parse(), Ok(UpdateMode::Optimistic));
        assert_eq!(UpdateMode::default(), UpdateMode::Confirmed);
        assert!("eventual".parse::<UpdateMode>().is_err());
    }
}
