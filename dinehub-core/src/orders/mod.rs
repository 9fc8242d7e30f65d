//! Orders
//!
//! Mutations flow: staff action ──▶ [`OrderLifecycle`] ──▶ [`OrderStore`]
//! ──▶ [`partition`] ──▶ dashboard subscribers.

pub mod dashboard;
pub mod lifecycle;
pub mod staff;
pub mod store;

pub use dashboard::{
    Bucket, DashboardBuckets, DashboardUpdate, StaffDashboard, UpdateMode, UpdateReason, partition,
};
pub use lifecycle::{OrderLifecycle, TransitionPolicy};
pub use staff::{StaffAuthorizer, StaffRoster};
pub use store::OrderStore;
