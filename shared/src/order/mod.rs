//! Order types
//!
//! - [`Order`] / [`OrderItem`]: checked-out orders as persisted
//! - [`OrderStatus`]: the fulfillment pipeline

pub mod status;
pub mod types;

// Re-exports
pub use status::OrderStatus;
pub use types::{Order, OrderCreate, OrderItem, saturating_sum};
