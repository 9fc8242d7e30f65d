//! Shared types for DineHub
//!
//! Domain types used across the workspace crates: outlets, orders and
//! their status pipeline, plus the unified error system.

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Outlet, OutletCreate, OutletUpdate};
pub use order::{Order, OrderCreate, OrderItem, OrderStatus};
