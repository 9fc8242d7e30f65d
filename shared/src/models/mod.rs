//! Data models stored in the backing store

pub mod outlet;

pub use outlet::{Outlet, OutletCreate, OutletUpdate};
