//! Customer cart
//!
//! Local, ephemeral state for one browsing session. Never persisted by
//! this crate.

pub mod session;

pub use session::{CartItem, CartSession, CartSnapshot};
