//! Core Module
//!
//! - config: runtime configuration
//! - state: application state wiring

pub mod config;
pub mod state;

pub use config::Config;
pub use state::AppState;
