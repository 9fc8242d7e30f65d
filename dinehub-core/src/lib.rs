//! DineHub core - multi-outlet order coordination
//!
//! # Module layout
//!
//! ```text
//! dinehub-core/src/
//! ├── core/          # configuration, application state
//! ├── db/            # document store, store handle, execution context
//! ├── outlets/       # outlet directory, fallback data, seeding
//! ├── cart/          # per-session cart
//! ├── orders/        # order store, lifecycle, staff dashboard
//! └── utils/         # logging, validation
//! ```
//!
//! The store handle is built once by [`AppState::initialize`] and handed to
//! every component. Outlet reads degrade to synthetic data when the store
//! is unreachable; every write fails instead.

pub mod cart;
pub mod core;
pub mod db;
pub mod orders;
pub mod outlets;
pub mod utils;

pub use cart::{CartItem, CartSession, CartSnapshot};
pub use self::core::{AppState, Config};
pub use db::{DocumentStore, ExecutionContext, MemoryStore, RedbStore, StoreBackend, StoreHandle};
pub use orders::{
    Bucket, DashboardBuckets, DashboardUpdate, OrderLifecycle, OrderStore, StaffAuthorizer,
    StaffDashboard, StaffRoster, TransitionPolicy, UpdateMode, partition,
};
pub use outlets::{OutletDirectory, SeedReport, seed_outlets};
pub use utils::logger::{init_logger, init_logger_with_file};

pub use shared::error::{AppError, AppResult, ErrorCode};

/// Load `.env`, start logging and read the configuration
///
/// Binaries call this first.
pub fn setup_environment() -> Config {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    if !dotenv_loaded {
        tracing::debug!("No .env file found; using process environment");
    }
    Config::from_env()
}
