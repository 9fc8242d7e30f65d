//! Database Module
//!
//! The store handle is constructed once at process start and passed to
//! every component that needs the backing store. Whether the store is
//! reachable depends on the execution context and on configuration; an
//! unreachable store is represented by a disconnected handle rather than
//! a missing global.

pub mod memory;
pub mod redb_store;
pub mod store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use store::{Document, DocumentStore, StoreError, StoreResult};

use shared::error::{AppError, ErrorCode};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Collection holding one document per outlet
pub const OUTLETS: &str = "outlets";
/// Collection holding one document per order
pub const ORDERS: &str = "orders";

/// Where the code is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionContext {
    /// Build-time static page enumeration
    StaticBuild,
    /// Server-side request handling
    #[default]
    Server,
    /// Client-side browser session
    Browser,
}

impl ExecutionContext {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StaticBuild => "build",
            Self::Server => "server",
            Self::Browser => "browser",
        }
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "build" | "static-build" => Ok(Self::StaticBuild),
            "server" => Ok(Self::Server),
            "browser" | "client" => Ok(Self::Browser),
            other => Err(format!("unknown execution context: {other}")),
        }
    }
}

/// Configured store backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Redb(PathBuf),
    Memory,
}

/// Explicit handle to the backing store
#[derive(Debug, Clone)]
pub struct StoreHandle {
    store: Option<Arc<dyn DocumentStore>>,
    context: ExecutionContext,
    reason: String,
}

impl StoreHandle {
    pub fn connected(store: Arc<dyn DocumentStore>, context: ExecutionContext) -> Self {
        Self {
            store: Some(store),
            context,
            reason: String::new(),
        }
    }

    pub fn disconnected(context: ExecutionContext, reason: impl Into<String>) -> Self {
        Self {
            store: None,
            context,
            reason: reason.into(),
        }
    }

    /// Build the handle from configuration
    ///
    /// Never fails: a missing or unopenable store yields a disconnected
    /// handle, and read paths degrade from there.
    pub fn open(backend: Option<&StoreBackend>, context: ExecutionContext) -> Self {
        match backend {
            None => {
                tracing::warn!(
                    context = %context,
                    "No store configured (set STORE_PATH or STORE_BACKEND); running disconnected"
                );
                Self::disconnected(context, "no store configured")
            }
            Some(StoreBackend::Memory) => {
                tracing::info!(context = %context, "Using in-memory store");
                Self::connected(Arc::new(MemoryStore::new()), context)
            }
            Some(StoreBackend::Redb(path)) => match RedbStore::open(path) {
                Ok(store) => {
                    tracing::info!(context = %context, path = %path.display(), "Store opened");
                    Self::connected(Arc::new(store), context)
                }
                Err(e) => {
                    tracing::warn!(
                        context = %context,
                        path = %path.display(),
                        error = %e,
                        "Failed to open store; running disconnected"
                    );
                    Self::disconnected(context, format!("failed to open {}: {e}", path.display()))
                }
            },
        }
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    /// The store, or [`StoreError::Unavailable`] when disconnected
    pub fn store(&self) -> StoreResult<&Arc<dyn DocumentStore>> {
        self.store.as_ref().ok_or_else(|| {
            StoreError::Unavailable(format!("{} (context: {})", self.reason, self.context))
        })
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => AppError::store_unavailable(reason),
            StoreError::NotFound { collection, id } => {
                AppError::not_found(format!("{collection}/{id}")).with_detail("id", id)
            }
            StoreError::Serialization(e) => {
                tracing::error!(error = %e, "Stored document failed to decode");
                AppError::with_message(ErrorCode::InternalError, e.to_string())
            }
            StoreError::Backend(reason) => AppError::store_unavailable(reason),
        }
    }
}
