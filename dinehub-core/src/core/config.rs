use crate::db::{ExecutionContext, StoreBackend};
use crate::orders::{TransitionPolicy, UpdateMode};
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DINEHUB_CONTEXT | server | `build`, `server` or `browser` |
/// | STORE_BACKEND | - | `redb` or `memory`; unset means no store |
/// | STORE_PATH | - | redb file; setting it alone implies `redb` |
/// | ORDER_TRANSITION_POLICY | single-step | `single-step` or `skip-ahead` |
/// | DASHBOARD_UPDATE_MODE | confirmed | `confirmed` or `optimistic` |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | - | daily-rolling log directory |
///
/// Unrecognized values are logged and replaced by the default.
///
/// # Example
///
/// ```ignore
/// STORE_PATH=/var/lib/dinehub/store.redb DASHBOARD_UPDATE_MODE=optimistic cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub context: ExecutionContext,
    /// `None` runs with a disconnected store
    pub store: Option<StoreBackend>,
    pub transition_policy: TransitionPolicy,
    pub update_mode: UpdateMode,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            context: parse_or_default("DINEHUB_CONTEXT", var("DINEHUB_CONTEXT")),
            store: store_backend(var("STORE_BACKEND"), var("STORE_PATH")),
            transition_policy: parse_or_default(
                "ORDER_TRANSITION_POLICY",
                var("ORDER_TRANSITION_POLICY"),
            ),
            update_mode: parse_or_default("DASHBOARD_UPDATE_MODE", var("DASHBOARD_UPDATE_MODE")),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
        }
    }

    /// Defaults with an in-memory store
    ///
    /// Used by tests and local demos.
    pub fn in_memory() -> Self {
        Self::from_lookup(|_| None).with_store(Some(StoreBackend::Memory))
    }

    pub fn with_store(mut self, store: Option<StoreBackend>) -> Self {
        self.store = store;
        self
    }

    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>) -> T
where
    T: FromStr<Err = String> + Default,
{
    match raw {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e: String| {
            tracing::warn!(variable = key, value = %raw, error = %e, "Ignoring invalid setting");
            T::default()
        }),
    }
}

fn store_backend(backend: Option<String>, path: Option<String>) -> Option<StoreBackend> {
    match backend.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("memory") => Some(StoreBackend::Memory),
        Some("redb") | None => match path {
            Some(path) => Some(StoreBackend::Redb(PathBuf::from(path))),
            None => {
                if backend.is_some() {
                    tracing::warn!("STORE_BACKEND=redb requires STORE_PATH; no store configured");
                }
                None
            }
        },
        Some(other) => {
            tracing::warn!(value = %other, "Unknown STORE_BACKEND; no store configured");
            None
        }
    }
}
