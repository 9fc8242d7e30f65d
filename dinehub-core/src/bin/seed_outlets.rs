//! Upsert outlets from a JSON array file into the configured store
//!
//! ```text
//! STORE_PATH=/var/lib/dinehub/store.redb seed-outlets outlets.json
//! ```

use anyhow::{Context, bail};
use dinehub_core::{AppState, seed_outlets, setup_environment};
use shared::models::Outlet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = setup_environment();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: seed-outlets <outlets.json>");
    };
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let outlets: Vec<Outlet> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {path} as an outlet array"))?;

    let state = AppState::initialize(&config);
    if !state.store.is_connected() {
        bail!("store is unreachable; set STORE_PATH or STORE_BACKEND before seeding");
    }

    tracing::info!(count = outlets.len(), file = %path, "Seeding outlets");
    let report = seed_outlets(&state.outlets, &outlets).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_complete() {
        bail!(
            "{} of {} outlets failed to seed",
            report.failed.len(),
            report.total()
        );
    }
    Ok(())
}
