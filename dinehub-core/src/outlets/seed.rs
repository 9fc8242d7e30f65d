//! Bulk outlet seeding
//!
//! Upserts each record under its own id. A failed record is logged and
//! skipped; the rest are still written.

use super::OutletDirectory;
use serde::Serialize;
use shared::models::Outlet;

/// A record that could not be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedFailure {
    pub id: String,
    pub message: String,
}

/// Outcome of a seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Ids written, in input order
    pub written: Vec<String>,
    pub failed: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Upsert every outlet, continuing past individual failures
pub async fn seed_outlets(directory: &OutletDirectory, outlets: &[Outlet]) -> SeedReport {
    let mut report = SeedReport::default();
    for outlet in outlets {
        match directory.upsert(outlet).await {
            Ok(()) => {
                tracing::info!(outlet_id = %outlet.id, name = %outlet.name, "Seeded outlet");
                report.written.push(outlet.id.clone());
            }
            Err(e) => {
                tracing::error!(outlet_id = %outlet.id, error = %e, "Failed to seed outlet");
                report.failed.push(SeedFailure {
                    id: outlet.id.clone(),
                    message: e.message,
                });
            }
        }
    }
    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "Outlet seeding finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ExecutionContext, MemoryStore, StoreHandle};
    use std::sync::Arc;

    fn outlet(id: &str, name: &str) -> Outlet {
        Outlet {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image_id: String::new(),
            is_active: true,
            base_delivery_time: 10,
        }
    }

    #[tokio::test]
    async fn test_seed_continues_past_failures() {
        let handle = StoreHandle::connected(Arc::new(MemoryStore::new()), ExecutionContext::Server);
        let directory = OutletDirectory::new(handle);
        let outlets = vec![
            outlet("north", "North Cafe"),
            outlet("blank", ""),
            outlet("south", "South Grill"),
        ];

        let report = seed_outlets(&directory, &outlets).await;
        assert_eq!(report.written, vec!["north".to_string(), "south".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "blank");
        assert_eq!(report.total(), 3);
        assert!(!report.is_complete());
        assert_eq!(directory.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let handle = StoreHandle::connected(Arc::new(MemoryStore::new()), ExecutionContext::Server);
        let directory = OutletDirectory::new(handle);
        let outlets = vec![outlet("north", "North Cafe")];
        seed_outlets(&directory, &outlets).await;
        let report = seed_outlets(&directory, &outlets).await;
        assert!(report.is_complete());
        assert_eq!(directory.get_all().await.unwrap(), outlets);
    }
}
