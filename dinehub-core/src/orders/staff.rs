//! Staff authorization seam
//!
//! The authentication provider is external; the dashboard only asks
//! whether a caller is staff for an outlet.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::error::AppResult;
use std::collections::{HashMap, HashSet};

/// "Is this caller staff for outlet X"
#[async_trait]
pub trait StaffAuthorizer: Send + Sync {
    async fn is_staff(&self, staff_id: &str, outlet_id: &str) -> AppResult<bool>;
}

/// In-memory staff assignments
#[derive(Debug, Default)]
pub struct StaffRoster {
    assignments: RwLock<HashMap<String, HashSet<String>>>,
}

impl StaffRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, staff_id: &str, outlet_id: &str) {
        self.assignments
            .write()
            .entry(staff_id.to_string())
            .or_default()
            .insert(outlet_id.to_string());
    }

    pub fn revoke(&self, staff_id: &str, outlet_id: &str) {
        let mut assignments = self.assignments.write();
        if let Some(outlets) = assignments.get_mut(staff_id) {
            outlets.remove(outlet_id);
            if outlets.is_empty() {
                assignments.remove(staff_id);
            }
        }
    }

    pub fn outlets_for(&self, staff_id: &str) -> Vec<String> {
        let mut outlets: Vec<_> = self
            .assignments
            .read()
            .get(staff_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        outlets.sort();
        outlets
    }
}

#[async_trait]
impl StaffAuthorizer for StaffRoster {
    async fn is_staff(&self, staff_id: &str, outlet_id: &str) -> AppResult<bool> {
        Ok(self
            .assignments
            .read()
            .get(staff_id)
            .is_some_and(|outlets| outlets.contains(outlet_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_grant_and_revoke() {
        let roster = StaffRoster::new();
        roster.grant("alice", "north");
        roster.grant("alice", "south");

        assert!(roster.is_staff("alice", "north").await.unwrap());
        assert!(!roster.is_staff("alice", "east").await.unwrap());
        assert!(!roster.is_staff("bob", "north").await.unwrap());
        assert_eq!(roster.outlets_for("alice"), vec!["north", "south"]);

        roster.revoke("alice", "north");
        assert!(!roster.is_staff("alice", "north").await.unwrap());
    }
}
