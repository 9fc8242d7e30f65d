//! In-process document store
//!
//! Used for browser-local sessions and tests. Can be switched offline to
//! simulate an outage: every call then fails with [`StoreError::Unavailable`].

use super::store::{
    Document, DocumentStore, StoreError, StoreResult, merge_into, new_document_id,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store becoming (un)reachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.is_offline() {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.ensure_online()?;
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.ensure_online()?;
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn insert(&self, collection: &str, data: Value) -> StoreResult<String> {
        self.ensure_online()?;
        let id = new_document_id();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        self.ensure_online()?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write();
        let body = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        merge_into(body, patch);
        Ok(())
    }

    async fn merge_if(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        expected: &Value,
        patch: Map<String, Value>,
    ) -> StoreResult<bool> {
        self.ensure_online()?;
        let mut collections = self.collections.write();
        let body = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        if body.get(field) != Some(expected) {
            return Ok(false);
        }
        merge_into(body, patch);
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.ensure_online()?;
        self.collections
            .write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = MemoryStore::new();
        let id = store.insert("outlets", json!({ "name": "North" })).await.unwrap();
        let doc = store.get("outlets", &id).await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "North");
        assert!(store.get("outlets", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_and_delete_require_existing() {
        let store = MemoryStore::new();
        let err = store.merge("outlets", "nope", Map::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        let err = store.delete("outlets", "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_merge_if_is_conditional() {
        let store = MemoryStore::new();
        store.set("orders", "a", json!({ "status": "pending" })).await.unwrap();
        let patch = json!({ "status": "accepted" }).as_object().unwrap().clone();

        let stale = store
            .merge_if("orders", "a", "status", &json!("ready"), patch.clone())
            .await
            .unwrap();
        assert!(!stale);
        assert!(
            store
                .merge_if("orders", "a", "status", &json!("pending"), patch)
                .await
                .unwrap()
        );
        let doc = store.get("orders", "a").await.unwrap().unwrap();
        assert_eq!(doc.data["status"], "accepted");
    }

    #[tokio::test]
    async fn test_find_by_field() {
        let store = MemoryStore::new();
        store.set("orders", "a", json!({ "outletId": "n" })).await.unwrap();
        store.set("orders", "b", json!({ "outletId": "s" })).await.unwrap();
        store.set("orders", "c", json!({ "outletId": "n" })).await.unwrap();
        let docs = store
            .find_by_field("orders", "outletId", &json!("n"))
            .await
            .unwrap();
        let ids: Vec<_> = docs.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let store = MemoryStore::new();
        store.set("outlets", "a", json!({})).await.unwrap();
        store.set_offline(true);
        assert!(store.list("outlets").await.unwrap_err().is_unavailable());
        assert!(store.get("outlets", "a").await.unwrap_err().is_unavailable());
        store.set_offline(false);
        assert_eq!(store.list("outlets").await.unwrap().len(), 1);
    }
}
