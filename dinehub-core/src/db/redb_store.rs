//! redb-backed document store
//!
//! # Tables
//!
//! One table per collection, created on first write:
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `outlets` | outlet id | JSON body |
//! | `orders` | order id | JSON body |
//!
//! # Durability
//!
//! Every call runs in its own transaction and commits before returning, so
//! each call is atomic on its own and nothing is atomic across calls.

use super::store::{
    Document, DocumentStore, StoreError, StoreResult, merge_into, new_document_id,
};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, TableError};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

fn table(collection: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(collection)
}

macro_rules! backend_error {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for StoreError {
                fn from(err: $source) -> Self {
                    StoreError::Backend(err.to_string())
                }
            }
        )*
    };
}

backend_error!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Document store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Ok(Self { db: Arc::new(db) })
    }

    fn read_body(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(table(collection)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let body = match table.get(id)? {
            Some(guard) => Some(serde_json::from_slice(guard.value())?),
            None => None,
        };
        Ok(body)
    }

    /// Read, check and rewrite one document in a single write transaction
    fn merge_guarded(
        &self,
        collection: &str,
        id: &str,
        condition: Option<(&str, &Value)>,
        patch: Map<String, Value>,
    ) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table(collection))?;
            let current = table.get(id)?.map(|guard| guard.value().to_vec());
            let Some(current) = current else {
                return Err(StoreError::not_found(collection, id));
            };
            let mut body: Value = serde_json::from_slice(&current)?;
            if let Some((field, expected)) = condition
                && body.get(field) != Some(expected)
            {
                return Ok(false);
            }
            merge_into(&mut body, patch);
            let bytes = serde_json::to_vec(&body)?;
            table.insert(id, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(true)
    }

    fn write_body(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        let bytes = serde_json::to_vec(body)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table(collection))?;
            table.insert(id, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for RedbStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(table(collection)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut documents = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            documents.push(Document {
                id: key.value().to_string(),
                data: serde_json::from_slice(value.value())?,
            });
        }
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.read_body(collection, id)?.map(|data| Document {
            id: id.to_string(),
            data,
        }))
    }

    async fn insert(&self, collection: &str, data: Value) -> StoreResult<String> {
        let id = new_document_id();
        self.write_body(collection, &id, &data)?;
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        self.write_body(collection, id, &data)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<()> {
        self.merge_guarded(collection, id, None, patch).map(|_| ())
    }

    async fn merge_if(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        expected: &Value,
        patch: Map<String, Value>,
    ) -> StoreResult<bool> {
        self.merge_guarded(collection, id, Some((field, expected)), patch)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        let removed;
        {
            let mut table = write_txn.open_table(table(collection))?;
            removed = table.remove(id)?.is_some();
        }
        if !removed {
            return Err(StoreError::not_found(collection, id));
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_empty_collection() {
        let store = RedbStore::open_in_memory().unwrap();
        assert!(store.list("outlets").await.unwrap().is_empty());
        assert!(store.get("outlets", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_merge_get() {
        let store = RedbStore::open_in_memory().unwrap();
        store
            .set("outlets", "north", json!({ "name": "North", "isActive": true }))
            .await
            .unwrap();
        let patch = json!({ "isActive": false }).as_object().unwrap().clone();
        store.merge("outlets", "north", patch).await.unwrap();

        let doc = store.get("outlets", "north").await.unwrap().unwrap();
        assert_eq!(doc.data, json!({ "name": "North", "isActive": false }));
    }

    #[tokio::test]
    async fn test_merge_if_checks_field() {
        let store = RedbStore::open_in_memory().unwrap();
        store
            .set("orders", "o-1", json!({ "status": "cancelled" }))
            .await
            .unwrap();

        let patch = json!({ "status": "accepted" }).as_object().unwrap().clone();
        let written = store
            .merge_if("orders", "o-1", "status", &json!("pending"), patch.clone())
            .await
            .unwrap();
        assert!(!written);
        let doc = store.get("orders", "o-1").await.unwrap().unwrap();
        assert_eq!(doc.data, json!({ "status": "cancelled" }));

        let written = store
            .merge_if("orders", "o-1", "status", &json!("cancelled"), patch)
            .await
            .unwrap();
        assert!(written);
    }

    #[tokio::test]
    async fn test_merge_missing_is_not_found() {
        let store = RedbStore::open_in_memory().unwrap();
        store.set("outlets", "a", json!({})).await.unwrap();
        let err = store.merge("outlets", "b", Map::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = RedbStore::open_in_memory().unwrap();
        let id = store.insert("orders", json!({ "status": "pending" })).await.unwrap();
        store.delete("orders", &id).await.unwrap();
        assert!(store.get("orders", &id).await.unwrap().is_none());
        assert!(matches!(
            store.delete("orders", &id).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_reopen_keeps_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("outlets", "north", json!({ "name": "North" })).await.unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        let docs = store.list("outlets").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "north");
    }
}
