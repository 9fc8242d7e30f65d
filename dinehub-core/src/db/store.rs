//! Document store abstraction
//!
//! A store holds named collections of JSON documents keyed by document id.
//! The id lives in the key, not in the body. Every call is independently
//! atomic; nothing spans two documents.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached from this execution context
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend failed mid-operation
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// The store could not serve the call at all (unreachable or failing
    /// backend), as opposed to a bad document or a missing record
    pub fn is_outage(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Backend(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A stored document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Decode into a typed record, injecting the document id as `id`
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> StoreResult<T> {
        let mut data = self.data;
        if let Value::Object(fields) = &mut data {
            fields.insert("id".to_string(), Value::String(self.id));
        }
        Ok(serde_json::from_value(data)?)
    }
}

/// Serialize a record into a document body, dropping any `id` field
pub fn to_body<T: serde::Serialize>(record: &T) -> StoreResult<Value> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(fields) = &mut value {
        fields.remove("id");
    }
    Ok(value)
}

/// Backing store for outlets and orders
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Every document in a collection; order is unspecified
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Insert with a store-assigned id; returns the id
    async fn insert(&self, collection: &str, data: Value) -> StoreResult<String>;

    /// Create or replace the document with this id
    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()>;

    /// Merge top-level fields into an existing document
    async fn merge(&self, collection: &str, id: &str, patch: Map<String, Value>)
    -> StoreResult<()>;

    /// Merge only while top-level `field` still equals `expected`
    ///
    /// Check and write are one atomic step. Returns `false`, writing
    /// nothing, when the field differs.
    async fn merge_if(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        expected: &Value,
        patch: Map<String, Value>,
    ) -> StoreResult<bool>;

    /// Remove an existing document
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Documents whose top-level `field` equals `value`
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        Ok(self
            .list(collection)
            .await?
            .into_iter()
            .filter(|doc| doc.data.get(field) == Some(value))
            .collect())
    }
}

/// New store-assigned document id
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Apply a top-level merge to a document body
pub(crate) fn merge_into(body: &mut Value, patch: Map<String, Value>) {
    match body {
        Value::Object(fields) => {
            for (key, value) in patch {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        other => {
            let mut fields = patch;
            fields.remove("id");
            *other = Value::Object(fields);
        }
    }
}
