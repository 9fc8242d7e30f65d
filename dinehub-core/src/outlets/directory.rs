use super::fallback::{fallback_outlets, synthetic_outlet};
use crate::db::store::to_body;
use crate::db::{ORDERS, OUTLETS, StoreError, StoreHandle};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_ID_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text, validate_text_len,
};
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Outlet, OutletCreate, OutletUpdate};
use shared::order::OrderStatus;

/// Outlet registry backed by the `outlets` collection
#[derive(Debug, Clone)]
pub struct OutletDirectory {
    store: StoreHandle,
}

impl OutletDirectory {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    // ========================================================================
    // Read paths (degrade to fallback data)
    // ========================================================================

    /// Every outlet, in no particular order
    ///
    /// Returns the fallback dataset when the store is unreachable or its
    /// backend fails. Documents that fail to decode are skipped and logged.
    pub async fn get_all(&self) -> AppResult<Vec<Outlet>> {
        let docs = match self.store.store() {
            Ok(store) => store.list(OUTLETS).await,
            Err(e) => Err(e),
        };
        let docs = match docs {
            Ok(docs) => docs,
            Err(e) if e.is_outage() => {
                tracing::warn!(
                    context = %self.store.context(),
                    error = %e,
                    "Outlet store unreachable; serving fallback outlets"
                );
                return Ok(fallback_outlets());
            }
            Err(e) => return Err(e.into()),
        };

        let mut outlets = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = doc.id.clone();
            match doc.decode::<Outlet>() {
                Ok(outlet) => outlets.push(outlet),
                Err(e) => tracing::error!(outlet_id = %id, error = %e, "Skipping malformed outlet document"),
            }
        }
        Ok(outlets)
    }

    /// Outlet by id; `None` when no outlet has that id
    ///
    /// Returns a synthetic outlet echoing `id` when the store is unreachable
    /// or its backend fails. A malformed document is logged and reads as
    /// `None`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Outlet>> {
        let doc = match self.store.store() {
            Ok(store) => store.get(OUTLETS, id).await,
            Err(e) => Err(e),
        };
        match doc {
            Ok(Some(doc)) => match doc.decode::<Outlet>() {
                Ok(outlet) => Ok(Some(outlet)),
                Err(e) => {
                    tracing::error!(outlet_id = %id, error = %e, "Malformed outlet document");
                    Ok(None)
                }
            },
            Ok(None) => Ok(None),
            Err(e) if e.is_outage() => {
                tracing::warn!(
                    context = %self.store.context(),
                    outlet_id = %id,
                    error = %e,
                    "Outlet store unreachable; serving synthetic outlet"
                );
                Ok(Some(synthetic_outlet(id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a real outlet with this id exists (no fallback)
    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.store.store()?.get(OUTLETS, id).await?.is_some())
    }

    // ========================================================================
    // Mutating paths (never fall back)
    // ========================================================================

    /// Create an outlet; the store assigns the id
    pub async fn create(&self, data: OutletCreate) -> AppResult<Outlet> {
        validate_create(&data)?;
        let store = self.store.store()?;
        let id = store.insert(OUTLETS, to_body(&data)?).await?;
        tracing::info!(outlet_id = %id, name = %data.name, "Outlet created");
        Ok(Outlet::from_create(id, data))
    }

    /// Merge the present fields into an existing outlet
    pub async fn update(&self, id: &str, data: OutletUpdate) -> AppResult<()> {
        validate_update(&data)?;
        let store = self.store.store()?;
        let patch = match to_body(&data)? {
            Value::Object(fields) => fields,
            _ => return Err(AppError::internal("Outlet update did not serialize to an object")),
        };
        store
            .merge(OUTLETS, id, patch)
            .await
            .map_err(|e| outlet_error(id, e))?;
        tracing::info!(outlet_id = %id, "Outlet updated");
        Ok(())
    }

    /// Remove an outlet
    ///
    /// Refused while any non-terminal order references it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let store = self.store.store()?;
        let referencing = store
            .find_by_field(ORDERS, "outletId", &Value::String(id.to_string()))
            .await?;
        // An unreadable status counts as active
        let active = referencing
            .iter()
            .filter(|doc| {
                let status = doc
                    .data
                    .get("status")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<OrderStatus>().ok());
                !matches!(status, Some(s) if s.is_terminal())
            })
            .count();
        if active > 0 {
            return Err(AppError::with_message(
                ErrorCode::OutletInUse,
                format!("Outlet {id} has {active} active order(s)"),
            )
            .with_detail("outlet_id", id)
            .with_detail("active_orders", active));
        }

        store
            .delete(OUTLETS, id)
            .await
            .map_err(|e| outlet_error(id, e))?;
        tracing::info!(outlet_id = %id, "Outlet deleted");
        Ok(())
    }

    /// Create or replace an outlet under its own id
    pub async fn upsert(&self, outlet: &Outlet) -> AppResult<()> {
        validate_required_text(&outlet.id, "id", MAX_ID_LEN)?;
        validate_create(&outlet.to_create())?;
        let store = self.store.store()?;
        store.set(OUTLETS, &outlet.id, to_body(outlet)?).await?;
        Ok(())
    }
}

fn outlet_error(id: &str, err: StoreError) -> AppError {
    match err {
        StoreError::NotFound { .. } => AppError::outlet_not_found(id),
        other => other.into(),
    }
}

fn validate_create(data: &OutletCreate) -> AppResult<()> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_text_len(&data.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_text_len(&data.image_id, "imageId", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

fn validate_update(data: &OutletUpdate) -> AppResult<()> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_optional_text(&data.image_id, "imageId", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}
