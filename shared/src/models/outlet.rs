//! Outlet Model

use serde::{Deserialize, Serialize};

/// Outlet entity (a single cafeteria or vendor location with its own queue)
///
/// Stored as one document per outlet in the `outlets` collection; the
/// document id is the outlet id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Minutes
    #[serde(default)]
    pub base_delivery_time: u32,
}

fn default_active() -> bool {
    true
}

impl Outlet {
    /// Attach an id to creation data
    pub fn from_create(id: impl Into<String>, data: OutletCreate) -> Self {
        Self {
            id: id.into(),
            name: data.name,
            description: data.description,
            image_id: data.image_id,
            is_active: data.is_active,
            base_delivery_time: data.base_delivery_time,
        }
    }

    /// Strip the id, leaving the document body
    pub fn to_create(&self) -> OutletCreate {
        OutletCreate {
            name: self.name.clone(),
            description: self.description.clone(),
            image_id: self.image_id.clone(),
            is_active: self.is_active,
            base_delivery_time: self.base_delivery_time,
        }
    }
}

/// Create outlet payload (the store assigns the id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutletCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub base_delivery_time: u32,
}

/// Update outlet payload; only present fields are merged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutletUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_delivery_time: Option<u32>,
}

impl OutletUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
