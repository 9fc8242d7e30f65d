//! Build-time enumeration of outlet ids
//!
//! Drives pre-rendering of one page per outlet. Talks to the deployed API,
//! never to the store directly.
//!
//! # Failure policy
//!
//! ```text
//! SKIP_STATIC_FETCH=true ──▶ Ok([])            (no network call)
//! API_URL missing/invalid ─▶ Configuration     (fatal)
//! non-2xx / timeout / transport error / non-array body
//!                         ─▶ StaticGeneration  (fatal)
//! ```
//!
//! There is no fallback: a partial page set is worse than a failed build.

use crate::decode::decode_outlet_ids;
use crate::{ApiConfig, ClientError, ClientResult, NetworkHttpClient};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Route parameters for one pre-rendered outlet page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletParams {
    #[serde(rename = "outletId")]
    pub outlet_id: String,
}

/// Resolves the outlet ids to pre-render
#[derive(Debug, Clone)]
pub struct StaticParamResolver {
    config: ApiConfig,
}

impl StaticParamResolver {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch every outlet id from `GET {API_URL}/outlets`
    pub async fn resolve_outlet_ids(&self) -> ClientResult<Vec<String>> {
        if self.config.skip_static_fetch {
            tracing::warn!("SKIP_STATIC_FETCH=true: skipping network fetch for static outlet params");
            return Ok(Vec::new());
        }

        let client = NetworkHttpClient::new(&self.config)?;
        let url = client.endpoint(&["outlets"])?;
        let fail = |reason: String| {
            tracing::error!(url = %url, reason = %reason, "Static outlet enumeration failed");
            ClientError::StaticGeneration {
                url: url.to_string(),
                reason,
            }
        };

        let body = client
            .get_json(url.clone())
            .await
            .map_err(|e| fail(e.to_string()))?;
        let ids = decode_outlet_ids(&body).map_err(|e| fail(e.to_string()))?;

        let mut seen = HashSet::with_capacity(ids.len());
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if seen.insert(id.clone()) {
                unique.push(id);
            } else {
                tracing::warn!(outlet_id = %id, "Duplicate outlet id in API response, skipping");
            }
        }

        tracing::info!(count = unique.len(), url = %url, "Resolved static outlet params");
        Ok(unique)
    }

    /// Same as [`Self::resolve_outlet_ids`], shaped as route params
    pub async fn generate_static_params(&self) -> ClientResult<Vec<OutletParams>> {
        Ok(self
            .resolve_outlet_ids()
            .await?
            .into_iter()
            .map(|outlet_id| OutletParams { outlet_id })
            .collect())
    }
}
