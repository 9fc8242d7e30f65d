//! Outlet detail lookups for server-rendered pages
//!
//! Unlike static enumeration, failures here are not fatal: a missing or
//! unreachable outlet renders as "not found".

use crate::decode::{OutletSummary, decode_outlet_summary};
use crate::{ApiConfig, ClientResult, NetworkHttpClient};

#[derive(Debug, Clone)]
pub struct OutletApi {
    http: NetworkHttpClient,
}

impl OutletApi {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }

    /// `GET {API_URL}/outlets/{id}`; `None` on any failure
    pub async fn fetch_outlet(&self, outlet_id: &str) -> Option<OutletSummary> {
        match self.try_fetch_outlet(outlet_id).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(outlet_id = %outlet_id, error = %e, "Outlet lookup failed");
                None
            }
        }
    }

    /// Same lookup, keeping the failure reason
    pub async fn try_fetch_outlet(&self, outlet_id: &str) -> ClientResult<OutletSummary> {
        let url = self.http.endpoint(&["outlets", outlet_id])?;
        let body = self.http.get_json(url).await?;
        Ok(decode_outlet_summary(outlet_id, body)?)
    }
}
