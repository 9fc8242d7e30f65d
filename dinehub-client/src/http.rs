// dinehub-client/src/http.rs
// HTTP client for the deployed API

use crate::{ApiConfig, ClientError, ClientResult};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

/// Network HTTP client bound to one base URL and one timeout
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl NetworkHttpClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Validated base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ClientError::configuration(
                    format!("API_URL {} cannot be used as a base URL", self.base_url),
                    "Use an http(s) URL such as \"https://api.example.com\".",
                )
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// GET a JSON document
    ///
    /// Non-2xx statuses, timeouts and unparseable bodies are all errors; no
    /// retry is attempted.
    pub async fn get_json(&self, url: Url) -> ClientResult<Value> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| self.classify(&url, e))?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{url}: body is not JSON: {e}")))
    }

    fn classify(&self, url: &Url, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ClientError::Http(err)
        }
    }
}
