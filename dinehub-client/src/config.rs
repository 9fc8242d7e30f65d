//! API configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | API_URL / NEXT_PUBLIC_API_URL | - | Base URL of the deployed API |
//! | SKIP_STATIC_FETCH | false | `"true"` bypasses build-time enumeration |
//! | STATIC_FETCH_TIMEOUT_MS | 10000 | Per-request timeout |

use crate::{ClientError, ClientResult};
use reqwest::Url;
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const BASE_URL_HINT: &str =
    "Set API_URL (e.g. \"https://api.example.com\") in your environment or CI secrets.";

/// Configuration for the HTTP surface of the deployed API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Raw base URL as configured; validated lazily by [`ApiConfig::base_url`]
    pub base_url: Option<String>,
    /// Bypass build-time enumeration entirely
    pub skip_static_fetch: bool,
    /// Upper bound for each request
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    ///
    /// Blank values count as unset, so an empty `API_URL` falls through to
    /// `NEXT_PUBLIC_API_URL`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: var("API_URL").or_else(|| var("NEXT_PUBLIC_API_URL")),
            skip_static_fetch: var("SKIP_STATIC_FETCH").is_some_and(|v| v == "true"),
            timeout: Duration::from_millis(
                var("STATIC_FETCH_TIMEOUT_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
        }
    }

    /// Config pointing at an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            skip_static_fetch: false,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn skip_static_fetch(mut self, skip: bool) -> Self {
        self.skip_static_fetch = skip;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validated base URL
    ///
    /// Missing or non-absolute URLs are configuration errors.
    pub fn base_url(&self) -> ClientResult<Url> {
        let raw = self.base_url.as_deref().ok_or_else(|| {
            ClientError::configuration(
                "Missing API_URL environment variable needed for static generation",
                BASE_URL_HINT,
            )
        })?;
        let url = Url::parse(raw).map_err(|e| {
            ClientError::configuration(
                format!(
                    "Invalid API_URL value ({raw}): it must be an absolute URL including protocol. Caused by: {e}"
                ),
                BASE_URL_HINT,
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::configuration(
                format!("Invalid API_URL value ({raw}): unsupported scheme {}", url.scheme()),
                BASE_URL_HINT,
            ));
        }
        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> ApiConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_api_url_falls_through_to_public_url() {
        let config = from_vars(&[
            ("API_URL", ""),
            ("NEXT_PUBLIC_API_URL", "https://api.example.com"),
        ]);
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert!(config.base_url().is_ok());
    }

    #[test]
    fn test_api_url_takes_precedence() {
        let config = from_vars(&[
            ("API_URL", "https://build.example.com"),
            ("NEXT_PUBLIC_API_URL", "https://api.example.com"),
        ]);
        assert_eq!(config.base_url.as_deref(), Some("https://build.example.com"));
    }

    #[test]
    fn test_env_defaults_and_flags() {
        let config = from_vars(&[]);
        assert_eq!(config.base_url, None);
        assert!(!config.skip_static_fetch);
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));

        let config = from_vars(&[
            ("SKIP_STATIC_FETCH", "true"),
            ("STATIC_FETCH_TIMEOUT_MS", "250"),
        ]);
        assert!(config.skip_static_fetch);
        assert_eq!(config.timeout, Duration::from_millis(250));

        // Only the exact string enables the bypass
        assert!(!from_vars(&[("SKIP_STATIC_FETCH", "TRUE")]).skip_static_fetch);
        assert!(!from_vars(&[("SKIP_STATIC_FETCH", "1")]).skip_static_fetch);
    }

    #[test]
    fn test_missing_base_url_is_configuration_error() {
        let config = ApiConfig {
            base_url: None,
            skip_static_fetch: false,
            timeout: Duration::from_secs(1),
        };
        let err = config.base_url().unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[test]
    fn test_relative_url_rejected() {
        let err = ApiConfig::with_base_url("api.example.com").base_url().unwrap_err();
        assert!(err.to_string().contains("absolute URL"));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = ApiConfig::with_base_url("ftp://files.example.com")
            .base_url()
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[test]
    fn test_builder() {
        let config = ApiConfig::with_base_url("https://api.example.com/v1")
            .skip_static_fetch(true)
            .timeout(Duration::from_millis(250));
        assert!(config.skip_static_fetch);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.base_url().unwrap().path(), "/v1");
    }
}
