//! Client error types

use crate::decode::DecodeError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Required environment value missing or malformed
    #[error("Configuration error: {message}")]
    Configuration { message: String, hint: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// Non-2xx response
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Body was not valid JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Body was JSON but had the wrong shape
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] DecodeError),

    /// Build-time outlet enumeration failed; the build must abort
    #[error("Static generation failed for {url}: {reason}")]
    StaticGeneration { url: String, reason: String },
}

impl ClientError {
    pub fn configuration(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Whether this error must abort a build
    pub fn is_build_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::StaticGeneration { .. }
        )
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Configuration { message, hint } => AppError::configuration(message, hint),
            ClientError::StaticGeneration { url, reason } => {
                AppError::static_generation(format!("Static generation failed for {url}: {reason}"))
                    .with_detail("url", url)
            }
            ClientError::Timeout { url, timeout_ms } => AppError::with_message(
                ErrorCode::TimeoutError,
                format!("Request to {url} timed out after {timeout_ms}ms"),
            ),
            ClientError::Status { url, status: 404 } => {
                AppError::not_found(url).with_detail("status", 404)
            }
            ClientError::Status { url, status } => AppError::with_message(
                ErrorCode::NetworkError,
                format!("Request to {url} failed with status {status}"),
            )
            .with_detail("status", status),
            ClientError::Http(e) => AppError::with_message(ErrorCode::NetworkError, e.to_string()),
            ClientError::InvalidResponse(msg) => {
                AppError::with_message(ErrorCode::InvalidRequest, msg)
            }
            ClientError::Decode(e) => AppError::with_message(ErrorCode::InvalidRequest, e.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
