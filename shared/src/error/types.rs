//! Error types

use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for DineHub, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Look up a detail entry
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an outlet not found error
    pub fn outlet_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::OutletNotFound, format!("Outlet {id} not found"))
            .with_detail("outlet_id", id)
    }

    /// Create an order not found error
    pub fn order_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
            .with_detail("order_id", id)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a store unavailable error
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StoreUnavailable, msg)
    }

    /// Create a configuration error with a remediation hint
    pub fn configuration(msg: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigurationError, msg).with_detail("hint", hint.into())
    }

    /// Create a static generation failure
    pub fn static_generation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StaticGenerationFailure, msg)
    }

    /// Create an empty cart error
    pub fn empty_cart() -> Self {
        Self::new(ErrorCode::EmptyCart)
    }

    /// Whether this error must abort a build
    pub fn is_build_fatal(&self) -> bool {
        self.code.is_build_fatal()
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::EmptyCart);
        assert_eq!(err.message, "Cart is empty");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::order_not_found("o-1").with_detail("outlet_id", "north");
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.detail("order_id"), Some(&Value::from("o-1")));
        assert_eq!(err.detail("outlet_id"), Some(&Value::from("north")));
    }

    #[test]
    fn test_configuration_carries_hint() {
        let err = AppError::configuration("API_URL missing", "set API_URL");
        assert!(err.is_build_fatal());
        assert_eq!(err.detail("hint"), Some(&Value::from("set API_URL")));
        assert_eq!(err.to_string(), "API_URL missing");
    }
}
