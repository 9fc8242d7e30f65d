//! Unified error codes for DineHub
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 3xxx: Outlet errors
//! - 4xxx: Order errors
//! - 5xxx: Cart errors
//! - 8xxx: Build errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they survive
/// serialization to any consumer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 2xxx: Permission ====================
    /// Caller is not staff for the requested outlet
    PermissionDenied = 2001,

    // ==================== 3xxx: Outlet ====================
    /// Outlet not found
    OutletNotFound = 3001,
    /// Outlet is still referenced by active orders
    OutletInUse = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Requested status change violates the order state machine
    IllegalTransition = 4002,
    /// Order has no items
    OrderEmpty = 4003,

    // ==================== 5xxx: Cart ====================
    /// Checkout attempted on an empty cart
    EmptyCart = 5001,
    /// Cart entry not found
    CartItemNotFound = 5002,

    // ==================== 8xxx: Build ====================
    /// Required configuration missing or malformed
    ConfigurationError = 8001,
    /// Build-time outlet enumeration failed
    StaticGenerationFailure = 8002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Backing store unreachable
    StoreUnavailable = 9002,
    /// Network error
    NetworkError = 9003,
    /// Request timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            ErrorCode::PermissionDenied => "Permission denied",

            ErrorCode::OutletNotFound => "Outlet not found",
            ErrorCode::OutletInUse => "Outlet is referenced by active orders",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::IllegalTransition => "Illegal order status transition",
            ErrorCode::OrderEmpty => "Order has no items",

            ErrorCode::EmptyCart => "Cart is empty",
            ErrorCode::CartItemNotFound => "Cart item not found",

            ErrorCode::ConfigurationError => "Configuration error",
            ErrorCode::StaticGenerationFailure => "Static generation failed",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreUnavailable => "Backing store unavailable",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Request timed out",
        }
    }

    /// Whether failures with this code must abort a build
    pub const fn is_build_fatal(&self) -> bool {
        matches!(
            self,
            ErrorCode::ConfigurationError | ErrorCode::StaticGenerationFailure
        )
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            2001 => Ok(ErrorCode::PermissionDenied),

            3001 => Ok(ErrorCode::OutletNotFound),
            3002 => Ok(ErrorCode::OutletInUse),

            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::IllegalTransition),
            4003 => Ok(ErrorCode::OrderEmpty),

            5001 => Ok(ErrorCode::EmptyCart),
            5002 => Ok(ErrorCode::CartItemNotFound),

            8001 => Ok(ErrorCode::ConfigurationError),
            8002 => Ok(ErrorCode::StaticGenerationFailure),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StoreUnavailable),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::OutletInUse.code(), 3002);
        assert_eq!(ErrorCode::IllegalTransition.code(), 4002);
        assert_eq!(ErrorCode::EmptyCart.code(), 5001);
        assert_eq!(ErrorCode::StaticGenerationFailure.code(), 8002);
        assert_eq!(ErrorCode::StoreUnavailable.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trip() {
        let codes = [
            ErrorCode::ValidationFailed,
            ErrorCode::OrderNotFound,
            ErrorCode::CartItemNotFound,
            ErrorCode::ConfigurationError,
            ErrorCode::TimeoutError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::IllegalTransition).unwrap();
        assert_eq!(json, "4002");
        let parsed: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(parsed, ErrorCode::EmptyCart);
        assert!(serde_json::from_str::<ErrorCode>("7777").is_err());
    }

    #[test]
    fn test_build_fatal_codes() {
        assert!(ErrorCode::ConfigurationError.is_build_fatal());
        assert!(ErrorCode::StaticGenerationFailure.is_build_fatal());
        assert!(!ErrorCode::StoreUnavailable.is_build_fatal());
    }
}
