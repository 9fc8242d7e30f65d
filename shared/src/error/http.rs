//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::OutletNotFound
            | Self::OrderNotFound
            | Self::CartItemNotFound => StatusCode::NOT_FOUND,

            Self::OutletInUse | Self::IllegalTransition => StatusCode::CONFLICT,

            Self::PermissionDenied => StatusCode::FORBIDDEN,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::EmptyCart => StatusCode::BAD_REQUEST,

            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::NetworkError => StatusCode::BAD_GATEWAY,
            Self::TimeoutError => StatusCode::GATEWAY_TIMEOUT,

            Self::Unknown
            | Self::ConfigurationError
            | Self::StaticGenerationFailure
            | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
