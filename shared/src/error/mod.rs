//! Unified error system for DineHub
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 3xxx: Outlet errors
//! - 4xxx: Order errors
//! - 5xxx: Cart errors
//! - 8xxx: Build errors (always fatal at build time)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::EmptyCart);
//! assert_eq!(err.code, ErrorCode::EmptyCart);
//!
//! let err = AppError::validation("quantity must be positive")
//!     .with_detail("field", "quantity");
//! assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
