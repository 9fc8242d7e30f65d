//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx, 1xxx)
    General,
    /// Permission errors (2xxx)
    Permission,
    /// Outlet errors (3xxx)
    Outlet,
    /// Order errors (4xxx)
    Order,
    /// Cart errors (5xxx)
    Cart,
    /// Build errors (8xxx)
    Build,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..2000 => Self::General,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Outlet,
            4000..5000 => Self::Order,
            5000..6000 => Self::Cart,
            8000..9000 => Self::Build,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Permission => "permission",
            Self::Outlet => "outlet",
            Self::Order => "order",
            Self::Cart => "cart",
            Self::Build => "build",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3002), ErrorCategory::Outlet);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Cart);
        assert_eq!(ErrorCategory::from_code(8002), ErrorCategory::Build);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(6500), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::EmptyCart.category(), ErrorCategory::Cart);
        assert_eq!(
            ErrorCode::StaticGenerationFailure.category(),
            ErrorCategory::Build
        );
        assert_eq!(ErrorCode::StoreUnavailable.category().name(), "system");
    }
}
