//! Input validation helpers
//!
//! Text limits for outlet records and order lines.

use rust_decimal::Decimal;
use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Outlet names
pub const MAX_NAME_LEN: usize = 200;

/// Outlet descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Image ids and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Document ids supplied by callers (seeding, menu item ids)
pub const MAX_ID_LEN: usize = 128;

// ── Order line limits ───────────────────────────────────────────────

/// Units of one menu item on a cart or order line
pub const MAX_QUANTITY: u32 = 10_000;

/// Largest accepted unit price
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that a string, possibly empty, is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_text_len(v, field, max_len)?;
    }
    Ok(())
}

/// Validate an order line quantity (positive, at most [`MAX_QUANTITY`])
pub fn validate_quantity(quantity: u32, field: &str) -> Result<(), AppError> {
    if quantity == 0 {
        return Err(AppError::validation(format!("{field} must be positive")));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "{field} is too large ({quantity}, max {MAX_QUANTITY})"
        )));
    }
    Ok(())
}

/// Validate a unit price (non-negative, at most [`MAX_UNIT_PRICE`])
pub fn validate_price(price: Decimal, field: &str) -> Result<(), AppError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    if price > MAX_UNIT_PRICE {
        return Err(AppError::validation(format!(
            "{field} is too large ({price}, max {MAX_UNIT_PRICE})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("North Cafe", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(validate_required_text("abcdef", "name", 5).is_err());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert!(validate_text_len("café", "name", 4).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "description", 3).is_ok());
        assert!(validate_optional_text(&Some("abcd".into()), "description", 3).is_err());
    }

    #[test]
    fn test_quantity_and_price() {
        assert!(validate_quantity(0, "quantity").is_err());
        assert!(validate_quantity(1, "quantity").is_ok());
        assert!(validate_price(Decimal::ZERO, "unitPrice").is_ok());
        assert!(validate_price(Decimal::new(-1, 2), "unitPrice").is_err());
        assert!(validate_price(MAX_UNIT_PRICE, "unitPrice").is_ok());
        assert!(validate_price(Decimal::MAX, "unitPrice").is_err());
        assert!(validate_quantity(MAX_QUANTITY, "quantity").is_ok());
        assert!(validate_quantity(MAX_QUANTITY + 1, "quantity").is_err());
    }
}
