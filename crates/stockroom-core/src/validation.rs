//! # Validation Module
//!
//! Input validation for Stockroom requests.
//!
//! Validation runs at the API boundary, before any business logic. The
//! database constraints (NOT NULL, UNIQUE, foreign keys) remain the last
//! line of defense; these checks exist to fail fast with a usable message.

use crate::error::ValidationError;
use crate::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SKU_LEN, MAX_USERNAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// Non-empty, at most [`MAX_SKU_LEN`] characters, alphanumeric plus
/// hyphens and underscores.
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an item or category name: non-empty, bounded length.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a username: non-empty, bounded, no whitespace.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates an optional transaction note.
pub fn validate_note(note: Option<&str>) -> ValidationResult<()> {
    if let Some(note) = note {
        if note.len() > MAX_NOTE_LEN {
            return Err(ValidationError::TooLong {
                field: "note".to_string(),
                max: MAX_NOTE_LEN,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a ledger quantity: strictly positive.
///
/// Applies to sales and to every movement kind. In/Out are deltas and
/// Adjust carries the new absolute value, but a zero is meaningless in all
/// of them - emptying an item is expressed as an OUT of everything on
/// hand, which keeps every ledger row meaningful.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a price in cents: must not be negative.
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("TEA-001").is_ok());
        assert!(validate_sku("  TEA_001  ").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("BAD SKU").is_err());
        assert!(validate_sku(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("two words").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(5).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price_cents("salePrice", 350).is_ok());
        assert!(validate_price_cents("salePrice", -1).is_err());
    }
}
