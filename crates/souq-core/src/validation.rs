//! # Validation Module
//!
//! Input validation for operator-supplied fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console shell (souq-console)                                 │
//! │  ├── Argument count and shape (clap)                                   │
//! │  └── Number / date parsing                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules: non-empty, length, ranges, formats                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Domain operations                                            │
//! │  ├── Unique barcode / customer id                                      │
//! │  └── Stock never negative                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use souq_core::validation::{validate_barcode, validate_priority};
//!
//! validate_barcode("0001").unwrap();
//! assert!(validate_priority(11).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ONLINE_PRIORITY, MAX_PRICE_PIASTRES, MAX_STOCK, MIN_ONLINE_PRIORITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format accepted for product expiry.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product barcode.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Letters, digits, hyphens only
///
/// ## Example
/// ```rust
/// use souq_core::validation::validate_barcode;
///
/// assert!(validate_barcode("0012").is_ok());
/// assert!(validate_barcode("").is_err());
/// assert!(validate_barcode("00 12").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    validate_text("barcode", barcode, 32)?;

    if !barcode
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only letters, digits and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or customer display name.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, 100)
}

pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category, 50)
}

/// Validates a customer id. Ids are free-form but must not contain
/// whitespace so they can be typed as a single shell argument.
pub fn validate_customer_id(id: &str) -> ValidationResult<()> {
    validate_text("customer id", id, 32)?;

    if id.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "customer id".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

pub fn validate_address(address: &str) -> ValidationResult<()> {
    validate_text("address", address, 200)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - At most [`MAX_PRICE_PIASTRES`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_PIASTRES).contains(&price.piastres()) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_PIASTRES,
        });
    }

    Ok(())
}

/// Validates a stock level (0 through [`MAX_STOCK`]).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates an online order priority.
///
/// ## Rules
/// - 1 (served first) through 10
pub fn validate_priority(priority: u8) -> ValidationResult<()> {
    if !(MIN_ONLINE_PRIORITY..=MAX_ONLINE_PRIORITY).contains(&priority) {
        return Err(ValidationError::OutOfRange {
            field: "priority".to_string(),
            min: MIN_ONLINE_PRIORITY as i64,
            max: MAX_ONLINE_PRIORITY as i64,
        });
    }

    Ok(())
}

/// Validates a discount rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_discount_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses and validates an expiry date in `YYYY-MM-DD` form.
///
/// ## Example
/// ```rust
/// use souq_core::validation::parse_expiry;
///
/// assert!(parse_expiry("2025-12-01").is_ok());
/// assert!(parse_expiry("2025-02-30").is_err());
/// assert!(parse_expiry("01/12/2025").is_err());
/// ```
pub fn parse_expiry(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), EXPIRY_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: "expiry".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
