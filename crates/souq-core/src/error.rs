//! # Error Types
//!
//! Domain-specific error types for souq-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  souq-core errors (this file)                                          │
//! │  ├── CoreError        - Cart, stock, queue and checkout failures       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  souq-console errors (app)                                             │
//! │  └── ConsoleError     - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ConsoleError → status line        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable. A failed operation leaves state unchanged
//! and the operator decides whether to retry with corrected input.

use thiserror::Error;


// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A zero or negative quantity was supplied to add/remove.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// Barcode is not in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer id is not registered.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Cashier index is out of range.
    #[error("Cashier not found: {0}")]
    CashierNotFound(usize),

    /// Requested quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// add-item C1 0001 60
    ///      │
    ///      ▼
    /// Check stock: available=50
    ///      │
    ///      ▼
    /// InsufficientStock { barcode: "0001", available: 50, requested: 60 }
    /// ```
    #[error("Insufficient stock for {barcode}: available {available}, requested {requested}")]
    InsufficientStock {
        barcode: String,
        available: i64,
        requested: i64,
    },

    /// The cart's action log is empty.
    #[error("No actions to undo")]
    NoActionsToUndo,

    /// Undoing an add found nothing left in the cart to take back.
    #[error("Nothing to remove from cart for {0}")]
    NothingToUndo(String),

    /// A coupon is already attached to this cart.
    #[error("A coupon has already been applied ({0})")]
    CouponAlreadyApplied(String),

    /// Code is not in the coupon catalog (matched case-sensitively).
    #[error("Invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// Checkout was triggered on an empty queue.
    #[error("No customers waiting in {0}")]
    EmptyQueue(String),

    /// Dequeued customer has nothing in the cart; no sale is made.
    #[error("Customer {0} has an empty cart")]
    EmptyCart(String),

    /// Cashier has no completed sales left to reverse.
    #[error("No bills to undo at {0}")]
    NoSalesToUndo(String),

    /// Barcode already registered.
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    /// Customer id already registered.
    #[error("Customer already exists: {0}")]
    DuplicateCustomer(String),

    /// Online order requested for a walk-in or special customer.
    #[error("Not an online customer: {0}")]
    NotOnlineCustomer(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state is touched, when operator input doesn't meet
/// the field rules in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., bad date, bad amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            barcode: "0001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 0001: available 3, requested 5"
        );
        assert_eq!(
            CoreError::NoSalesToUndo("CASH2".to_string()).to_string(),
            "No bills to undo at CASH2"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        assert_eq!(err.to_string(), "barcode is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
