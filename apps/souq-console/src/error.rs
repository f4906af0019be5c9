//! # Console Error Type
//!
//! Unified error type for the shell.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Souq POS                               │
//! │                                                                         │
//! │  input line                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  split / clap parse ─── Usage, UnbalancedQuotes ──┐                    │
//! │      │                                            │                    │
//! │      ▼                                            ▼                    │
//! │  Supermarket op ──── CoreError ─────────────► ConsoleError ──► status  │
//! │      │                                                         line   │
//! │      ▼                                                                  │
//! │  render ─────────────────────────────────────────────────────► output  │
//! │                                                                         │
//! │  Startup only: Config / ConfigParse / Io abort the process.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In JSON mode a failed command prints:
//! ```json
//! { "error": { "code": "INSUFFICIENT_STOCK", "message": "Insufficient stock for 0001: available 3, requested 5" } }
//! ```

use serde::Serialize;
use souq_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A store operation failed; state is unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The line didn't match the command grammar.
    #[error("{}", .0.to_string().trim_end())]
    Usage(#[from] clap::Error),

    #[error("Unbalanced quotes in: {0}")]
    UnbalancedQuotes(String),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for console results.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Machine-readable error codes for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    InsufficientStock,
    CartError,
    QueueError,
    Duplicate,
    Usage,
    Config,
    Internal,
}

impl ConsoleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConsoleError::Core(core) => match core {
                CoreError::ProductNotFound(_)
                | CoreError::CustomerNotFound(_)
                | CoreError::CashierNotFound(_) => ErrorCode::NotFound,
                CoreError::InvalidQuantity(_) | CoreError::Validation(_) => {
                    ErrorCode::ValidationError
                }
                CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
                CoreError::NoActionsToUndo
                | CoreError::NothingToUndo(_)
                | CoreError::CouponAlreadyApplied(_)
                | CoreError::InvalidCoupon(_)
                | CoreError::EmptyCart(_) => ErrorCode::CartError,
                CoreError::EmptyQueue(_)
                | CoreError::NoSalesToUndo(_)
                | CoreError::NotOnlineCustomer(_) => ErrorCode::QueueError,
                CoreError::DuplicateProduct(_) | CoreError::DuplicateCustomer(_) => {
                    ErrorCode::Duplicate
                }
            },
            ConsoleError::Usage(_) | ConsoleError::UnbalancedQuotes(_) => ErrorCode::Usage,
            ConsoleError::Config(_) | ConsoleError::ConfigParse(_) => ErrorCode::Config,
            ConsoleError::Io(_) | ConsoleError::Json(_) => ErrorCode::Internal,
        }
    }
}
