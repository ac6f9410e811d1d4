//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Pricing contract violations                    │
//! │  └── ValidationError  - Product form / input validation failures       │
//! │                                                                         │
//! │  storefront-checkout errors (separate crate)                           │
//! │  └── CheckoutError    - Session, config and I/O failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → UI message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Well-typed pricing inputs always produce a value. The caller-visible
//! failures in the pricing path are an installment plan index that does not
//! exist in the plan table, and amounts too large for `i64` cents.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An argument is outside the domain the operation accepts.
    ///
    /// ## When This Occurs
    /// - Installment plan index past the end of the plan table
    /// - A plan with zero months (cannot split into monthly payments)
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// An amount left the representable range of [`crate::Money`].
    ///
    /// ## When This Occurs
    /// - Cart or line total past `i64::MAX` cents
    /// - Interest compounding or revenue totals past the same bound
    #[error("Amount overflow while computing {operation}")]
    AmountOverflow { operation: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidArgument`].
    pub fn invalid_argument(argument: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`CoreError::AmountOverflow`].
    pub fn amount_overflow(operation: &str) -> Self {
        CoreError::AmountOverflow {
            operation: operation.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the admin product form and by pricing table checks before
/// anything reaches the pricing engine.
#[derive(Debug, Error)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. invalid UUID, blank variant).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. the same voucher code twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
