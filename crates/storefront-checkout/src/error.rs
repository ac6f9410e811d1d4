//! # Checkout Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Session      │  │      Pricing            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  EmptyCart      │  │  Core(CoreError)        │ │
//! │  │  ConfigSave     │  │  PaymentMethod  │  │  (bad plan index,       │ │
//! │  │  Io / Toml      │  │  Required       │  │   amount overflow)      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::CoreError;
use thiserror::Error;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[derive(Debug, Error)]
pub enum CheckoutError {
    // =========================================================================
    // Session Errors
    // =========================================================================
    /// Checkout was confirmed with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Checkout was confirmed before a payment method was chosen.
    #[error("Select a payment method before confirming checkout")]
    PaymentMethodRequired,

    /// Pricing or validation failure from storefront-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid checkout configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CheckoutError::EmptyCart.to_string(),
            "Cannot check out an empty cart"
        );

        let core = CoreError::invalid_argument("plan_index", "index 5 out of range (0..3)");
        let err: CheckoutError = core.into();
        assert_eq!(
            err.to_string(),
            "Invalid argument `plan_index`: index 5 out of range (0..3)"
        );
    }
}
