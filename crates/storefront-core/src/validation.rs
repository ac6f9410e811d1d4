//! # Validation Module
//!
//! Input validation for the admin product form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: App form                                                     │
//! │  ├── Empty-field checks, numeric keyboard for price                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules before a product is saved to the store             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Document store security rules                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{parse_price, validate_product_name};
//!
//! assert!(validate_product_name("iPhone 15").is_ok());
//! assert!(parse_price("-1").is_err());
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CATEGORY_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_OPTIONS_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name, MAX_NAME_LEN)
}

/// Validates a product category.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_required_text("category", category, MAX_CATEGORY_LEN)
}

/// Validates a product description. May be empty.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Validates the specification string picked on the form.
///
/// ```rust
/// use storefront_core::validation::validate_options;
///
/// assert!(validate_options("64GB/8GB RAM").is_ok());
/// assert!(validate_options("").is_err());
/// ```
pub fn validate_options(options: &str) -> ValidationResult<()> {
    validate_required_text("options", options, MAX_OPTIONS_LEN)
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
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

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses the price text typed into the product form.
///
/// ## Rules
/// - Plain decimal number, surrounding whitespace ignored
/// - At most two decimal places
/// - Non-negative
///
/// ```rust
/// use storefront_core::validation::parse_price;
///
/// assert_eq!(parse_price("12.99").unwrap().cents(), 1299);
/// assert_eq!(parse_price(" 1200 ").unwrap().cents(), 120000);
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("1.999").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    };

    let amount = Decimal::from_str(input).map_err(|_| invalid("must be a number"))?;
    if amount.normalize().scale() > 2 {
        return Err(invalid("at most two decimal places"));
    }

    let price = Money::from_decimal(amount).ok_or_else(|| invalid("too large"))?;
    validate_price_cents(price.cents())?;
    Ok(price)
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items)
///
/// ```rust
/// use storefront_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Runs every field check on a product from the add/edit form.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price_cents(product.price_cents)?;
    validate_description(&product.description)?;
    validate_options(&product.options)?;
    validate_category(&product.category)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Galaxy Buds".to_string(),
            price_cents: 12_900,
            description: "Wireless earbuds".to_string(),
            image_url: Some("https://cdn.example.com/buds.png".to_string()),
            owner_id: "admin".to_string(),
            options: "Black".to_string(),
            category: "audio".to_string(),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Galaxy Buds").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        // Counted in characters, not bytes
        assert!(validate_product_name(&"Đ".repeat(200)).is_ok());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("0").unwrap(), Money::zero());
        assert_eq!(parse_price("19.9").unwrap().cents(), 1990);
        assert_eq!(parse_price("5.50").unwrap().cents(), 550);
        // Trailing zeros past the cents are harmless
        assert_eq!(parse_price("5.5000").unwrap().cents(), 550);

        assert!(matches!(parse_price(""), Err(ValidationError::Required { .. })));
        assert!(matches!(parse_price("-3"), Err(ValidationError::OutOfRange { .. })));
        assert!(matches!(parse_price("12,5"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_price("0.001"), Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn test_validate_options() {
        assert!(validate_options("256GB").is_ok());
        assert!(validate_options("8GB RAM/256GB").is_ok());
        assert!(matches!(
            validate_options("   "),
            Err(ValidationError::Required { field }) if field == "options"
        ));
        assert!(validate_options(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product()).is_ok());

        let mut bad = product();
        bad.category = String::new();
        assert!(matches!(
            validate_product(&bad),
            Err(ValidationError::Required { field }) if field == "category"
        ));

        let mut bad = product();
        bad.price_cents = -1;
        assert!(validate_product(&bad).is_err());

        let mut bad = product();
        bad.description = "x".repeat(2001);
        assert!(validate_product(&bad).is_err());
    }
}
