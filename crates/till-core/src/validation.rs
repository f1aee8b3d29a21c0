//! # Validation Module
//!
//! Input validation for catalog and coupon data, plus the quantity rule the
//! checkout engine applies to every line item.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Store insert (ProductRepository, InMemoryCatalog, ...)       │
//! │  └── THIS MODULE: validate_product / validate_coupon                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── PRIMARY KEY on product id and coupon code                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout                                                     │
//! │  └── validate_quantity on each line, then engine rules                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_coupon_code, validate_quantity};
//!
//! assert!(validate_coupon_code("10OFF").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, Dimensions, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product id or coupon code accepted.
pub const MAX_KEY_LENGTH: usize = 64;

/// Longest product description accepted.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

fn validate_key(field: &str, value: &str) -> ValidationResult<()> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if trimmed.len() != value.len() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not have leading or trailing whitespace".to_string(),
        });
    }

    if value.len() > MAX_KEY_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_KEY_LENGTH,
        });
    }

    Ok(())
}

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty
/// - No surrounding whitespace
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    validate_key("product id", id)
}

/// Validates a coupon code. Same rules as product ids.
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    validate_key("coupon code", code)
}

/// Validates a product description (at most 200 characters, may be empty).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout: for each line item                                          │
/// │                                                                         │
/// │  validate_quantity(item.quantity) ← THIS FUNCTION                      │
/// │       │                                                                 │
/// │       ├── qty <= 0? → CheckoutError::InvalidQuantity                   │
/// │       │                                                                 │
/// │       └── OK → catalog lookup                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price: finite and >= 0. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates package dimensions: each side finite and > 0.
///
/// A zero side would make the freight density undefined.
pub fn validate_dimensions(dimensions: &Dimensions) -> ValidationResult<()> {
    validate_positive("height", dimensions.height)?;
    validate_positive("width", dimensions.width)?;
    validate_positive("depth", dimensions.depth)?;
    Ok(())
}

/// Validates a package weight: finite and >= 0.
pub fn validate_weight(weight: f64) -> ValidationResult<()> {
    if !weight.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "weight".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if weight < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "weight".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a coupon percentage (0-100).
pub fn validate_percentage(percentage: u32) -> ValidationResult<()> {
    if percentage > 100 {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a product before it enters a store.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_description(&product.description)?;
    validate_price(product.unit_price)?;
    validate_dimensions(&product.dimensions)?;
    validate_weight(product.weight)?;
    Ok(())
}

/// Validates every field of a coupon before it enters a store.
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    validate_coupon_code(&coupon.code)?;
    validate_percentage(coupon.percentage)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_keys() {
        assert!(validate_product_id("product_1").is_ok());
        assert!(validate_coupon_code("10OFF").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(" product_1").is_err());
        assert!(validate_coupon_code(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("Product A").is_ok());
        assert!(validate_description(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::new(10.99)).is_ok());
        assert!(validate_price(Money::new(-1.0)).is_err());
        assert!(validate_price(Money::new(f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(&Dimensions::new(20.0, 15.0, 10.0)).is_ok());
        assert!(validate_dimensions(&Dimensions::new(0.0, 15.0, 10.0)).is_err());
        assert!(validate_dimensions(&Dimensions::new(20.0, -1.0, 10.0)).is_err());
        assert!(validate_dimensions(&Dimensions::new(20.0, 15.0, f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(3.0).is_ok());
        assert!(validate_weight(-0.5).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(0).is_ok());
        assert!(validate_percentage(100).is_ok());
        assert!(validate_percentage(101).is_err());
    }

    #[test]
    fn test_validate_product() {
        let product = Product {
            id: "product_1".to_string(),
            description: "Product A".to_string(),
            unit_price: Money::new(10.0),
            dimensions: Dimensions::new(20.0, 15.0, 10.0),
            weight: 1.0,
        };
        assert!(validate_product(&product).is_ok());

        let negative = Product {
            unit_price: Money::new(-0.01),
            ..product
        };
        assert!(validate_product(&negative).is_err());
    }
}
