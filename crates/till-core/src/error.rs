//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CheckoutError    - Why a checkout was rejected                    │
//! │  ├── LookupError      - A catalog/promotion store failed               │
//! │  └── ValidationError  - Catalog/coupon data is malformed               │
//! │                                                                         │
//! │  till-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see: { "message": ... }      │
//! │                                                                         │
//! │  Flow: DbError → LookupError → CheckoutError → ApiError → 400          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Checkout messages are the exact strings clients already match on;
//!    context (product id, code) travels in the variant fields instead
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Reasons a checkout is rejected.
///
/// The first failing check aborts the whole computation, so a request only
/// ever produces one of these.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The customer document failed the CPF checksum.
    #[error("Invalid Customer Document")]
    InvalidDocument,

    /// A line item asked for zero or fewer units.
    #[error("Invalid Product Quantity")]
    InvalidQuantity { product_id: String, quantity: i64 },

    /// The catalog has no product with this id.
    #[error("Invalid Product ID")]
    InvalidProduct { product_id: String },

    /// The same product appears on more than one line.
    ///
    /// ## User Workflow
    /// ```text
    /// items: [ {product_1, qty 1}, {product_1, qty 1} ]
    ///      │
    ///      ▼
    /// second line: product_1 already in `seen`
    ///      │
    ///      ▼
    /// DuplicateProduct { product_id: "product_1" }
    /// ```
    #[error("Cannot add the same product multiple times")]
    DuplicateProduct { product_id: String },

    /// The coupon code does not exist. Expired coupons are not an error.
    #[error("Invalid Coupon Code")]
    InvalidCoupon { code: String },

    /// A catalog or promotion store could not answer.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl CheckoutError {
    /// Returns true for errors caused by the request itself.
    ///
    /// `false` means a collaborator failed and retrying later may succeed.
    pub fn is_validation(&self) -> bool {
        !matches!(self, CheckoutError::Lookup(_))
    }
}

// =============================================================================
// Lookup Error
// =============================================================================

/// Failure of an external store behind `CatalogLookup` / `PromotionLookup`.
///
/// "Not found" is NOT an error here; lookups return `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The backing store is unreachable or returned an error.
    #[error("{store} unavailable: {reason}")]
    Unavailable { store: String, reason: String },

    /// The store returned a record that cannot be turned into a domain value.
    #[error("Corrupt {store} record {key}: {reason}")]
    Corrupt {
        store: String,
        key: String,
        reason: String,
    },
}

impl LookupError {
    /// Creates an Unavailable error for the named store.
    pub fn unavailable(store: impl Into<String>, reason: impl Into<String>) -> Self {
        LookupError::Unavailable {
            store: store.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog and coupon data.
///
/// Raised before a product or coupon is written to a store.
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

    /// Invalid format (e.g., stray characters, NaN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., a product id inserted twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CoreResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_messages_are_stable() {
        assert_eq!(
            CheckoutError::InvalidDocument.to_string(),
            "Invalid Customer Document"
        );
        assert_eq!(
            CheckoutError::InvalidQuantity {
                product_id: "product_1".to_string(),
                quantity: -1,
            }
            .to_string(),
            "Invalid Product Quantity"
        );
        assert_eq!(
            CheckoutError::InvalidProduct {
                product_id: "nope".to_string(),
            }
            .to_string(),
            "Invalid Product ID"
        );
        assert_eq!(
            CheckoutError::DuplicateProduct {
                product_id: "product_1".to_string(),
            }
            .to_string(),
            "Cannot add the same product multiple times"
        );
        assert_eq!(
            CheckoutError::InvalidCoupon {
                code: "nope".to_string(),
            }
            .to_string(),
            "Invalid Coupon Code"
        );
    }

    #[test]
    fn test_lookup_error_is_transparent() {
        let err: CheckoutError = LookupError::unavailable("catalog", "pool closed").into();
        assert_eq!(err.to_string(), "catalog unavailable: pool closed");
        assert!(!err.is_validation());
        assert!(CheckoutError::InvalidDocument.is_validation());
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "percentage must be between 0 and 100");
    }
}
