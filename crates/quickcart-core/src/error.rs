//! # Error Types
//!
//! Domain-specific error types for quickcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quickcart-core errors (this file)                                     │
//! │  ├── CoreError        - Checkout and cart rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quickcart-cli errors (app)                                            │
//! │  └── CliError         - Config and I/O failures, wraps CoreError       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts)
//! 3. Errors are enum variants, never String

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout errors.
///
/// Every variant is fatal to the operation that raised it and leaves cart,
/// balance and stock exactly as they were before that operation started.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot checkout with an empty cart")]
    EmptyCart,

    /// A product cannot be sold in the requested quantity right now.
    ///
    /// ## When This Occurs
    /// - Requested quantity exceeds current stock
    /// - A perishable product is past its expiry date
    ///
    /// Raised both by [`ShoppingCart::add`](crate::ShoppingCart::add) and by
    /// the availability re-check at the start of checkout.
    #[error("Product {product} is not available: {reason}")]
    Unavailable {
        product: String,
        reason: Unavailability,
    },

    /// The customer cannot pay the checkout total.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Money, available: Money },

    /// A cart line refers to a product the inventory does not know.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Committing a sale would drive stock negative.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Why a product failed the availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailability {
    OutOfStock { available: i64, requested: i64 },
    Expired { expired_at: DateTime<Utc> },
}

impl std::fmt::Display for Unavailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unavailability::OutOfStock {
                available,
                requested,
            } => write!(f, "requested {}, only {} in stock", requested, available),
            Unavailability::Expired { expired_at } => {
                write!(f, "expired on {}", expired_at.format("%Y-%m-%d"))
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any business rule runs.
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

    /// Value could not be parsed.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
    use chrono::TimeZone;

    #[test]
    fn test_error_messages() {
        let err = CoreError::Unavailable {
            product: "Biscuits".to_string(),
            reason: Unavailability::OutOfStock {
                available: 5,
                requested: 10,
            },
        };
        assert_eq!(
            err.to_string(),
            "Product Biscuits is not available: requested 10, only 5 in stock"
        );

        let err = CoreError::InsufficientBalance {
            required: Money::from_major(10030),
            available: Money::from_major(120),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: required $10030.00, available $120.00"
        );

        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Cannot checkout with an empty cart"
        );
    }

    #[test]
    fn test_expired_message() {
        let expired_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let err = CoreError::Unavailable {
            product: "Expired Cheese".to_string(),
            reason: Unavailability::Expired { expired_at },
        };
        assert_eq!(
            err.to_string(),
            "Product Expired Cheese is not available: expired on 2024-03-01"
        );
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
