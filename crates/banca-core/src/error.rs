//! # Error Types
//!
//! Validation errors for the checkout core.
//!
//! ## Error Hierarchy
//! ```text
//! banca-core errors (this file)
//! └── ValidationError   - Input/precondition failures, never sent remotely
//!
//! banca-checkout errors
//! ├── GatewayError      - Remote collaborator failures (auth/reject/network)
//! └── CheckoutError     - Session-level failures (wraps the two above)
//!
//! banca-receipt errors
//! └── ExportError       - Render/raster/PDF pipeline failures
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input and precondition validation errors.
///
/// These are caught BEFORE any remote collaborator is invoked: a checkout
/// that fails validation must issue zero network calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Checkout attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout attempted without an authenticated seller.
    #[error("seller identity is missing")]
    MissingSeller,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Invalid format (e.g. unparseable money amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
