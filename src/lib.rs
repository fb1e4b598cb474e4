// ============================================================================
// Exact Decimal Library
// Exact base-10 fixed-point arithmetic on arbitrary-precision integers
// ============================================================================

//! # Exact Decimal
//!
//! Exact, base-10, fixed-point decimal arithmetic for money and quantity
//! math, backed by arbitrary-precision integers.
//!
//! A [`Decimal`](numeric::Decimal) is the immutable pair
//! `digits / 10^precision`. Parsing, rescaling, and arithmetic all work on
//! the integer numerator, so binary rounding error never accumulates; the
//! only rounding is the explicit half-away-from-zero rule applied when
//! precision decreases.
//!
//! ## Example
//!
//! ```rust
//! use exact_decimal::prelude::*;
//!
//! let subtotal = decimal("12.34")?;
//! let tax = subtotal.mul("0.0825")?.with_precision(2);
//! let total = subtotal.add(&tax)?;
//! assert_eq!(tax.to_string(), "1.02");
//! assert_eq!(total.to_string(), "13.36");
//!
//! // Different precisions can represent the same value
//! assert!(decimal("1.23")?.eq("1.230")?);
//! assert_eq!(decimal("1.23000")?.normalise().to_string(), "1.23");
//! # Ok::<(), DecimalError>(())
//! ```

pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::numeric::{decimal, Decimal, DecimalError, DecimalInput, DecimalResult};
}
