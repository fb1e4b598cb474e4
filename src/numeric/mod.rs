// ============================================================================
// Numeric Module
// Exact base-10 decimal arithmetic on arbitrary-precision integers
// ============================================================================
//
// This module provides:
// - Decimal: immutable (digits, precision) fixed-point value
// - DecimalInput: the input shapes the decimal() factory coerces
// - DecimalError: error types for construction and arithmetic
//
// Design principles:
// - No binary floating point in any arithmetic path
// - Fallible operations return Result (panics only in operator sugar)
// - Values are immutable; every operation builds a new one
// - Powers of ten are memoized once per process

mod decimal;
mod errors;
mod factors;
mod input;

pub use decimal::Decimal;
pub use errors::{DecimalError, DecimalResult};
pub use input::{decimal, DecimalInput};
