// ============================================================================
// Decimal Errors
// Error types for decimal construction and arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur while constructing or combining decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalError {
    /// Input string or value could not be interpreted as a decimal
    InvalidInput,
    /// Attempted division by a zero-valued decimal
    DivideByZero,
    /// Requested precision or exponent outside the supported scale range
    UnsupportedPrecision,
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::InvalidInput => write!(f, "invalid input: could not parse value"),
            DecimalError::DivideByZero => write!(f, "division by zero"),
            DecimalError::UnsupportedPrecision => {
                write!(f, "unsupported precision: outside the representable scale range")
            },
        }
    }
}

impl std::error::Error for DecimalError {}

/// Result type alias for decimal operations
pub type DecimalResult<T> = Result<T, DecimalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DecimalError::InvalidInput.to_string(),
            "invalid input: could not parse value"
        );
        assert_eq!(DecimalError::DivideByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(DecimalError::InvalidInput, DecimalError::InvalidInput);
        assert_ne!(DecimalError::InvalidInput, DecimalError::DivideByZero);
    }
}
