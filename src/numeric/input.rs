// ============================================================================
// Decimal Input
// Polymorphic coercion of caller values into Decimals
// ============================================================================

use num_bigint::BigInt;

use super::decimal::Decimal;
use super::errors::{DecimalError, DecimalResult};
use super::factors::factor_of;

/// The input shapes accepted by the [`decimal`] factory.
///
/// Each accepted shape is a separate variant and is validated on its own
/// when coerced; anything that cannot be expressed as one of these shapes
/// is rejected at compile time rather than at run time.
#[derive(Clone, Debug)]
pub enum DecimalInput {
    /// An already-built decimal, passed through untouched
    Value(Decimal),
    /// An arbitrary-precision integer, taken at precision 0
    Int(BigInt),
    /// A binary floating-point number
    Float(f64),
    /// A decimal literal string
    Text(String),
    /// A raw (digits, precision) pair
    Parts(BigInt, u32),
}

impl DecimalInput {
    /// Check whether the input already is a decimal.
    #[inline]
    pub fn is_decimal(&self) -> bool {
        matches!(self, DecimalInput::Value(_))
    }
}

impl From<Decimal> for DecimalInput {
    #[inline]
    fn from(value: Decimal) -> Self {
        DecimalInput::Value(value)
    }
}

impl From<&Decimal> for DecimalInput {
    #[inline]
    fn from(value: &Decimal) -> Self {
        DecimalInput::Value(value.clone())
    }
}

impl From<BigInt> for DecimalInput {
    #[inline]
    fn from(value: BigInt) -> Self {
        DecimalInput::Int(value)
    }
}

impl From<&BigInt> for DecimalInput {
    #[inline]
    fn from(value: &BigInt) -> Self {
        DecimalInput::Int(value.clone())
    }
}

macro_rules! input_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for DecimalInput {
                #[inline]
                fn from(value: $t) -> Self {
                    DecimalInput::Int(BigInt::from(value))
                }
            }
        )*
    };
}

input_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f64> for DecimalInput {
    #[inline]
    fn from(value: f64) -> Self {
        DecimalInput::Float(value)
    }
}

impl From<&str> for DecimalInput {
    #[inline]
    fn from(value: &str) -> Self {
        DecimalInput::Text(value.to_owned())
    }
}

impl From<String> for DecimalInput {
    #[inline]
    fn from(value: String) -> Self {
        DecimalInput::Text(value)
    }
}

impl<T: Into<BigInt>> From<(T, u32)> for DecimalInput {
    #[inline]
    fn from((digits, precision): (T, u32)) -> Self {
        DecimalInput::Parts(digits.into(), precision)
    }
}

/// Coerce any accepted input shape into a [`Decimal`].
///
/// - an existing [`Decimal`] passes through unchanged;
/// - integers become the numerator at precision 0;
/// - an `f64` that is mathematically integral and within the exactly
///   representable integer range takes the integer path; every other
///   finite float is rendered to its canonical decimal string and parsed
///   like any other literal, so both cases share one code path;
/// - strings must match the literal grammar: optional leading `-`, one or
///   more digits, optional `.` followed by one or more digits, optional
///   `e`/`E` exponent with optional sign;
/// - a `(digits, precision)` tuple constructs the pair directly.
///
/// # Errors
/// Returns `InvalidInput` when a string fails the grammar (this covers
/// NaN and infinite floats, whose renderings are not decimal literals) and
/// `UnsupportedPrecision` when an exponent pushes the precision outside
/// the supported scale range.
///
/// # Example
/// ```
/// use exact_decimal::prelude::*;
///
/// assert_eq!(decimal(12.34)?.to_string(), "12.34");
/// assert_eq!(decimal("12.340")?.to_string(), "12.340");
/// assert_eq!(decimal(123)?.to_string(), "123");
/// assert!(decimal("789foo").is_err());
/// # Ok::<(), DecimalError>(())
/// ```
pub fn decimal(input: impl Into<DecimalInput>) -> DecimalResult<Decimal> {
    Decimal::try_from(input.into())
}

/// Largest float magnitude whose integral values convert exactly (2^53).
const MAX_SAFE_FLOAT: f64 = 9_007_199_254_740_992.0;

impl TryFrom<DecimalInput> for Decimal {
    type Error = DecimalError;

    fn try_from(input: DecimalInput) -> Result<Self, Self::Error> {
        match input {
            DecimalInput::Value(value) => Ok(value),
            DecimalInput::Int(digits) => Ok(Decimal::new(digits, 0)),
            DecimalInput::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_FLOAT {
                    Ok(Decimal::new(value as i64, 0))
                } else {
                    parse_str(&value.to_string())
                }
            },
            DecimalInput::Text(text) => parse_str(&text),
            DecimalInput::Parts(digits, precision) => Ok(Decimal::new(digits, precision)),
        }
    }
}

impl std::str::FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}

// ============================================================================
// Literal Grammar
// ============================================================================

/// Parse a decimal literal, including the optional scientific suffix.
fn parse_str(s: &str) -> DecimalResult<Decimal> {
    let (mantissa, exponent) = match s.find(|c| c == 'e' || c == 'E') {
        Some(at) => (&s[..at], Some(&s[at + 1..])),
        None => (s, None),
    };

    let parsed = parse_mantissa(mantissa)?;
    match exponent {
        None => Ok(parsed),
        Some(exp) => apply_exponent(parsed, parse_exponent(exp)?),
    }
}

/// Parse the plain literal part: optional `-`, digits, optional `.` digits.
fn parse_mantissa(s: &str) -> DecimalResult<Decimal> {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::InvalidInput);
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecimalError::InvalidInput);
        }
    }

    let frac = frac_part.unwrap_or("");
    let precision =
        u32::try_from(frac.len()).map_err(|_| DecimalError::UnsupportedPrecision)?;

    // Strip the point: the digit string is the numerator, the fractional
    // digit count is the precision.
    let mut digit_string = String::with_capacity(s.len());
    if s.starts_with('-') {
        digit_string.push('-');
    }
    digit_string.push_str(int_part);
    digit_string.push_str(frac);

    let digits = digit_string
        .parse::<BigInt>()
        .map_err(|_| DecimalError::InvalidInput)?;
    Ok(Decimal::new(digits, precision))
}

/// Parse the exponent suffix: optional sign, one or more digits.
fn parse_exponent(s: &str) -> DecimalResult<i64> {
    let unsigned = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::InvalidInput);
    }
    // The digits are already validated, so a parse failure is overflow.
    s.parse::<i64>().map_err(|_| DecimalError::UnsupportedPrecision)
}

fn apply_exponent(mantissa: Decimal, exponent: i64) -> DecimalResult<Decimal> {
    if exponent < 0 {
        // Shifting the point left only widens the precision; no rounding.
        let shift = u32::try_from(exponent.unsigned_abs())
            .map_err(|_| DecimalError::UnsupportedPrecision)?;
        let precision = mantissa
            .precision()
            .checked_add(shift)
            .ok_or(DecimalError::UnsupportedPrecision)?;
        Ok(Decimal::new(mantissa.digits().clone(), precision))
    } else {
        let shift =
            u32::try_from(exponent).map_err(|_| DecimalError::UnsupportedPrecision)?;
        let scaled = Decimal::new(mantissa.digits() * factor_of(shift), mantissa.precision());
        // Scaling up leaves meaningless trailing fractional zeros behind.
        Ok(scaled.normalise())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_from_float() {
        assert_eq!(decimal(12.34).unwrap().to_string(), "12.34");
        assert_eq!(decimal(123.0).unwrap().to_string(), "123");
        assert_eq!(decimal(-0.0).unwrap().to_string(), "0");
    }

    #[test]
    fn test_construction_from_string() {
        assert_eq!(decimal("12.340").unwrap().to_string(), "12.340");
        assert_eq!(decimal("12.34").unwrap().to_string(), "12.34");
        assert_eq!(decimal("-0.005").unwrap().to_string(), "-0.005");
        assert_eq!(decimal(String::from("7.25")).unwrap().to_string(), "7.25");
    }

    #[test]
    fn test_construction_from_integers() {
        assert_eq!(decimal(123).unwrap().to_string(), "123");
        assert_eq!(decimal(-45i64).unwrap().to_string(), "-45");
        assert_eq!(decimal(7u8).unwrap().to_string(), "7");
        assert_eq!(
            decimal(BigInt::from(123)).unwrap().to_string(),
            "123"
        );
    }

    #[test]
    fn test_construction_from_parts() {
        assert_eq!(decimal((123, 1)).unwrap().to_string(), "12.3");
        assert_eq!(decimal((BigInt::from(-5), 3)).unwrap().to_string(), "-0.005");
    }

    #[test]
    fn test_existing_decimal_passes_through() {
        let original = decimal("12.34").unwrap();
        let again = decimal(&original).unwrap();
        assert_eq!(again.digits(), original.digits());
        assert_eq!(again.precision(), original.precision());
    }

    #[test]
    fn test_is_decimal() {
        assert!(DecimalInput::from(decimal("1").unwrap()).is_decimal());
        assert!(!DecimalInput::from("1").is_decimal());
        assert!(!DecimalInput::from(1).is_decimal());
    }

    #[test]
    fn test_parse_extracts_parts() {
        let d = decimal("123.450").unwrap();
        assert_eq!(d.digits(), &BigInt::from(123_450));
        assert_eq!(d.precision(), 3);
        assert_eq!(d.factor(), BigInt::from(1000));
    }

    #[test]
    fn test_invalid_strings_rejected() {
        for bad in [
            "", "foo", "789foo", "12.", ".5", "-", "--1", "1.2.3", "1..2", " 12", "12 ",
            "+5", "1,5", "0x12",
        ] {
            assert_eq!(
                decimal(bad),
                Err(DecimalError::InvalidInput),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        assert_eq!(decimal(f64::NAN), Err(DecimalError::InvalidInput));
        assert_eq!(decimal(f64::INFINITY), Err(DecimalError::InvalidInput));
        assert_eq!(decimal(f64::NEG_INFINITY), Err(DecimalError::InvalidInput));
    }

    #[test]
    fn test_scientific_small() {
        assert_eq!(decimal(1.2345e-8).unwrap().to_string(), "0.000000012345");
        assert_eq!(decimal("1.2345e-8").unwrap().to_string(), "0.000000012345");
    }

    #[test]
    fn test_scientific_big() {
        assert_eq!(
            decimal(1.2345e21).unwrap().to_string(),
            "1234500000000000000000"
        );
        assert_eq!(
            decimal("1.2345e21").unwrap().to_string(),
            "1234500000000000000000"
        );
    }

    #[test]
    fn test_scientific_forms() {
        assert_eq!(decimal("1e5").unwrap().to_string(), "100000");
        assert_eq!(decimal("1.5E+2").unwrap().to_string(), "150");
        assert_eq!(decimal("-2.5e1").unwrap().to_string(), "-25");
        assert_eq!(decimal("25e-3").unwrap().to_string(), "0.025");
    }

    #[test]
    fn test_negative_exponent_widens_precision_without_rounding() {
        let d = decimal("12345e-7").unwrap();
        assert_eq!(d.digits(), &BigInt::from(12_345));
        assert_eq!(d.precision(), 7);
        assert_eq!(d.to_string(), "0.0012345");
    }

    #[test]
    fn test_malformed_exponents_rejected() {
        for bad in ["1e", "1e+", "1e-", "1ee2", "1e2.5", "e5", "1e 2"] {
            assert_eq!(
                decimal(bad),
                Err(DecimalError::InvalidInput),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_oversized_exponent_rejected() {
        assert_eq!(
            decimal("1e99999999999999999999"),
            Err(DecimalError::UnsupportedPrecision)
        );
        assert_eq!(
            decimal("1e-99999999999999999999"),
            Err(DecimalError::UnsupportedPrecision)
        );
    }

    #[test]
    fn test_from_str_trait() {
        let d: Decimal = "123.450".parse().unwrap();
        assert_eq!(d.to_string(), "123.450");
        assert!("foo".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_large_integral_float_goes_through_string_path() {
        // Above 2^53, integral floats are rendered and parsed as strings
        let d = decimal(1e21).unwrap();
        assert_eq!(d.to_string(), "1000000000000000000000");
        assert_eq!(d.precision(), 0);
    }

    #[test]
    fn test_hundreds_of_digits_parse() {
        let literal = format!("-{}.{}", "9".repeat(150), "1".repeat(150));
        let d = decimal(literal.as_str()).unwrap();
        assert_eq!(d.precision(), 150);
        assert_eq!(d.to_string(), literal);
    }
}
