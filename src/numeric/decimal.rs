// ============================================================================
// Decimal
// Exact base-10 fixed-point arithmetic on arbitrary-precision integers
// ============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::errors::{DecimalError, DecimalResult};
use super::factors::factor_of;
use super::input::DecimalInput;

/// Exact decimal number: `digits / 10^precision`.
///
/// `digits` is a signed arbitrary-precision integer, so values with
/// hundreds of digits are representable without overflow. `precision`
/// counts the digits to the right of the decimal point.
///
/// Two decimals with different precision can represent the same value:
/// `(120, 1)` and `(1200, 2)` both mean 12.0. Comparison and equality
/// align scales first; the stored pair itself is never renormalized
/// behind the caller's back (see [`Decimal::normalise`]).
///
/// Values are immutable. Every operation returns a new `Decimal`, so
/// instances can be shared freely across threads.
///
/// # Example
/// ```
/// use exact_decimal::prelude::*;
///
/// let price = decimal("12.34")?;
/// let qty = decimal("3.7")?;
/// assert_eq!(price.mul(qty)?.to_string(), "45.66");
/// # Ok::<(), DecimalError>(())
/// ```
#[derive(Clone)]
pub struct Decimal {
    digits: BigInt,
    precision: u32,
}

impl Decimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a `(digits, precision)` pair.
    ///
    /// The value is `digits / 10^precision`. No normalization is applied;
    /// trailing zero digits stay put until [`Decimal::normalise`].
    ///
    /// # Example
    /// ```
    /// use exact_decimal::numeric::Decimal;
    ///
    /// assert_eq!(Decimal::new(1234, 2).to_string(), "12.34");
    /// ```
    pub fn new(digits: impl Into<BigInt>, precision: u32) -> Self {
        Self {
            digits: digits.into(),
            precision,
        }
    }

    /// Create from digits and a power-of-ten factor.
    ///
    /// The precision is derived as the smallest `p` with `10^p >= factor`,
    /// which for exact powers of ten recovers the exponent.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `factor < 1`.
    pub fn from_factor(digits: impl Into<BigInt>, factor: &BigInt) -> DecimalResult<Self> {
        if factor < &BigInt::one() {
            return Err(DecimalError::InvalidInput);
        }
        let mut precision = 0u32;
        while &factor_of(precision) < factor {
            precision += 1;
        }
        Ok(Self::new(digits, precision))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The signed arbitrary-precision numerator.
    #[inline]
    pub fn digits(&self) -> &BigInt {
        &self.digits
    }

    /// Number of fractional digits the numerator represents.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The implicit denominator, `10^precision`.
    #[inline]
    pub fn factor(&self) -> BigInt {
        factor_of(self.precision)
    }

    /// Check if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    /// Check if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.digits.is_positive()
    }

    /// Check if the value is strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.digits.is_negative()
    }

    // ========================================================================
    // Rescaling
    // ========================================================================

    /// Return the same value at `precision` fractional digits.
    ///
    /// Raising the precision multiplies the numerator by a power of ten
    /// and is exact. Lowering it divides the numerator, rounding half away
    /// from zero: `12.345` at precision 2 is `12.35`, `-1.2345` at
    /// precision 3 is `-1.235`.
    pub fn with_precision(&self, precision: u32) -> Self {
        match precision.cmp(&self.precision) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Self {
                digits: &self.digits * factor_of(precision - self.precision),
                precision,
            },
            Ordering::Less => Self {
                digits: div_half_away(&self.digits, &factor_of(self.precision - precision)),
                precision,
            },
        }
    }

    /// Alias for [`Decimal::with_precision`].
    #[inline]
    pub fn with_prec(&self, precision: u32) -> Self {
        self.with_precision(precision)
    }

    /// Alias for [`Decimal::with_precision`].
    #[inline]
    pub fn with_dp(&self, precision: u32) -> Self {
        self.with_precision(precision)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Negate the value.
    #[inline]
    pub fn neg(&self) -> Self {
        Self {
            digits: -&self.digits,
            precision: self.precision,
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Add another value.
    ///
    /// The result carries the larger of the two precisions; the operand
    /// with smaller precision is rescaled up first, which is exact.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `other` cannot be coerced to a decimal.
    pub fn add(&self, other: impl Into<DecimalInput>) -> DecimalResult<Self> {
        let other = Decimal::try_from(other.into())?;
        Ok(self.add_aligned(&other))
    }

    /// Subtract another value.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `other` cannot be coerced to a decimal.
    pub fn sub(&self, other: impl Into<DecimalInput>) -> DecimalResult<Self> {
        let other = Decimal::try_from(other.into())?;
        Ok(self.add_aligned(&other.neg()))
    }

    /// Multiply by another value.
    ///
    /// The product of the two numerators is exact; the result is then
    /// rescaled down to the larger of the two operand precisions with the
    /// usual half-away-from-zero rounding, so no significant digits are
    /// lost before that single explicit rounding step.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `other` cannot be coerced, or
    /// `UnsupportedPrecision` when the intermediate precision exceeds the
    /// representable scale range.
    pub fn mul(&self, other: impl Into<DecimalInput>) -> DecimalResult<Self> {
        let other = Decimal::try_from(other.into())?;
        let product_precision = self
            .precision
            .checked_add(other.precision)
            .ok_or(DecimalError::UnsupportedPrecision)?;
        let product = Self {
            digits: &self.digits * &other.digits,
            precision: product_precision,
        };
        Ok(product.with_precision(self.precision.max(other.precision)))
    }

    /// Divide by another value.
    ///
    /// Both operands are aligned to the larger precision; the quotient is
    /// rounded half away from zero at that precision.
    ///
    /// # Errors
    /// Returns `DivideByZero` when the divisor is zero-valued, or
    /// `InvalidInput` when `other` cannot be coerced.
    pub fn div(&self, other: impl Into<DecimalInput>) -> DecimalResult<Self> {
        let other = Decimal::try_from(other.into())?;
        let precision = self.precision.max(other.precision);
        let lhs = self.with_precision(precision);
        let rhs = other.with_precision(precision);
        if rhs.digits.is_zero() {
            return Err(DecimalError::DivideByZero);
        }
        let digits = div_half_away(&(lhs.digits * factor_of(precision)), &rhs.digits);
        Ok(Self { digits, precision })
    }

    fn add_aligned(&self, other: &Self) -> Self {
        let precision = self.precision.max(other.precision);
        Self {
            digits: self.with_precision(precision).digits + other.with_precision(precision).digits,
            precision,
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare with another value, aligning scales first.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `other` cannot be coerced to a decimal.
    pub fn cmp(&self, other: impl Into<DecimalInput>) -> DecimalResult<Ordering> {
        let other = Decimal::try_from(other.into())?;
        Ok(cmp_aligned(self, &other))
    }

    /// Check value equality with another value, aligning scales first.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `other` cannot be coerced to a decimal.
    pub fn eq(&self, other: impl Into<DecimalInput>) -> DecimalResult<bool> {
        Ok(self.cmp(other)? == Ordering::Equal)
    }

    // ========================================================================
    // Normalization
    // ========================================================================

    /// Strip trailing fractional zeros, lowering precision without
    /// changing the value.
    ///
    /// Zero normalises to precision 0. Digits left of the decimal point
    /// are never removed: `1230.000` normalises to `1230`.
    pub fn normalise(&self) -> Self {
        if self.digits.is_zero() {
            return self.with_precision(0);
        }
        let mut strip = 0u32;
        while strip < self.precision && (&self.digits % factor_of(strip + 1)).is_zero() {
            strip += 1;
        }
        self.with_precision(self.precision - strip)
    }

    /// Alias for [`Decimal::normalise`].
    #[inline]
    pub fn normalize(&self) -> Self {
        self.normalise()
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Approximate value as an `f64`.
    ///
    /// Explicitly lossy: magnitudes or precisions beyond `f64`'s exactly
    /// representable range lose digits, and values outside its range
    /// collapse to infinities. Use the `Display` rendering for an exact
    /// form.
    pub fn to_f64(&self) -> f64 {
        let digits = self.digits.to_f64().unwrap_or(f64::NAN);
        let factor = factor_of(self.precision).to_f64().unwrap_or(f64::NAN);
        digits / factor
    }
}

/// Truncated quotient of `x / y`, rounding half away from zero.
///
/// Works on absolute values and reapplies the sign, so a remainder of
/// exactly half the divisor always grows the magnitude. `y` must be
/// non-zero.
fn div_half_away(x: &BigInt, y: &BigInt) -> BigInt {
    let negative = x.is_negative() != y.is_negative();
    let x = x.abs();
    let y = y.abs();
    let mut quotient = &x / &y;
    if (x % &y) * 2u8 >= y {
        quotient += 1u8;
    }
    if negative {
        -quotient
    } else {
        quotient
    }
}

fn cmp_aligned(lhs: &Decimal, rhs: &Decimal) -> Ordering {
    if lhs.precision < rhs.precision {
        cmp_aligned(rhs, lhs).reverse()
    } else {
        let rhs = rhs.with_precision(lhs.precision);
        lhs.digits.cmp(&rhs.digits)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        cmp_aligned(self, other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_aligned(self, other))
    }
}

impl Ord for Decimal {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_aligned(self, other)
    }
}

impl Neg for Decimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Decimal::neg(&self)
    }
}

// Operator sugar for Decimal-to-Decimal arithmetic. Mul panics on precision
// overflow and Div on a zero divisor; use the inherent methods to handle
// those as errors.
impl std::ops::Add for Decimal {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.add_aligned(&rhs)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.add_aligned(&rhs.neg())
    }
}

impl std::ops::Mul for Decimal {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Decimal::mul(&self, rhs).expect("decimal precision overflow")
    }
}

impl std::ops::Div for Decimal {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        Decimal::div(&self, rhs).expect("decimal division by zero")
    }
}

impl Zero for Decimal {
    #[inline]
    fn zero() -> Self {
        Self::new(0, 0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }
}

impl One for Decimal {
    #[inline]
    fn one() -> Self {
        Self::new(1, 0)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for Decimal {
    /// Renders the exact value: the absolute digit string zero-padded to
    /// at least `precision + 1` characters, the point inserted `precision`
    /// characters from the right (omitted at precision 0), and a leading
    /// `-` for negative values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.precision as usize;
        let magnitude = self.digits.magnitude().to_string();
        let padded = format!("{:0>width$}", magnitude, width = precision + 1);
        let sign = if self.digits.is_negative() { "-" } else { "" };
        if precision == 0 {
            write!(f, "{}{}", sign, padded)
        } else {
            let split = padded.len() - precision;
            write!(f, "{}{}.{}", sign, &padded[..split], &padded[split..])
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decimal({}, digits={}, precision={})",
            self, self.digits, self.precision
        )
    }
}

// ============================================================================
// Serde (optional)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Decimal {
    /// Serializes as the canonical decimal string, identical to `Display`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a decimal number string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Decimal, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}

// ============================================================================
// Tests
// ============================================================================



#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_serialize_matches_display() {
        let value: Decimal = "12.340".parse().unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"12.340\"");
    }

    #[test]
    fn test_json_round_trip() {
        let value: Decimal = "-0.005".parse().unwrap();
        let json = serde_json::to_string(&value).unwrap();
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.digits(), value.digits());
        assert_eq!(back.precision(), value.precision());
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<Decimal>("\"789foo\"").is_err());
    }
}
