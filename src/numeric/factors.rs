// ============================================================================
// Scale Factors
// Process-wide memoized powers of ten
// ============================================================================

use num_bigint::BigInt;
use num_traits::One;
use parking_lot::RwLock;
use std::sync::OnceLock;

static FACTORS: OnceLock<RwLock<Vec<BigInt>>> = OnceLock::new();

/// Return `10^exponent` as a big integer.
///
/// Factors are computed once per distinct exponent and cached for the
/// process lifetime. The table is append-only and indexed by exponent, so
/// a shared read lock covers every hit; growth takes the write lock and
/// extends the table one multiplication per missing entry. Repeated calls
/// with the same exponent always return an equal value.
pub(crate) fn factor_of(exponent: u32) -> BigInt {
    let cache = FACTORS.get_or_init(|| RwLock::new(vec![BigInt::one()]));
    let index = exponent as usize;

    {
        let factors = cache.read();
        if let Some(factor) = factors.get(index) {
            return factor.clone();
        }
    }

    let mut factors = cache.write();
    // Another thread may have grown the table while we waited for the lock.
    if index >= factors.len() {
        let mut last = factors.last().cloned().unwrap_or_else(BigInt::one);
        while factors.len() <= index {
            last *= 10;
            factors.push(last.clone());
        }
        tracing::trace!(exponent, entries = factors.len(), "scale factor cache grown");
    }
    factors[index].clone()
}
