// ============================================================================
// Logarithm / Exponential Kernels
// Fixed-point pow, ln and exp over 18-decimal values
// ============================================================================
//
// `pow(x, y)` is computed as `exp(y * ln(x))`. Both kernels reduce their
// argument with a ladder of precomputed powers of two (x_n = 2^(7-n),
// a_n = e^(x_n)) and finish with a short Taylor series on the small
// remainder. Intermediates are carried at 20 fractional decimal digits, and
// at 36 digits for arguments close to one, where ln would otherwise lose
// most of its significant digits.
//
// Everything here is integer arithmetic with truncating division, so results
// are bit-identical on every platform. Relative error versus arbitrary
// precision is far below the 1e-12 budget the anchor interpolation promises.

use super::errors::{NumericError, NumericResult};
use super::i256::I256;
use primitive_types::U256;

// ----------------------------------------------------------------------------
// Scale constants
// ----------------------------------------------------------------------------

/// 1e18: the public fixed-point scale.
pub(crate) const ONE_18: I256 = I256::from_limbs([0x0de0b6b3a7640000, 0, 0, 0]);
/// 1e20: internal scale of the reduction ladder.
const ONE_20: I256 = I256::from_limbs([0x6bc75e2d63100000, 0x5, 0, 0]);
/// 1e36: internal scale of the high-resolution ln used near one.
const ONE_36: I256 =
    I256::from_limbs([0xb34b9f1000000000, 0x00c097ce7bc90715, 0, 0]);

// The result of exp is stored with 20 decimals, so the largest representable
// outcome caps the exponent at ln((2^255 - 1) / 1e20) ~ 130.7; the smallest
// positive 18-decimal value caps the negative side at ln(1e-18) ~ -41.4.
// Bounds carry a safety margin.

/// 130e18
const MAX_NATURAL_EXPONENT: I256 =
    I256::from_limbs([0x0c1cc73b00c80000, 0x7, 0, 0]);
/// -41e18
const MIN_NATURAL_EXPONENT: I256 = I256::from_limbs([
    0xc702bd3a30fc0000,
    0xfffffffffffffffd,
    0xffffffffffffffff,
    0xffffffffffffffff,
]);

// Arguments in (0.9, 1.1) go through the 36-decimal ln; both ln(0.9) and
// ln(1.1) fit a 36-decimal fixed-point value in 256 bits.

/// 0.9e18
const LN_36_LOWER_BOUND: I256 = I256::from_limbs([0x0c7d713b49da0000, 0, 0, 0]);
/// 1.1e18
const LN_36_UPPER_BOUND: I256 = I256::from_limbs([0x0f43fc2c04ee0000, 0, 0, 0]);

/// 2^254 / 1e20: keeps `y * ln(x)` representable for any ln the ladder can
/// produce.
const MILD_EXPONENT_BOUND: U256 = U256([
    0x4181ea8059f76532,
    0xa88f4bb1ca6bcf58,
    0x0bce5086492111ae,
    0,
]);

const TWO: I256 = I256::from_u64(2);
const HUNDRED: I256 = I256::from_u64(100);

// ----------------------------------------------------------------------------
// Reduction ladder
// ----------------------------------------------------------------------------

// The first two rungs are 18-decimal x_n with integer (0-decimal) a_n, since
// e^128 and e^64 overflow a 20-decimal representation.

/// 128e18 (2^7)
const X0: I256 = I256::from_limbs([0xf05b59d3b2000000, 0x6, 0, 0]);
/// e^128, no decimals
const A0: I256 = I256::from_limbs([
    0x0262827000000000,
    0xf53a27172fa9ec63,
    0x0195e54c5dd42177,
    0,
]);
/// 64e18 (2^6)
const X1: I256 = I256::from_limbs([0x782dace9d9000000, 0x3, 0, 0]);
/// e^64, no decimals
const A1: I256 = I256::from_limbs([0xf597cd205cef7380, 0x000000001425982c, 0, 0]);

/// Remaining rungs, `(x_n, e^(x_n))` both at 20 decimals, x_n = 2^(5-n).
/// `exp` only consumes the rungs down to 2^-2; `ln` uses all ten.
const LADDER_20: [(I256, I256); 10] = [
    // 32.0, e^32
    (
        I256::from_limbs([0x78ebc5ac62000000, 0xad, 0, 0]),
        I256::from_limbs([0xf805980ff0084000, 0x0001855144814a7f, 0, 0]),
    ),
    // 16.0, e^16
    (
        I256::from_limbs([0xbc75e2d631000000, 0x56, 0, 0]),
        I256::from_limbs([0xa80a22c61ab5a700, 0x0000000002df0ab5, 0, 0]),
    ),
    // 8.0, e^8
    (
        I256::from_limbs([0x5e3af16b18800000, 0x2b, 0, 0]),
        I256::from_limbs([0xce3da636ea5cf850, 0x3f1f, 0, 0]),
    ),
    // 4.0, e^4
    (
        I256::from_limbs([0xaf1d78b58c400000, 0x15, 0, 0]),
        I256::from_limbs([0xfa27722cc06cc5e2, 0x127, 0, 0]),
    ),
    // 2.0, e^2
    (
        I256::from_limbs([0xd78ebc5ac6200000, 0xa, 0, 0]),
        I256::from_limbs([0x0e60114edb805d03, 0x28, 0, 0]),
    ),
    // 1.0, e
    (
        I256::from_limbs([0x6bc75e2d63100000, 0x5, 0, 0]),
        I256::from_limbs([0xbc5fb41746121110, 0xe, 0, 0]),
    ),
    // 0.5, e^0.5
    (
        I256::from_limbs([0xb5e3af16b1880000, 0x2, 0, 0]),
        I256::from_limbs([0xf00f760a4b2db55d, 0x8, 0, 0]),
    ),
    // 0.25, e^0.25
    (
        I256::from_limbs([0x5af1d78b58c40000, 0x1, 0, 0]),
        I256::from_limbs([0xf5f1775788937937, 0x6, 0, 0]),
    ),
    // 0.125, e^0.125
    (
        I256::from_limbs([0xad78ebc5ac620000, 0, 0, 0]),
        I256::from_limbs([0x248f33704b286603, 0x6, 0, 0]),
    ),
    // 0.0625, e^0.0625
    (
        I256::from_limbs([0x56bc75e2d6310000, 0, 0, 0]),
        I256::from_limbs([0xc548670b9510e7ac, 0x5, 0, 0]),
    ),
];

/// Rungs of the ladder `exp` consumes; the remainder is then small enough
/// for twelve Taylor terms to reach 18-decimal precision.
const EXP_RUNGS: usize = 8;

// ----------------------------------------------------------------------------
// Public kernels
// ----------------------------------------------------------------------------

/// `x^y` with unsigned 18-decimal fixed-point base and exponent.
///
/// # Errors
/// - `InvalidDomain` if `x == 0`
/// - `Overflow` if `y * ln(x)` leaves the supported exponent range
pub(crate) fn pow(x: U256, y: U256) -> NumericResult<U256> {
    if x.is_zero() {
        return Err(NumericError::InvalidDomain);
    }
    if y.is_zero() {
        return ONE_18.to_u256();
    }

    // x^y = exp(y * ln(x)). ln takes a signed value, so x must fit the
    // signed range; the bound on y keeps the product representable.
    let x = I256::try_from_u256(x)?;
    if y >= MILD_EXPONENT_BOUND {
        return Err(NumericError::Overflow);
    }
    let y = I256::try_from_u256(y)?;

    let ln_x_times_y = if LN_36_LOWER_BOUND < x && x < LN_36_UPPER_BOUND {
        // 36-decimal ln. y cannot be brought to 36 decimals without
        // overflowing, so split the product into an 18-decimal high part
        // and a downscaled low part.
        let ln36 = ln_36(x)?;
        let high = ln36.checked_div(ONE_18)?;
        let low = ln36.checked_rem(ONE_18)?;
        high.checked_mul(y)?
            .checked_add(low.checked_mul(y)?.checked_div(ONE_18)?)?
    } else {
        ln(x)?.checked_mul(y)?
    };
    let exponent = ln_x_times_y.checked_div(ONE_18)?;

    if exponent < MIN_NATURAL_EXPONENT || exponent > MAX_NATURAL_EXPONENT {
        return Err(NumericError::Overflow);
    }
    exp(exponent)?.to_u256()
}

/// Natural exponential `e^x` with signed 18-decimal argument.
///
/// # Errors
/// Returns `Overflow` if `x` is outside `[-41, 130]`.
pub(crate) fn exp(x: I256) -> NumericResult<I256> {
    if x < MIN_NATURAL_EXPONENT || x > MAX_NATURAL_EXPONENT {
        return Err(NumericError::Overflow);
    }

    if x.is_negative() {
        // e^(-x) = 1 / e^x; the reciprocal at 18 decimals is 1e36 / e^x.
        return ONE_36.checked_div(exp(x.checked_neg()?)?);
    }

    // Peel off the two integer-scale rungs first: x0 + x1 exceeds the
    // exponent bound, so at most one of them applies.
    let mut x = x;
    let first_a = if x >= X0 {
        x = x.checked_sub(X0)?;
        A0
    } else if x >= X1 {
        x = x.checked_sub(X1)?;
        A1
    } else {
        I256::from_u64(1)
    };

    // Remaining work happens at 20 decimals.
    let mut x = x.checked_mul(HUNDRED)?;
    let mut product = ONE_20;
    for (x_n, a_n) in &LADDER_20[..EXP_RUNGS] {
        if x >= *x_n {
            x = x.checked_sub(*x_n)?;
            product = product.checked_mul(*a_n)?.checked_div(ONE_20)?;
        }
    }

    // Taylor series on the remainder: 1 + x + x^2/2! + ... + x^12/12!.
    let mut term = x;
    let mut series_sum = ONE_20.checked_add(term)?;
    for n in 2..=12u64 {
        term = term
            .checked_mul(x)?
            .checked_div(ONE_20)?
            .checked_div(I256::from_u64(n))?;
        series_sum = series_sum.checked_add(term)?;
    }

    // product and series_sum carry 20 decimals, first_a none; dropping two
    // digits lands the result back at 18.
    product
        .checked_mul(series_sum)?
        .checked_div(ONE_20)?
        .checked_mul(first_a)?
        .checked_div(HUNDRED)
}

/// Natural logarithm with signed 18-decimal argument and result.
///
/// # Errors
/// Returns `InvalidDomain` for zero or negative arguments.
pub(crate) fn ln(a: I256) -> NumericResult<I256> {
    if a <= I256::ZERO {
        return Err(NumericError::InvalidDomain);
    }
    if LN_36_LOWER_BOUND < a && a < LN_36_UPPER_BOUND {
        ln_36(a)?.checked_div(ONE_18)
    } else {
        ln_reduced(a)
    }
}

/// Ladder-reduced ln. Caller guarantees `a > 0`.
fn ln_reduced(a: I256) -> NumericResult<I256> {
    if a < ONE_18 {
        // ln(a) = -ln(1/a); the reciprocal is above one, so the recursion
        // terminates after one step.
        let inverse = ONE_36.checked_div(a)?;
        return ln_reduced(inverse)?.checked_neg();
    }

    // ln(a) = sum of the x_n whose a_n divide into a, plus ln(remainder).
    let mut a = a;
    let mut sum = I256::ZERO;
    if a >= A0.checked_mul(ONE_18)? {
        a = a.checked_div(A0)?; // integer a_n: plain division
        sum = sum.checked_add(X0)?;
    }
    if a >= A1.checked_mul(ONE_18)? {
        a = a.checked_div(A1)?;
        sum = sum.checked_add(X1)?;
    }

    // Switch to 20 decimals for the fixed-point rungs.
    sum = sum.checked_mul(HUNDRED)?;
    a = a.checked_mul(HUNDRED)?;
    for (x_n, a_n) in &LADDER_20 {
        if a >= *a_n {
            a = a.checked_mul(ONE_20)?.checked_div(*a_n)?;
            sum = sum.checked_add(*x_n)?;
        }
    }

    // The remainder is below e^0.0625 ~ 1.06, where the atanh-style series
    // ln(a) = 2 * (z + z^3/3 + z^5/5 + ...), z = (a-1)/(a+1), converges in
    // five terms at 20-decimal precision.
    let z = a
        .checked_sub(ONE_20)?
        .checked_mul(ONE_20)?
        .checked_div(a.checked_add(ONE_20)?)?;
    let z_squared = z.checked_mul(z)?.checked_div(ONE_20)?;

    let mut numerator = z;
    let mut series_sum = z;
    for divisor in [3u64, 5, 7, 9, 11] {
        numerator = numerator.checked_mul(z_squared)?.checked_div(ONE_20)?;
        series_sum =
            series_sum.checked_add(numerator.checked_div(I256::from_u64(divisor))?)?;
    }
    let series_sum = series_sum.checked_mul(TWO)?;

    sum.checked_add(series_sum)?.checked_div(HUNDRED)
}

/// High-resolution ln for arguments close to one, returned at 36 decimals.
/// ln(1 + eps) is tiny, so the extra digits are what preserve the relative
/// error bound of `pow` for near-unit ratios.
fn ln_36(x: I256) -> NumericResult<I256> {
    let x = x.checked_mul(ONE_18)?;

    // Same series as the ln_reduced tail, at 36 decimals with seven terms.
    let z = x
        .checked_sub(ONE_36)?
        .checked_mul(ONE_36)?
        .checked_div(x.checked_add(ONE_36)?)?;
    let z_squared = z.checked_mul(z)?.checked_div(ONE_36)?;

    let mut numerator = z;
    let mut series_sum = z;
    for divisor in [3u64, 5, 7, 9, 11, 13, 15] {
        numerator = numerator.checked_mul(z_squared)?.checked_div(ONE_36)?;
        series_sum =
            series_sum.checked_add(numerator.checked_div(I256::from_u64(divisor))?)?;
    }

    series_sum.checked_mul(TWO)
}
