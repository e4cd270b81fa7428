// ============================================================================
// Wad Fixed-Point Value
// Non-negative 18-decimal fixed-point arithmetic with truncating rounding
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::log_exp;
use primitive_types::{U256, U512};
use std::fmt;

/// Number of fractional decimal digits.
pub const DECIMALS: u32 = 18;

const SCALE_U64: u64 = 1_000_000_000_000_000_000;

/// Non-negative fixed-point number with 18 fractional decimal digits.
///
/// Internally stores `value × 10^18` as a `U256`. All rounding is toward
/// zero: in an AMM, truncation always errs against the caller and in favor
/// of the pool, so the rounding direction is part of the contract, not an
/// implementation detail.
///
/// # Example
/// ```
/// use aclamm_math::numeric::Wad;
///
/// let price = Wad::from_integer(100);
/// let ratio: Wad = "1.5".parse().unwrap();
/// assert_eq!(price.mul_down(ratio).unwrap(), Wad::from_integer(150));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Wad(U256);

impl Wad {
    /// Zero value
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// One (1.0)
    pub const ONE: Self = Self(U256([SCALE_U64, 0, 0, 0]));

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation (a value already scaled by
    /// 10^18).
    #[inline]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Create from an integer value. Cannot overflow: `u64::MAX × 10^18`
    /// is far below the 256-bit limit.
    #[inline]
    pub fn from_integer(value: u64) -> Self {
        Self(U256::from(value) * U256::from(SCALE_U64))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled by 10^18).
    #[inline]
    pub const fn raw(self) -> U256 {
        self.0
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub fn integer_part(self) -> U256 {
        self.0 / U256::from(SCALE_U64)
    }

    /// Get the fractional part as raw 10^-18 units.
    #[inline]
    pub fn fractional_part(self) -> u64 {
        (self.0 % U256::from(SCALE_U64)).low_u64()
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Underflow` if `rhs > self` (values are unsigned).
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(NumericError::Underflow)
    }

    /// Product truncated toward zero.
    ///
    /// The 512-bit intermediate makes the product exact before the single
    /// truncating division by the scale.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    pub fn mul_down(self, rhs: Self) -> NumericResult<Self> {
        let product = self.0.full_mul(rhs.0) / U512::from(SCALE_U64);
        U256::try_from(product)
            .map(Self)
            .map_err(|_| NumericError::Overflow)
    }

    /// Quotient truncated toward zero.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` if the scaled quotient is out of range
    pub fn div_down(self, rhs: Self) -> NumericResult<Self> {
        if rhs.0.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let quotient = self.0.full_mul(U256::from(SCALE_U64)) / U512::from(rhs.0);
        U256::try_from(quotient)
            .map(Self)
            .map_err(|_| NumericError::Overflow)
    }

    /// `self^exponent` for `exponent ∈ [0, 1]` and `self > 0`.
    ///
    /// Boundary identities hold exactly: a zero exponent yields one, a unit
    /// base yields one, a unit exponent yields the base unchanged. Interior
    /// values go through the fixed-point ln/exp kernels and stay within
    /// 1e-12 relative error of the arbitrary-precision result, monotonically
    /// in both arguments.
    ///
    /// # Errors
    /// Returns `InvalidDomain` if the base is zero or the exponent exceeds
    /// one.
    pub fn pow(self, exponent: Self) -> NumericResult<Self> {
        if self.is_zero() || exponent > Self::ONE {
            return Err(NumericError::InvalidDomain);
        }
        if exponent.is_zero() || self == Self::ONE {
            return Ok(Self::ONE);
        }
        if exponent == Self::ONE {
            return Ok(self);
        }
        log_exp::pow(self.0, exponent.0).map(Self)
    }

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

impl Default for Wad {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wad({}, raw={})", self, self.0)
    }
}

impl fmt::Display for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:018}",
            self.integer_part(),
            self.fractional_part()
        )
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl Wad {
    /// Convert from `rust_decimal::Decimal`.
    ///
    /// Intended for API boundaries only (parsing user input).
    ///
    /// # Errors
    /// - `InvalidInput` if the value is negative
    /// - `PrecisionLoss` if the value carries significant digits below 10^-18
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        if d.is_sign_negative() && !d.is_zero() {
            return Err(NumericError::InvalidInput);
        }
        let mantissa = d.mantissa().unsigned_abs();
        let scale = d.scale();
        if scale <= DECIMALS {
            let factor = U256::from(10u64).pow(U256::from(DECIMALS - scale));
            U256::from(mantissa)
                .checked_mul(factor)
                .map(Self)
                .ok_or(NumericError::Overflow)
        } else {
            let divisor = 10u128.pow(scale - DECIMALS);
            if mantissa % divisor != 0 {
                return Err(NumericError::PrecisionLoss);
            }
            Ok(Self(U256::from(mantissa / divisor)))
        }
    }

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// Intended for display/debugging only.
    ///
    /// # Errors
    /// Returns `Overflow` if the value exceeds `Decimal`'s 96-bit mantissa.
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        if self.0.bits() > 96 {
            return Err(NumericError::Overflow);
        }
        Ok(rust_decimal::Decimal::from_i128_with_scale(
            self.0.low_u128() as i128,
            DECIMALS,
        ))
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Wad {
    type Err = NumericError;

    /// Parse from a non-negative decimal string.
    ///
    /// # Examples
    /// - "123" -> 123.000000000000000000
    /// - "123.456" -> 123.456000000000000000
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
            return Err(NumericError::InvalidInput);
        }

        let (int_str, frac_str) = match s.find('.') {
            Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
            None => (s, None),
        };

        let int_val: u128 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let frac_val: u64 = match frac_str {
            None | Some("") => 0,
            Some(frac) if frac.len() > DECIMALS as usize => {
                return Err(NumericError::PrecisionLoss);
            },
            Some(frac) => {
                // Right-pad to 18 digits
                let padded = format!("{:0<width$}", frac, width = DECIMALS as usize);
                padded.parse().map_err(|_| NumericError::InvalidInput)?
            },
        };

        U256::from(int_val)
            .checked_mul(U256::from(SCALE_U64))
            .and_then(|scaled| scaled.checked_add(U256::from(frac_val)))
            .map(Self)
            .ok_or(NumericError::Overflow)
    }
}

// ============================================================================
// Type Aliases
// ============================================================================

/// Square-root price anchor, an 18-decimal fixed-point value.
pub type SqrtPrice = Wad;

// ============================================================================
// Tests
// ============================================================================
