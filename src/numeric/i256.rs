// ============================================================================
// Signed 256-bit Integer
// Two's-complement signed arithmetic over primitive_types::U256
// ============================================================================
//
// The ln/exp kernels need signed intermediates (logarithms of values below
// one are negative) wider than i128. This is the minimal checked subset the
// kernels use; it is not a general-purpose big-integer type.
//
// Division and remainder truncate toward zero; the remainder takes the sign
// of the dividend.

use super::errors::{NumericError, NumericResult};
use primitive_types::U256;
use std::cmp::Ordering;

const SIGN_MASK: U256 = U256([0, 0, 0, 0x8000_0000_0000_0000]);

/// Two's-complement signed 256-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct I256(U256);

impl I256 {
    pub(crate) const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// Construct from little-endian 64-bit limbs of the two's-complement
    /// representation. Used for the precomputed kernel constants.
    pub(crate) const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self(U256(limbs))
    }

    pub(crate) const fn from_u64(value: u64) -> Self {
        Self(U256([value, 0, 0, 0]))
    }

    /// Reinterpret a non-negative `U256`.
    ///
    /// # Errors
    /// Returns `Overflow` if the value does not fit in the signed range.
    pub(crate) fn try_from_u256(value: U256) -> NumericResult<Self> {
        if value.bit(255) {
            Err(NumericError::Overflow)
        } else {
            Ok(Self(value))
        }
    }

    /// Convert back to `U256`.
    ///
    /// # Errors
    /// Returns `InvalidDomain` if the value is negative.
    pub(crate) fn to_u256(self) -> NumericResult<U256> {
        if self.is_negative() {
            Err(NumericError::InvalidDomain)
        } else {
            Ok(self.0)
        }
    }

    #[inline]
    pub(crate) fn is_negative(self) -> bool {
        self.0.bit(255)
    }

    #[inline]
    pub(crate) fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Magnitude as an unsigned value. Total: `MIN` maps to `2^255`.
    fn unsigned_abs(self) -> U256 {
        if self.is_negative() {
            (!self.0).overflowing_add(U256::one()).0
        } else {
            self.0
        }
    }

    fn from_sign_magnitude(negative: bool, magnitude: U256) -> NumericResult<Self> {
        if magnitude.is_zero() {
            return Ok(Self::ZERO);
        }
        if magnitude.bit(255) {
            // Only -2^255 itself is representable with the high bit set.
            if negative && magnitude == SIGN_MASK {
                return Ok(Self(magnitude));
            }
            return Err(NumericError::Overflow);
        }
        if negative {
            Ok(Self((!magnitude).overflowing_add(U256::one()).0))
        } else {
            Ok(Self(magnitude))
        }
    }

    pub(crate) fn checked_neg(self) -> NumericResult<Self> {
        if self.0 == SIGN_MASK {
            return Err(NumericError::Overflow);
        }
        Ok(Self((!self.0).overflowing_add(U256::one()).0))
    }

    pub(crate) fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let (raw, _) = self.0.overflowing_add(rhs.0);
        let result = Self(raw);
        // Signed overflow: both operands share a sign the result lost.
        if self.is_negative() == rhs.is_negative()
            && result.is_negative() != self.is_negative()
        {
            return Err(NumericError::Overflow);
        }
        Ok(result)
    }

    pub(crate) fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        let (raw, _) = self.0.overflowing_sub(rhs.0);
        let result = Self(raw);
        if self.is_negative() != rhs.is_negative()
            && result.is_negative() != self.is_negative()
        {
            return Err(NumericError::Overflow);
        }
        Ok(result)
    }

    pub(crate) fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::ZERO);
        }
        let negative = self.is_negative() != rhs.is_negative();
        let magnitude = self
            .unsigned_abs()
            .checked_mul(rhs.unsigned_abs())
            .ok_or(NumericError::Overflow)?;
        Self::from_sign_magnitude(negative, magnitude)
    }

    pub(crate) fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let negative = self.is_negative() != rhs.is_negative();
        let magnitude = self.unsigned_abs() / rhs.unsigned_abs();
        Self::from_sign_magnitude(negative, magnitude)
    }

    pub(crate) fn checked_rem(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let magnitude = self.unsigned_abs() % rhs.unsigned_abs();
        Self::from_sign_magnitude(self.is_negative(), magnitude)
    }
}

impl PartialOrd for I256 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for I256 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Flipping the sign bit maps the signed order onto the unsigned one.
        (self.0 ^ SIGN_MASK).cmp(&(other.0 ^ SIGN_MASK))
    }
}
