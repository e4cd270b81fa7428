// ============================================================================
// Numeric Module
// Deterministic fixed-point arithmetic for price-anchor calculations
// ============================================================================
//
// This module provides:
// - Wad: non-negative 18-decimal fixed-point value with truncating rounding
// - NumericError: error types for arithmetic operations
// - The pow/ln/exp kernels backing `Wad::pow`
//
// Design principles:
// - No floating-point operations anywhere: results are bit-identical on
//   every platform
// - All arithmetic returns Result (no panics)
// - Rounding direction is always toward zero and documented per operation

mod errors;
mod i256;
mod log_exp;
mod wad;

pub use errors::{NumericError, NumericResult};
pub use wad::{SqrtPrice, Wad, DECIMALS};
