// ============================================================================
// Reference Interpolation (test oracle)
// Arbitrary-precision mirror of calculate_sqrt_q0, compiled for tests only
// ============================================================================
//
// Mirrors the engine's signature and its truncating progress/ratio steps,
// but performs the exponentiation in `rust_decimal` (28 significant digits)
// instead of the fixed-point kernels. Diffing the two isolates the error of
// the pow approximation.

use super::Timestamp;
use crate::numeric::SqrtPrice;
use rust_decimal::{Decimal, MathematicalOps};

const WAD: u128 = 1_000_000_000_000_000_000;

/// Oracle's own relative-error budget: `powd` is itself an approximation,
/// so engine-vs-oracle diffs are checked against a looser bound than the
/// 1e-12 contract (which the precomputed-vector tests pin down exactly).
const ORACLE_RELATIVE_ERROR: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

fn from_raw(raw: u128) -> Decimal {
    Decimal::from_i128_with_scale(raw as i128, 18)
}

/// Reference anchor computation over raw 18-decimal values.
///
/// Only supports the magnitudes the tests use (raw values whose scaled
/// products fit in u128).
pub(super) fn calculate_sqrt_q0(
    current_time: Timestamp,
    start_sqrt_q0_raw: u128,
    end_sqrt_q0_raw: u128,
    start_time: Timestamp,
    end_time: Timestamp,
) -> Decimal {
    if current_time < start_time {
        return from_raw(start_sqrt_q0_raw);
    }
    if current_time >= end_time {
        return from_raw(end_sqrt_q0_raw);
    }

    // Same truncations the engine applies before exponentiating.
    let progress_raw =
        (current_time - start_time) as u128 * WAD / (end_time - start_time) as u128;
    let ratio_raw = end_sqrt_q0_raw * WAD / start_sqrt_q0_raw;

    let progress = from_raw(progress_raw);
    let ratio = from_raw(ratio_raw);
    from_raw(start_sqrt_q0_raw) * ratio.powd(progress)
}

/// Assert the engine result matches the oracle within its error budget.
pub(super) fn assert_matches_reference(
    engine_result: SqrtPrice,
    current_time: Timestamp,
    start_sqrt_q0_raw: u128,
    end_sqrt_q0_raw: u128,
    start_time: Timestamp,
    end_time: Timestamp,
) {
    let expected = calculate_sqrt_q0(
        current_time,
        start_sqrt_q0_raw,
        end_sqrt_q0_raw,
        start_time,
        end_time,
    );
    let actual = from_raw(engine_result.raw().low_u128());
    let relative = ((actual - expected) / expected).abs();
    assert!(
        relative <= ORACLE_RELATIVE_ERROR,
        "engine {actual} vs reference {expected} at t={current_time}: \
         relative error {relative}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_regimes() {
        let start = 100 * WAD;
        let end = 300 * WAD;
        assert_eq!(calculate_sqrt_q0(0, start, end, 1, 50), from_raw(start));
        assert_eq!(calculate_sqrt_q0(50, start, end, 1, 50), from_raw(end));
        assert_eq!(calculate_sqrt_q0(100, start, end, 1, 50), from_raw(end));
    }

    #[test]
    fn test_reference_midpoint_against_precomputed() {
        // 100 * 3^(24/49) = 171.274237649303079342...
        let value = calculate_sqrt_q0(25, 100 * WAD, 300 * WAD, 1, 50);
        let expected = from_raw(171_274_237_649_303_079_342);
        let relative = ((value - expected) / expected).abs();
        assert!(relative <= ORACLE_RELATIVE_ERROR, "oracle drifted: {value}");
    }
}
