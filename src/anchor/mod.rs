// ============================================================================
// Anchor Interpolation
// Time-windowed geometric interpolation of the sqrt-price anchor
// ============================================================================

use crate::numeric::{NumericError, NumericResult, SqrtPrice, Wad};

#[cfg(test)]
mod reference;

/// Seconds since an epoch. Monotonically increasing; no wraparound handling
/// inside the window's domain.
pub type Timestamp = u64;

/// Anchor value at `current_time` for a transition from `start_sqrt_q0` to
/// `end_sqrt_q0` over `[start_time, end_time)`.
///
/// Three stateless regimes:
/// - before `start_time`, the start value is returned unchanged;
/// - from `end_time` on (inclusive), the end value is returned unchanged;
/// - inside the window the anchor is interpolated geometrically:
///
/// ```text
/// sqrtQ0(t) = start * (end / start)^((t - t0) / (t1 - t0))
/// ```
///
/// Geometric rather than arithmetic interpolation keeps the anchor moving at
/// a constant proportional rate, so each second of the window applies the
/// same relative price step. The result is non-decreasing in `current_time`
/// when `end >= start` and non-increasing otherwise, and identical inputs
/// always produce bit-identical output.
///
/// # Errors
/// - `InvalidDomain` if either anchor value is zero, or the window is
///   reversed (`end_time < start_time`)
/// - `DivisionByZero` if the window has zero width
pub fn calculate_sqrt_q0(
    current_time: Timestamp,
    start_sqrt_q0: SqrtPrice,
    end_sqrt_q0: SqrtPrice,
    start_time: Timestamp,
    end_time: Timestamp,
) -> NumericResult<SqrtPrice> {
    if start_sqrt_q0.is_zero() || end_sqrt_q0.is_zero() {
        return Err(NumericError::InvalidDomain);
    }
    if end_time == start_time {
        return Err(NumericError::DivisionByZero);
    }
    if end_time < start_time {
        return Err(NumericError::InvalidDomain);
    }

    if current_time < start_time {
        tracing::trace!(current_time, start_time, "anchor transition not started");
        return Ok(start_sqrt_q0);
    }
    if current_time >= end_time {
        tracing::trace!(current_time, end_time, "anchor transition complete");
        return Ok(end_sqrt_q0);
    }

    // progress ∈ [0, 1): the boundary cases above guarantee a strict
    // in-window timestamp, so the exponent stays inside pow's domain.
    let elapsed = Wad::from_integer(current_time - start_time);
    let width = Wad::from_integer(end_time - start_time);
    let progress = elapsed.div_down(width)?;

    let ratio = end_sqrt_q0.div_down(start_sqrt_q0)?;
    let interpolated = start_sqrt_q0.mul_down(ratio.pow(progress)?)?;

    tracing::trace!(
        current_time,
        %progress,
        %interpolated,
        "anchor transition in progress"
    );
    Ok(interpolated)
}

// ============================================================================
// Transition Window
// ============================================================================

/// A validated anchor transition plan.
///
/// The interpolation itself is a pure function of caller-supplied values;
/// this wrapper just moves the window validation to construction time for
/// callers that keep the plan around between evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionWindow {
    start_time: Timestamp,
    end_time: Timestamp,
    start_sqrt_q0: SqrtPrice,
    end_sqrt_q0: SqrtPrice,
}

impl TransitionWindow {
    /// Create a validated window.
    ///
    /// # Errors
    /// Same conditions as [`calculate_sqrt_q0`]: zero-width windows report
    /// `DivisionByZero`, reversed windows and zero anchor values report
    /// `InvalidDomain`.
    pub fn new(
        start_time: Timestamp,
        end_time: Timestamp,
        start_sqrt_q0: SqrtPrice,
        end_sqrt_q0: SqrtPrice,
    ) -> NumericResult<Self> {
        if start_sqrt_q0.is_zero() || end_sqrt_q0.is_zero() {
            return Err(NumericError::InvalidDomain);
        }
        if end_time == start_time {
            return Err(NumericError::DivisionByZero);
        }
        if end_time < start_time {
            return Err(NumericError::InvalidDomain);
        }
        Ok(Self {
            start_time,
            end_time,
            start_sqrt_q0,
            end_sqrt_q0,
        })
    }

    /// Anchor value at `current_time`.
    pub fn sqrt_q0_at(&self, current_time: Timestamp) -> NumericResult<SqrtPrice> {
        calculate_sqrt_q0(
            current_time,
            self.start_sqrt_q0,
            self.end_sqrt_q0,
            self.start_time,
            self.end_time,
        )
    }

    /// Whether the transition is finished at `current_time`.
    pub fn is_complete(&self, current_time: Timestamp) -> bool {
        current_time >= self.end_time
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    const WAD: u128 = 1_000_000_000_000_000_000;

    fn sqrt_price(units: u64) -> SqrtPrice {
        SqrtPrice::from_integer(units)
    }

    fn assert_within(actual: SqrtPrice, expected_raw: u128, tolerance_raw: u128) {
        let actual = actual.raw();
        let expected = U256::from(expected_raw);
        let diff = if actual > expected {
            actual - expected
        } else {
            expected - actual
        };
        assert!(
            diff <= U256::from(tolerance_raw),
            "expected {expected_raw} +/- {tolerance_raw}, got {actual}"
        );
    }

    #[test]
    fn test_pre_window_returns_start_exactly() {
        let result = calculate_sqrt_q0(0, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        assert_eq!(result, sqrt_price(100));
    }

    #[test]
    fn test_post_window_returns_end_exactly() {
        // currentTime=100 with endTime=50: transition already complete.
        let result = calculate_sqrt_q0(100, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        assert_eq!(result, sqrt_price(300));
    }

    #[test]
    fn test_end_boundary_is_inclusive() {
        let result = calculate_sqrt_q0(50, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        assert_eq!(result, sqrt_price(300));
    }

    #[test]
    fn test_start_boundary_is_exact() {
        // progress == 0 must route through pow's exact zero-exponent case.
        let result = calculate_sqrt_q0(1, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        assert_eq!(result, sqrt_price(100));
    }

    #[test]
    fn test_in_window_midpoint_accuracy() {
        // 100 * 3^(24/49) = 171.274237649303079342... (progress truncated to
        // 18 decimals before exponentiation). Tolerance is 1e-12 relative.
        let result = calculate_sqrt_q0(25, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        assert_within(result, 171_274_237_649_303_079_342, 171_274_238);
    }

    #[test]
    fn test_in_window_early_accuracy() {
        // 100 * 3^(9/49) = 122.358604770778508770...
        let result = calculate_sqrt_q0(10, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        assert_within(result, 122_358_604_770_778_508_770, 122_358_605);
    }

    #[test]
    fn test_in_window_final_tick_converges_to_end() {
        // 100 * 3^(48/49) = 293.348644823499484460...
        let result = calculate_sqrt_q0(49, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        assert_within(result, 293_348_644_823_499_484_460, 293_348_645);
        assert!(result < sqrt_price(300));
    }

    #[test]
    fn test_in_window_decreasing_transition() {
        // 300 * (1/3)^(24/49) = 175.157691032478935097... (ratio truncated
        // to 0.333333333333333333 before exponentiation).
        let result = calculate_sqrt_q0(25, sqrt_price(300), sqrt_price(100), 1, 50).unwrap();
        assert_within(result, 175_157_691_032_478_935_097, 175_157_692);
    }

    #[test]
    fn test_matches_arbitrary_precision_reference() {
        for t in [2u64, 7, 13, 25, 37, 44, 49] {
            let engine = calculate_sqrt_q0(t, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
            reference::assert_matches_reference(engine, t, 100 * WAD, 300 * WAD, 1, 50);

            let engine = calculate_sqrt_q0(t, sqrt_price(300), sqrt_price(100), 1, 50).unwrap();
            reference::assert_matches_reference(engine, t, 300 * WAD, 100 * WAD, 1, 50);
        }
    }

    #[test]
    fn test_monotone_non_decreasing_across_regimes() {
        let mut previous = SqrtPrice::ZERO;
        for t in 0..60u64 {
            let value = calculate_sqrt_q0(t, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
            assert!(
                value >= previous,
                "anchor moved backward at t={t}: {value:?} < {previous:?}"
            );
            previous = value;
        }
    }

    #[test]
    fn test_monotone_non_increasing_when_decreasing() {
        let mut previous = sqrt_price(301);
        for t in 0..60u64 {
            let value = calculate_sqrt_q0(t, sqrt_price(300), sqrt_price(100), 1, 50).unwrap();
            assert!(
                value <= previous,
                "anchor moved upward at t={t}: {value:?} > {previous:?}"
            );
            previous = value;
        }
    }

    #[test]
    fn test_deterministic() {
        let first = calculate_sqrt_q0(25, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
        for _ in 0..10 {
            let again = calculate_sqrt_q0(25, sqrt_price(100), sqrt_price(300), 1, 50).unwrap();
            assert_eq!(first.raw(), again.raw());
        }
    }

    #[test]
    fn test_zero_width_window_fails_loudly() {
        assert_eq!(
            calculate_sqrt_q0(25, sqrt_price(100), sqrt_price(300), 30, 30),
            Err(NumericError::DivisionByZero)
        );
        // Even when the timestamp would fall outside the window.
        assert_eq!(
            calculate_sqrt_q0(5, sqrt_price(100), sqrt_price(300), 30, 30),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_reversed_window_rejected() {
        assert_eq!(
            calculate_sqrt_q0(25, sqrt_price(100), sqrt_price(300), 50, 1),
            Err(NumericError::InvalidDomain)
        );
    }

    #[test]
    fn test_zero_anchor_values_rejected() {
        assert_eq!(
            calculate_sqrt_q0(25, SqrtPrice::ZERO, sqrt_price(300), 1, 50),
            Err(NumericError::InvalidDomain)
        );
        assert_eq!(
            calculate_sqrt_q0(25, sqrt_price(100), SqrtPrice::ZERO, 1, 50),
            Err(NumericError::InvalidDomain)
        );
    }

    #[test]
    fn test_identity_window_in_every_regime() {
        for t in [0u64, 1, 25, 49, 50, 100] {
            let result =
                calculate_sqrt_q0(t, sqrt_price(100), sqrt_price(100), 1, 50).unwrap();
            assert_eq!(result, sqrt_price(100));
        }
    }

    #[test]
    fn test_transition_window_wrapper() {
        let window =
            TransitionWindow::new(1, 50, sqrt_price(100), sqrt_price(300)).unwrap();
        assert_eq!(window.sqrt_q0_at(0).unwrap(), sqrt_price(100));
        assert_eq!(window.sqrt_q0_at(50).unwrap(), sqrt_price(300));
        assert!(!window.is_complete(49));
        assert!(window.is_complete(50));

        assert_eq!(
            TransitionWindow::new(30, 30, sqrt_price(100), sqrt_price(300)),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(
            TransitionWindow::new(50, 1, sqrt_price(100), sqrt_price(300)),
            Err(NumericError::InvalidDomain)
        );
    }
}
