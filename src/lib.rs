// ============================================================================
// ACL-AMM Math Library
// Deterministic fixed-point price-anchor interpolation
// ============================================================================

//! # aclamm-math
//!
//! Math for the time-varying price anchor ("sqrt Q0") of an adaptive
//! concentrated-liquidity AMM. The pool's pricing logic recomputes the
//! anchor on every state-changing operation; this crate provides that
//! computation and the fixed-point primitives under it.
//!
//! ## Features
//!
//! - **Geometric interpolation** of the anchor across a time window: equal
//!   relative price steps per second instead of equal absolute steps
//! - **Fixed-point `pow`** via ladder-reduced ln/exp kernels, within 1e-12
//!   relative error of arbitrary precision, monotonic in both arguments
//! - **Bit-identical determinism**: integer arithmetic only, no
//!   floating-point anywhere, safe to call concurrently
//! - **Explicit rounding**: every truncation rounds toward zero, in the
//!   pool's favor
//!
//! ## Example
//!
//! ```rust
//! use aclamm_math::prelude::*;
//!
//! let start = SqrtPrice::from_integer(100);
//! let end = SqrtPrice::from_integer(300);
//!
//! // Before the window opens the anchor is pinned to the start value...
//! let anchor = calculate_sqrt_q0(0, start, end, 1, 50).unwrap();
//! assert_eq!(anchor, start);
//!
//! // ...and from the end of the window on, to the end value.
//! let anchor = calculate_sqrt_q0(50, start, end, 1, 50).unwrap();
//! assert_eq!(anchor, end);
//!
//! // In between it glides geometrically.
//! let anchor = calculate_sqrt_q0(25, start, end, 1, 50).unwrap();
//! assert!(anchor > start && anchor < end);
//! ```

pub mod anchor;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::anchor::{calculate_sqrt_q0, Timestamp, TransitionWindow};
    pub use crate::numeric::{NumericError, NumericResult, SqrtPrice, Wad};
}
