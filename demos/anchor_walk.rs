// ============================================================================
// Anchor Walk Example
// ============================================================================

use aclamm_math::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Anchor Transition Walk ===\n");

    let window = TransitionWindow::new(
        10,
        60,
        SqrtPrice::from_integer(100),
        SqrtPrice::from_integer(300),
    )
    .expect("valid window");

    println!("transitioning sqrt Q0 from 100 to 300 over t = [10, 60)\n");

    for t in (0..=70u64).step_by(5) {
        let anchor = window.sqrt_q0_at(t).expect("valid inputs");
        let marker = if window.is_complete(t) { " (complete)" } else { "" };
        println!("t = {t:>3}  sqrt_q0 = {anchor}{marker}");
    }
}
