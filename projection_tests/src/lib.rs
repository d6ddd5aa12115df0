//! Shared helpers for the projection integration tests.

use projection_shared::{
    math::Segment2,
    render::{Frame, Rgba},
};

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Segments drawn in the color of record slot `slot`.
pub fn slot_segments(frame: &Frame, slot: usize) -> Vec<Segment2> {
    let color = Rgba::for_slot(slot);
    frame
        .segments
        .iter()
        .filter(|(c, _)| *c == color)
        .map(|(_, s)| *s)
        .collect()
}

/// Asserts `a` and `b` agree to within `tol`.
#[track_caller]
pub fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} vs {b} (tol {tol})");
}
