use canvas_charts::core::{RangeFitOptions, calculate_scale_range};
use canvas_charts::telemetry::{init_default_tracing, init_tracing_with_default_filter};

#[test]
fn tracing_initializes_once_when_enabled() {
    assert_eq!(init_default_tracing(), cfg!(feature = "telemetry"));
    assert!(!init_tracing_with_default_filter("canvas_charts=trace"));

    // Fitting emits events through whichever subscriber is installed.
    let range = calculate_scale_range(
        &[Some(1.0), Some(9.0)],
        200.0,
        12.0,
        RangeFitOptions::default(),
    )
    .expect("range fit");
    assert!(range.steps >= 2);
}
