use approx::assert_relative_eq;
use canvas_charts::ChartError;
use canvas_charts::core::{
    LabelTemplate, RangeFitOptions, RangeOverride, ScaleRange, build_value_labels,
    calculate_scale_range,
};

fn integers_only() -> RangeFitOptions {
    RangeFitOptions {
        begin_at_zero: false,
        integers_only: true,
    }
}

fn values(raw: &[f64]) -> Vec<Option<f64>> {
    raw.iter().copied().map(Some).collect()
}

#[test]
fn mixed_values_fit_round_bounds_within_label_budget() {
    let range = calculate_scale_range(&values(&[10.0, 20.0, 20.0, 30.0]), 300.0, 12.0, integers_only())
        .expect("range fit");

    assert_eq!(range.min, 10.0);
    assert_eq!(range.max, 30.0);
    assert_eq!(range.steps, 4);
    assert_eq!(range.step_value, 5.0);
    assert!(range.steps >= 2 && range.steps <= 16);
}

#[test]
fn equal_values_split_around_the_value() {
    let range =
        calculate_scale_range(&values(&[5.0, 5.0]), 300.0, 12.0, integers_only()).expect("range fit");

    assert!(range.max > range.min);
    assert!(range.min < 5.0);
    assert!(range.max > 5.0);
    assert_eq!(range, ScaleRange::from_steps(4.0, 2, 1.0));
}

#[test]
fn equal_zero_values_still_get_a_range_below_the_value() {
    let range =
        calculate_scale_range(&values(&[0.0, 0.0]), 300.0, 12.0, integers_only()).expect("range fit");

    assert!(range.min < 0.0);
    assert!(range.max > 0.0);
}

#[test]
fn equal_small_positive_values_grow_upwards_only() {
    let range =
        calculate_scale_range(&values(&[0.3]), 300.0, 12.0, integers_only()).expect("range fit");

    assert!(range.min >= 0.0);
    assert!(range.min < 0.3);
    assert!(range.max > 0.3);
}

#[test]
fn begin_at_zero_biases_equal_values_upward_and_pins_min() {
    let options = RangeFitOptions {
        begin_at_zero: true,
        integers_only: true,
    };
    let range = calculate_scale_range(&values(&[5.0]), 300.0, 12.0, options).expect("range fit");

    assert_eq!(range.min, 0.0);
    assert_eq!(range.max, 6.0);
    assert_eq!(range.steps, 6);
}

#[test]
fn begin_at_zero_keeps_zero_visible_for_negative_data() {
    let options = RangeFitOptions {
        begin_at_zero: true,
        integers_only: true,
    };
    let range =
        calculate_scale_range(&values(&[-25.0, -5.0]), 300.0, 12.0, options).expect("range fit");

    assert_eq!(range.min, -30.0);
    assert_eq!(range.step_value, 5.0);
    assert_eq!(range.steps, 6);
    assert_relative_eq!(range.max, 0.0);
}

#[test]
fn tiny_drawing_area_forces_minimum_steps() {
    let range = calculate_scale_range(&values(&[3.0, 38.0]), 20.0, 12.0, integers_only())
        .expect("range fit");

    assert_eq!(range, ScaleRange::from_steps(0.0, 2, 20.0));
}

#[test]
fn uneven_doubling_falls_back_to_minimum_steps() {
    let range =
        calculate_scale_range(&values(&[0.0, 9.0]), 90.0, 12.0, integers_only()).expect("range fit");

    assert_eq!(range.steps, 2);
    assert_eq!(range.step_value, 4.5);
    assert_eq!(range.min, 0.0);
    assert_eq!(range.max, 9.0);
}

#[test]
fn integers_only_refinement_stops_before_fractional_steps() {
    let range = calculate_scale_range(&values(&[0.0, 1000.0]), 60.0, 12.0, integers_only())
        .expect("range fit");

    assert_eq!(range.steps, 2);
    assert_eq!(range.step_value, 500.0);
}

#[test]
fn fractional_data_refines_below_one() {
    let range = calculate_scale_range(&values(&[0.1, 0.45]), 300.0, 12.0, integers_only())
        .expect("range fit");

    assert_eq!(range.steps, 8);
    assert_relative_eq!(range.step_value, 0.05);
    assert_relative_eq!(range.min, 0.1);
    assert_relative_eq!(range.max, 0.5, epsilon = 1e-12);
}

#[test]
fn missing_values_are_skipped() {
    let with_gaps = vec![None, Some(10.0), None, Some(30.0), Some(f64::NAN)];
    let dense = values(&[10.0, 30.0]);

    let sparse_range =
        calculate_scale_range(&with_gaps, 300.0, 12.0, integers_only()).expect("sparse fit");
    let dense_range = calculate_scale_range(&dense, 300.0, 12.0, integers_only()).expect("dense fit");

    assert_eq!(sparse_range, dense_range);
}

#[test]
fn empty_or_all_missing_values_are_rejected() {
    let empty = calculate_scale_range(&[], 300.0, 12.0, integers_only());
    assert!(matches!(empty, Err(ChartError::EmptyValues)));

    let all_missing = calculate_scale_range(&[None, None], 300.0, 12.0, integers_only());
    assert!(matches!(all_missing, Err(ChartError::EmptyValues)));
}

#[test]
fn non_finite_sizes_are_rejected() {
    let data = values(&[1.0, 2.0]);
    assert!(matches!(
        calculate_scale_range(&data, f64::NAN, 12.0, integers_only()),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        calculate_scale_range(&data, 300.0, 0.0, integers_only()),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn huge_equal_values_still_get_a_finite_span() {
    for value in [1.0e17, -1.0e17, 1.0e300] {
        let range = calculate_scale_range(&values(&[value, value]), 300.0, 12.0, integers_only())
            .expect("range fit");

        assert!(range.min.is_finite() && range.max.is_finite());
        assert!(range.max > range.min);
        assert!(range.steps >= 2);
        assert!(range.step_value > 0.0);
        assert_eq!(range.min + f64::from(range.steps) * range.step_value, range.max);
        assert!(range.min <= value && value <= range.max);
    }
}

#[test]
fn unrepresentable_spans_are_rejected() {
    let overflowing = calculate_scale_range(&values(&[-1.0e308, 1.0e308]), 300.0, 12.0, integers_only());
    assert!(matches!(overflowing, Err(ChartError::InvalidData(_))));

    let rounds_past_max = calculate_scale_range(&values(&[0.0, 1.5e308]), 300.0, 12.0, integers_only());
    assert!(matches!(rounds_past_max, Err(ChartError::InvalidData(_))));

    let at_the_limit = calculate_scale_range(&values(&[f64::MAX]), 300.0, 12.0, integers_only());
    assert!(matches!(at_the_limit, Err(ChartError::InvalidData(_))));
}

#[test]
fn range_override_bypasses_fitting() {
    let range = RangeOverride {
        steps: 5,
        step_width: 20.0,
        start_value: -50.0,
    }
    .to_range()
    .expect("override range");

    assert_eq!(range, ScaleRange::from_steps(-50.0, 5, 20.0));
    assert_eq!(range.max, 50.0);
}

#[test]
fn invalid_range_override_is_rejected() {
    let zero_steps = RangeOverride {
        steps: 0,
        step_width: 1.0,
        start_value: 0.0,
    };
    let negative_width = RangeOverride {
        steps: 3,
        step_width: -1.0,
        start_value: 0.0,
    };
    assert!(zero_steps.to_range().is_err());
    assert!(negative_width.to_range().is_err());
}

#[test]
fn value_labels_cover_every_grid_line() {
    let range = calculate_scale_range(&values(&[10.0, 20.0, 20.0, 30.0]), 300.0, 12.0, integers_only())
        .expect("range fit");
    let labels = build_value_labels(&range, &LabelTemplate::new("{value} km"));

    assert_eq!(labels, vec!["10 km", "15 km", "20 km", "25 km", "30 km"]);
}
