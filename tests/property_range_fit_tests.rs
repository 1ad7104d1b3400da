use canvas_charts::core::{RangeFitOptions, calculate_scale_range};
use proptest::prelude::*;

fn large_magnitude() -> impl Strategy<Value = f64> {
    (-10.0f64..10.0, 6i32..=300).prop_map(|(mantissa, exponent)| mantissa * 10f64.powi(exponent))
}

fn finite_values() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(
        prop_oneof![
            7 => (-1.0e6f64..1.0e6).prop_map(Some),
            2 => large_magnitude().prop_map(Some),
            1 => Just(None),
        ],
        1..48,
    )
    .prop_filter("needs one finite value", |values| {
        values.iter().any(Option::is_some)
    })
}

proptest! {
    #[test]
    fn fitted_range_is_exact_and_has_two_steps(
        values in finite_values(),
        drawing_size in 10.0f64..2_000.0,
        text_size in 6.0f64..32.0,
        begin_at_zero in any::<bool>(),
        integers_only in any::<bool>()
    ) {
        let options = RangeFitOptions { begin_at_zero, integers_only };
        let range = calculate_scale_range(&values, drawing_size, text_size, options)
            .expect("range fit");

        prop_assert!(range.steps >= 2);
        prop_assert_eq!(range.min + f64::from(range.steps) * range.step_value, range.max);
        prop_assert!(range.step_value > 0.0);

        let max_steps = (drawing_size / (text_size * 1.5)).floor().max(2.0);
        prop_assert!(f64::from(range.steps) <= max_steps);
    }

    #[test]
    fn fitted_range_contains_every_value(
        values in finite_values(),
        drawing_size in 10.0f64..2_000.0,
        begin_at_zero in any::<bool>(),
        integers_only in any::<bool>()
    ) {
        let options = RangeFitOptions { begin_at_zero, integers_only };
        let range = calculate_scale_range(&values, drawing_size, 12.0, options)
            .expect("range fit");
        let tolerance = 1e-9 * range.span().abs().max(1.0);

        for value in values.iter().flatten() {
            prop_assert!(*value >= range.min - tolerance);
            prop_assert!(*value <= range.max + tolerance);
        }
        if begin_at_zero {
            prop_assert!(range.min <= 0.0);
            prop_assert!(range.max >= -tolerance);
        }
    }

    #[test]
    fn repeated_value_gets_a_span_below_it(
        value in -1.0e5f64..1.0e5,
        repeats in 1usize..8,
        drawing_size in 60.0f64..1_000.0
    ) {
        let values = vec![Some(value); repeats];
        let options = RangeFitOptions { begin_at_zero: false, integers_only: true };
        let range = calculate_scale_range(&values, drawing_size, 12.0, options)
            .expect("range fit");

        prop_assert!(range.max > range.min);
        prop_assert!(range.min < value);
    }

    #[test]
    fn repeated_large_value_keeps_a_finite_span(
        value in large_magnitude(),
        repeats in 1usize..8,
        begin_at_zero in any::<bool>()
    ) {
        let values = vec![Some(value); repeats];
        let options = RangeFitOptions { begin_at_zero, integers_only: true };
        let range = calculate_scale_range(&values, 300.0, 12.0, options)
            .expect("range fit");

        prop_assert!(range.min.is_finite() && range.max.is_finite());
        prop_assert!(range.max > range.min);
        prop_assert!(range.steps >= 2);
        prop_assert!(range.min <= value && value <= range.max);
    }

    #[test]
    fn integer_data_keeps_whole_steps_unless_minimum_fallback(
        raw in prop::collection::vec(-1_000i32..1_000, 2..32),
        drawing_size in 60.0f64..2_000.0
    ) {
        prop_assume!(raw.iter().min() != raw.iter().max());
        let values: Vec<Option<f64>> = raw.iter().map(|v| Some(f64::from(*v))).collect();
        let options = RangeFitOptions { begin_at_zero: false, integers_only: true };
        let range = calculate_scale_range(&values, drawing_size, 12.0, options)
            .expect("range fit");

        prop_assert!(range.step_value.fract() == 0.0 || range.steps == 2);
    }
}
