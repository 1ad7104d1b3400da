use canvas_charts::core::{
    LinearScale, LinearScaleOptions, RadialScale, RadialScaleOptions, RangeFitOptions, Viewport,
    calculate_scale_range,
};
use canvas_charts::element::{ArcShape, AttributeKey, Element, PointShape, attribute_set};
use canvas_charts::render::EstimatedTextMeasurer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn sample_values(count: usize) -> Vec<Option<f64>> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            if i % 97 == 0 {
                None
            } else {
                Some(50.0 + (t * 0.37).sin() * 40.0 + t * 0.01)
            }
        })
        .collect()
}

fn bench_range_fit_10k(c: &mut Criterion) {
    let values = sample_values(10_000);
    let options = RangeFitOptions {
        begin_at_zero: false,
        integers_only: true,
    };

    c.bench_function("range_fit_10k", |b| {
        b.iter(|| {
            let _ = calculate_scale_range(black_box(&values), black_box(480.0), 12.0, options)
                .expect("range fit");
        })
    });
}

fn bench_linear_scale_fit_200_labels(c: &mut Criterion) {
    let labels: Vec<String> = (0..200).map(|i| format!("Category {i}")).collect();
    let values = sample_values(200);
    let measurer = EstimatedTextMeasurer;
    let mut scale = LinearScale::new(
        Viewport::new(1600, 900),
        labels,
        values,
        LinearScaleOptions::default(),
        &measurer,
    )
    .expect("linear scale");

    c.bench_function("linear_scale_fit_200_labels", |b| {
        b.iter(|| {
            scale.fit(black_box(&measurer)).expect("fit");
        })
    });
}

fn bench_radial_scale_fit_24_spokes(c: &mut Criterion) {
    let labels: Vec<String> = (0..24).map(|i| format!("Spoke label {i}")).collect();
    let values = sample_values(24);
    let measurer = EstimatedTextMeasurer;
    let mut scale = RadialScale::new(
        Viewport::new(800, 600),
        labels,
        values,
        RadialScaleOptions::default(),
        &measurer,
    )
    .expect("radial scale");

    c.bench_function("radial_scale_fit_24_spokes", |b| {
        b.iter(|| {
            scale.fit(black_box(&measurer)).expect("fit");
        })
    });
}

fn bench_hit_test_and_transition_5k(c: &mut Criterion) {
    let points: Vec<Element<PointShape>> = (0..5_000)
        .map(|i| Element::new(PointShape::at(i as f64 * 0.3, 200.0)))
        .collect();
    let arc = Element::new(ArcShape {
        x: 400.0,
        y: 300.0,
        start_angle: -0.4,
        end_angle: 2.1,
        inner_radius: 40.0,
        outer_radius: 160.0,
        ..ArcShape::default()
    });
    let targets = attribute_set([(AttributeKey::X, 10.0), (AttributeKey::Y, 20.0)]);

    c.bench_function("hit_test_5k_points", |b| {
        b.iter(|| {
            let hits = points
                .iter()
                .filter(|point| point.in_range(black_box(750.0), black_box(205.0)))
                .count();
            let _ = black_box(hits) + usize::from(arc.in_range(black_box(500.0), 320.0));
        })
    });

    c.bench_function("transition_5k_points", |b| {
        let mut animated = points.clone();
        b.iter(|| {
            for point in &mut animated {
                point.transition(&targets, black_box(0.5)).expect("transition");
            }
        })
    });
}

criterion_group!(
    benches,
    bench_range_fit_10k,
    bench_linear_scale_fit_200_labels,
    bench_radial_scale_fit_24_spokes,
    bench_hit_test_and_transition_5k
);
criterion_main!(benches);
