use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

/// A scale always shows at least a base line and a top line.
pub const MIN_STEPS: u32 = 2;

/// Vertical room one axis label needs, as a multiple of its font size.
const LABEL_SLOT_FACTOR: f64 = 1.5;

const MAX_REFINEMENT_PASSES: usize = 128;

/// Relative spread given to a repeated value too large for a +-0.5 split.
const EQUAL_SPREAD_ULPS: f64 = 1024.0;

/// Flags steering the "nice" range search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeFitOptions {
    /// Pin the lower bound to zero (or include zero for all-negative data).
    pub begin_at_zero: bool,
    /// Never refine to fractional steps when the data spans whole units.
    pub integers_only: bool,
}

/// Fitted axis range: `max == min + steps * step_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub steps: u32,
    pub step_value: f64,
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    #[must_use]
    pub fn from_steps(min: f64, steps: u32, step_value: f64) -> Self {
        Self {
            steps,
            step_value,
            min,
            max: min + f64::from(steps) * step_value,
        }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Values of every grid line from `min` up to `max`, inclusive.
    pub fn tick_values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.steps).map(|index| self.min + f64::from(index) * self.step_value)
    }
}

/// Hard-coded scale that replaces the fitted range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeOverride {
    pub steps: u32,
    pub step_width: f64,
    pub start_value: f64,
}

impl RangeOverride {
    pub fn to_range(self) -> ChartResult<ScaleRange> {
        if self.steps == 0 {
            return Err(ChartError::InvalidData(
                "scale override needs at least one step".to_owned(),
            ));
        }
        if !self.step_width.is_finite() || self.step_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "scale override step width must be finite and > 0".to_owned(),
            ));
        }
        if !self.start_value.is_finite() {
            return Err(ChartError::InvalidData(
                "scale override start value must be finite".to_owned(),
            ));
        }
        Ok(ScaleRange::from_steps(
            self.start_value,
            self.steps,
            self.step_width,
        ))
    }
}

/// Turns raw values into a "nice" axis range for `drawing_size_px` pixels.
///
/// `None` and non-finite values are skipped. At least one finite value is
/// required; otherwise `ChartError::EmptyValues` is returned. Spans that
/// overflow or collapse in `f64` yield `ChartError::InvalidData`.
///
/// The span's order of magnitude snaps the bounds outwards (3..38 becomes
/// 0..40), then the step is doubled or halved until the step count fits the
/// number of labels that can be stacked legibly at `text_size_px`.
pub fn calculate_scale_range(
    values: &[Option<f64>],
    drawing_size_px: f64,
    text_size_px: f64,
    options: RangeFitOptions,
) -> ChartResult<ScaleRange> {
    if !drawing_size_px.is_finite() {
        return Err(ChartError::InvalidData(
            "drawing size must be finite".to_owned(),
        ));
    }
    if !text_size_px.is_finite() || text_size_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "text size must be finite and > 0".to_owned(),
        ));
    }

    let (mut min_value, mut max_value) = finite_extent(values).ok_or(ChartError::EmptyValues)?;

    let min_steps = f64::from(MIN_STEPS);
    let max_steps = (drawing_size_px / (text_size_px * LABEL_SLOT_FACTOR)).floor();
    let mut skip_fitting = min_steps >= max_steps;

    if max_value == min_value {
        // Half a unit, or enough ulps that rounding to the grid keeps the
        // value inside once 0.5 is below float resolution.
        let half_unit = 0.5_f64.max(min_value.abs() * f64::EPSILON * EQUAL_SPREAD_ULPS);
        max_value += half_unit;
        // Values in (0, 0.5) only grow upwards so the axis does not dip below zero.
        let keeps_non_negative = min_value > 0.0 && min_value < 0.5;
        if !options.begin_at_zero && !keeps_non_negative {
            min_value -= half_unit;
        } else {
            max_value += half_unit;
        }
    }

    let value_range = max_value - min_value;
    if !value_range.is_finite() || value_range <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "value span {min_value}..{max_value} is not representable"
        )));
    }
    let magnitude = value_range.log10().floor() as i32;
    let unit = 10f64.powi(magnitude);
    let mut graph_max = (max_value / unit).ceil() * unit;
    let mut graph_min = (min_value / unit).floor() * unit;
    if options.begin_at_zero {
        graph_min = graph_min.min(0.0);
        graph_max = graph_max.max(0.0);
    }
    let graph_range = graph_max - graph_min;
    if !graph_range.is_finite() || graph_range <= 0.0 || unit <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "rounded span {graph_min}..{graph_max} is not representable"
        )));
    }

    let mut step_value = unit;
    let mut steps = (graph_range / step_value).round();
    let mut passes = 0;

    while !skip_fitting && (steps > max_steps || steps * 2.0 < max_steps) {
        passes += 1;
        if passes > MAX_REFINEMENT_PASSES {
            warn!(
                passes,
                steps, step_value, "range refinement did not settle, using minimum steps"
            );
            skip_fitting = true;
            break;
        }

        if steps > max_steps {
            step_value *= 2.0;
            let exact_steps = graph_range / step_value;
            steps = exact_steps.round();
            if !is_whole(exact_steps) {
                skip_fitting = true;
            }
        } else if options.integers_only && magnitude >= 0 {
            let halved = step_value / 2.0;
            if halved.fract() != 0.0 {
                break;
            }
            step_value = halved;
            steps = (graph_range / step_value).round();
        } else {
            step_value /= 2.0;
            steps = (graph_range / step_value).round();
        }
        trace!(passes, steps, step_value, "range refinement pass");
    }

    let range = if skip_fitting {
        ScaleRange::from_steps(graph_min, MIN_STEPS, graph_range / min_steps)
    } else if steps < min_steps {
        // Only reachable when integer-only refinement stopped on a single
        // whole step; extend upwards instead of splitting it into fractions.
        ScaleRange::from_steps(graph_min, MIN_STEPS, step_value)
    } else {
        ScaleRange::from_steps(graph_min, steps as u32, step_value)
    };

    if !range.max.is_finite() || range.max <= range.min {
        return Err(ChartError::InvalidData(format!(
            "fitted range {}..{} is not representable",
            range.min, range.max
        )));
    }

    trace!(
        steps = range.steps,
        step_value = range.step_value,
        min = range.min,
        max = range.max,
        skip_fitting,
        "scale range fitted"
    );
    Ok(range)
}

fn finite_extent(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

fn is_whole(value: f64) -> bool {
    (value - value.round()).abs() <= 1e-9 * value.abs().max(1.0)
}
