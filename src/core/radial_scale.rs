use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::geometry::angle_from_point;
use crate::core::labels::{LabelTemplate, build_value_labels};
use crate::core::range_fit::{
    RangeFitOptions, RangeOverride, ScaleRange, calculate_scale_range,
};
use crate::core::types::{PixelPoint, Viewport};
use crate::error::ChartResult;
use crate::render::{Color, DrawingContext, FontSpec, TextBaseline, TextHAlign, TextMeasurer};

/// Gap between a spoke tip and its point label.
const POINT_LABEL_GAP_PX: f64 = 5.0;
/// Below this, `sin(angle + π/2)` is treated as zero when projecting protrusion.
const PROJECTION_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialScaleOptions {
    pub display: bool,
    pub show_labels: bool,
    pub font: FontSpec,
    pub text_color: Color,
    pub range_fit: RangeFitOptions,
    pub range_override: Option<RangeOverride>,
    pub label_template: LabelTemplate,
    /// Circular grid without point labels (polar-area charts).
    pub line_arc: bool,
    pub line_width: f64,
    pub line_color: Color,
    pub show_label_backdrop: bool,
    pub backdrop_color: Color,
    pub backdrop_padding_x: f64,
    pub backdrop_padding_y: f64,
    pub angle_line_width: f64,
    pub angle_line_color: Color,
    /// Draw an angle line on every `n`th spoke.
    pub angle_line_interval: usize,
    pub point_label_font: FontSpec,
    pub point_label_color: Color,
    /// One wedge colour per spoke; ignored unless the length matches.
    pub background_colors: Vec<Color>,
}

impl Default for RadialScaleOptions {
    fn default() -> Self {
        let grey = Color::from_rgba8(0x66, 0x66, 0x66, 1.0);
        Self {
            display: true,
            show_labels: false,
            font: FontSpec::default(),
            text_color: grey,
            range_fit: RangeFitOptions {
                begin_at_zero: true,
                integers_only: true,
            },
            range_override: None,
            label_template: LabelTemplate::default(),
            line_arc: false,
            line_width: 1.0,
            line_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            show_label_backdrop: true,
            backdrop_color: Color::rgba(1.0, 1.0, 1.0, 0.75),
            backdrop_padding_x: 2.0,
            backdrop_padding_y: 2.0,
            angle_line_width: 1.0,
            angle_line_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            angle_line_interval: 1,
            point_label_font: FontSpec {
                size_px: 10.0,
                ..FontSpec::default()
            },
            point_label_color: grey,
            background_colors: Vec::new(),
        }
    }
}

/// Partial update applied by [`RadialScale::update`] before refitting.
#[derive(Debug, Clone, Default)]
pub struct RadialScaleUpdate {
    pub viewport: Option<Viewport>,
    pub values: Option<Vec<Option<f64>>>,
    pub labels: Option<Vec<String>>,
    pub options: Option<RadialScaleOptions>,
}

/// Axis geometry for circular charts.
///
/// Spoke 0 points straight up and spokes proceed clockwise. Unless
/// `line_arc` is set, the radius is shrunk and the center shifted sideways so
/// every point label stays on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialScale {
    options: RadialScaleOptions,
    viewport: Viewport,
    labels: Vec<String>,
    values: Vec<Option<f64>>,
    range: ScaleRange,
    y_labels: Vec<String>,
    drawing_area: f64,
    center: PixelPoint,
}

/// Worst label overflow on one side of the canvas.
#[derive(Debug, Clone, Copy)]
struct Protrusion {
    edge: f64,
    index: Option<usize>,
}

impl RadialScale {
    pub fn new(
        viewport: Viewport,
        labels: Vec<String>,
        values: Vec<Option<f64>>,
        options: RadialScaleOptions,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        viewport.validate()?;
        options.font.validate()?;
        options.point_label_font.validate()?;

        let mut scale = Self {
            options,
            viewport,
            labels,
            values,
            range: ScaleRange::from_steps(0.0, 1, 1.0),
            y_labels: Vec::new(),
            drawing_area: 0.0,
            center: PixelPoint::new(viewport.width_px() / 2.0, viewport.height_px() / 2.0),
        };
        scale.relayout(measurer)?;
        Ok(scale)
    }

    /// Refits the value range, then the radius and center. On error the
    /// previous layout is kept.
    pub fn fit(&mut self, measurer: &dyn TextMeasurer) -> ChartResult<()> {
        let mut next = self.clone();
        next.relayout(measurer)?;
        *self = next;
        Ok(())
    }

    fn relayout(&mut self, measurer: &dyn TextMeasurer) -> ChartResult<()> {
        self.fit_range()?;
        if self.options.line_arc {
            self.center = self.viewport_center();
            self.drawing_area = self.line_arc_drawing_area();
        } else {
            self.set_scale_size(measurer);
        }
        self.y_labels = build_value_labels(&self.range, &self.options.label_template);

        debug!(
            steps = self.range.steps,
            step_value = self.range.step_value,
            min = self.range.min,
            max = self.range.max,
            drawing_area = self.drawing_area,
            x_center = self.center.x,
            "radial scale fitted"
        );
        Ok(())
    }

    /// Applies the given changes and refits. Nothing changes if the refit fails.
    pub fn update(
        &mut self,
        changes: RadialScaleUpdate,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<()> {
        let mut next = self.clone();
        if let Some(viewport) = changes.viewport {
            next.viewport = viewport.validate()?;
        }
        if let Some(options) = changes.options {
            options.font.validate()?;
            options.point_label_font.validate()?;
            next.options = options;
        }
        if let Some(values) = changes.values {
            next.values = values;
        }
        if let Some(labels) = changes.labels {
            next.labels = labels;
        }
        next.relayout(measurer)?;
        *self = next;
        Ok(())
    }

    /// Inscribes the spoke polygon and its point labels into the viewport.
    ///
    /// Starts from the largest radius that fits, finds the worst left and
    /// right label overflow, projects each back along its spoke into a radius
    /// reduction and shrinks by their average. The center then moves so both
    /// overflows are absorbed.
    pub fn set_scale_size(&mut self, measurer: &dyn TextMeasurer) {
        let width = self.viewport.width_px();
        let height = self.viewport.height_px();
        let font = &self.options.point_label_font;
        let largest_radius =
            (height / 2.0 - font.size_px - POINT_LABEL_GAP_PX).min(width / 2.0);

        self.center = self.viewport_center();

        let count = self.labels.len();
        let mut right = Protrusion {
            edge: width,
            index: None,
        };
        let mut left = Protrusion {
            edge: 0.0,
            index: None,
        };

        for (index, label) in self.labels.iter().enumerate() {
            let position = self.point_position(index, largest_radius);
            let text_width = measurer.measure_text(label, font) + POINT_LABEL_GAP_PX;

            // Top and bottom labels are centered on the spoke, the right half
            // is left-aligned and the left half right-aligned.
            let (right_extent, left_extent) = if index == 0 || 2 * index == count {
                let half = text_width / 2.0;
                (Some(position.x + half), Some(position.x - half))
            } else if 2 * index < count {
                (Some(position.x + text_width), None)
            } else {
                (None, Some(position.x - text_width))
            };

            if let Some(extent) = right_extent.filter(|extent| *extent > right.edge) {
                right = Protrusion {
                    edge: extent,
                    index: Some(index),
                };
            }
            if let Some(extent) = left_extent.filter(|extent| *extent < left.edge) {
                left = Protrusion {
                    edge: extent,
                    index: Some(index),
                };
            }
            trace!(index, x = position.x, text_width, "radial label protrusion");
        }

        let x_protrusion_left = left.edge.floor();
        let x_protrusion_right = (right.edge - width).ceil();
        let reduction_left = self.radius_reduction(x_protrusion_left, left.index);
        let reduction_right = self.radius_reduction(x_protrusion_right, right.index);

        self.drawing_area = (largest_radius - (reduction_left + reduction_right) / 2.0).max(0.0);
        self.set_center_point(reduction_left, reduction_right);
    }

    /// Centers horizontally between the two radius reductions; vertical
    /// center stays at half height.
    pub fn set_center_point(&mut self, left_movement: f64, right_movement: f64) {
        let width = self.viewport.width_px();
        let max_right = width - right_movement - self.drawing_area;
        let max_left = left_movement + self.drawing_area;
        self.center = PixelPoint::new(
            (max_left + max_right) / 2.0,
            self.viewport.height_px() / 2.0,
        );
    }

    /// Distance from the center for `value`.
    #[must_use]
    pub fn calculate_center_offset(&self, value: f64) -> f64 {
        (value - self.range.min) * (self.drawing_area / (self.range.max - self.range.min))
    }

    /// Angle covered by one spoke.
    #[must_use]
    pub fn circumference(&self) -> f64 {
        TAU / self.labels.len().max(1) as f64
    }

    /// Angle of spoke `index`, starting at the top.
    #[must_use]
    pub fn index_angle(&self, index: usize) -> f64 {
        index as f64 * self.circumference() - FRAC_PI_2
    }

    #[must_use]
    pub fn point_position(&self, index: usize, distance_from_center: f64) -> PixelPoint {
        let angle = self.index_angle(index);
        PixelPoint::new(
            angle.cos() * distance_from_center + self.center.x,
            angle.sin() * distance_from_center + self.center.y,
        )
    }

    /// Spoke nearest to `point`, if the point lies within the drawing area.
    #[must_use]
    pub fn spoke_at(&self, point: PixelPoint) -> Option<usize> {
        let count = self.labels.len();
        if count == 0 {
            return None;
        }
        let from_center = angle_from_point(self.center, point);
        if from_center.distance > self.drawing_area {
            return None;
        }
        // Angles start at 1.5π for the top spoke; anything past the last
        // spoke wraps back to the first.
        let index = ((from_center.angle - 1.5 * PI) / self.circumference()).round();
        if index < 0.0 || index >= count as f64 {
            Some(0)
        } else {
            Some(index as usize)
        }
    }

    #[must_use]
    pub fn drawing_area(&self) -> f64 {
        self.drawing_area
    }

    #[must_use]
    pub fn center(&self) -> PixelPoint {
        self.center
    }

    #[must_use]
    pub fn range(&self) -> ScaleRange {
        self.range
    }

    #[must_use]
    pub fn y_labels(&self) -> &[String] {
        &self.y_labels
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn values_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[must_use]
    pub fn options(&self) -> &RadialScaleOptions {
        &self.options
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn fit_range(&mut self) -> ChartResult<()> {
        let size = self.viewport.width_px().min(self.viewport.height_px());
        self.range = match self.options.range_override {
            Some(range_override) => range_override.to_range()?,
            None => calculate_scale_range(
                &self.values,
                size / 2.0,
                self.options.font.size_px,
                self.options.range_fit,
            )?,
        };
        Ok(())
    }

    fn viewport_center(&self) -> PixelPoint {
        PixelPoint::new(self.viewport.width_px() / 2.0, self.viewport.height_px() / 2.0)
    }

    fn line_arc_drawing_area(&self) -> f64 {
        let half_size = self.viewport.width_px().min(self.viewport.height_px()) / 2.0;
        if self.options.display {
            half_size - (self.options.font.size_px / 2.0 + self.options.backdrop_padding_y)
        } else {
            half_size
        }
    }

    fn radius_reduction(&self, protrusion: f64, index: Option<usize>) -> f64 {
        let Some(index) = index else {
            return 0.0;
        };
        let projection = (self.index_angle(index) + FRAC_PI_2).sin();
        let reduction = protrusion / projection;
        if projection.abs() < PROJECTION_EPSILON || !reduction.is_finite() {
            warn!(index, protrusion, "vertical spoke protrusion ignored");
            return 0.0;
        }
        reduction
    }

    /// Draws grid polygons or circles, value labels, angle lines, wedges and
    /// point labels.
    pub fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        if !self.options.display {
            return Ok(());
        }

        self.draw_value_grid(ctx)?;
        if !self.options.line_arc {
            self.draw_spokes(ctx)?;
        }
        Ok(())
    }

    fn draw_value_grid(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        let options = &self.options;
        let step_radius = self.drawing_area / f64::from(self.range.steps.max(1));

        // The innermost label sits on the center and is skipped.
        for (index, label) in self.y_labels.iter().enumerate().skip(1) {
            let center_offset = index as f64 * step_radius;
            let label_y = self.center.y - center_offset;

            if options.line_width > 0.0 {
                ctx.set_stroke_color(options.line_color);
                ctx.set_line_width(options.line_width);
                ctx.begin_path();
                if options.line_arc {
                    ctx.arc(self.center.x, self.center.y, center_offset, 0.0, TAU, false);
                } else {
                    let value = self.range.min + index as f64 * self.range.step_value;
                    let radius = self.calculate_center_offset(value);
                    for spoke in 0..self.labels.len() {
                        let position = self.point_position(spoke, radius);
                        if spoke == 0 {
                            ctx.move_to(position.x, position.y);
                        } else {
                            ctx.line_to(position.x, position.y);
                        }
                    }
                }
                ctx.close_path();
                ctx.stroke()?;
            }

            if options.show_labels {
                ctx.set_font(&options.font);
                if options.show_label_backdrop {
                    let label_width = ctx.measure_text(label, &options.font);
                    ctx.set_fill_color(options.backdrop_color);
                    ctx.fill_rect(
                        self.center.x - label_width / 2.0 - options.backdrop_padding_x,
                        label_y - options.font.size_px / 2.0 - options.backdrop_padding_y,
                        label_width + options.backdrop_padding_x * 2.0,
                        options.font.size_px + options.backdrop_padding_y * 2.0,
                    )?;
                }
                ctx.set_text_align(TextHAlign::Center);
                ctx.set_text_baseline(TextBaseline::Middle);
                ctx.set_fill_color(options.text_color);
                ctx.fill_text(label, self.center.x, label_y)?;
            }
        }
        Ok(())
    }

    fn draw_spokes(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        let options = &self.options;
        let count = self.labels.len();
        let interval = options.angle_line_interval.max(1);
        let outer_radius = self.calculate_center_offset(self.range.max);
        let has_wedges = count > 0 && options.background_colors.len() == count;

        ctx.set_line_width(options.angle_line_width);
        ctx.set_stroke_color(options.angle_line_color);

        for index in (0..count).rev() {
            let outer = self.point_position(index, outer_radius);

            if options.angle_line_width > 0.0 && index % interval == 0 {
                ctx.begin_path();
                ctx.move_to(self.center.x, self.center.y);
                ctx.line_to(outer.x, outer.y);
                ctx.stroke()?;
                ctx.close_path();
            }

            if has_wedges {
                let previous = self.point_position((index + count - 1) % count, outer_radius);
                let next = self.point_position((index + 1) % count, outer_radius);
                ctx.begin_path();
                ctx.move_to(self.center.x, self.center.y);
                ctx.line_to((previous.x + outer.x) / 2.0, (previous.y + outer.y) / 2.0);
                ctx.line_to(outer.x, outer.y);
                ctx.line_to((outer.x + next.x) / 2.0, (outer.y + next.y) / 2.0);
                ctx.set_fill_color(options.background_colors[index]);
                ctx.fill()?;
                ctx.close_path();
            }

            let label_position = self.point_position(index, outer_radius + POINT_LABEL_GAP_PX);
            ctx.set_font(&options.point_label_font);
            ctx.set_fill_color(options.point_label_color);
            let (align, baseline) = point_label_alignment(index, count);
            ctx.set_text_align(align);
            ctx.set_text_baseline(baseline);
            ctx.fill_text(&self.labels[index], label_position.x, label_position.y)?;
        }
        Ok(())
    }
}

/// Alignment of spoke `index`'s label so it grows away from the polygon.
fn point_label_alignment(index: usize, count: usize) -> (TextHAlign, TextBaseline) {
    let align = if index == 0 || 2 * index == count {
        TextHAlign::Center
    } else if 2 * index < count {
        TextHAlign::Left
    } else {
        TextHAlign::Right
    };

    let exact_quarter = 4 * index == count || 4 * index == 3 * count;
    let upper_half = 4 * index < count || 4 * index > 3 * count;
    let baseline = if exact_quarter {
        TextBaseline::Middle
    } else if upper_half {
        TextBaseline::Bottom
    } else {
        TextBaseline::Top
    };
    (align, baseline)
}
