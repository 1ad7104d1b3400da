use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::geometry::{alias_pixel, to_radians};
use crate::core::labels::{LabelTemplate, build_value_labels};
use crate::core::range_fit::{
    RangeFitOptions, RangeOverride, ScaleRange, calculate_scale_range,
};
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingContext, FontSpec, TextBaseline, TextHAlign, TextMeasurer, longest_text,
};

/// Gap between the widest y label and the plot, included in the label width.
const Y_LABEL_GAP_PX: f64 = 10.0;
/// Space kept under the x labels.
const X_LABEL_BOTTOM_PAD_PX: f64 = 5.0;
/// Horizontal breathing room (both sides) inside one category slot.
const X_LABEL_SLOT_PAD_PX: f64 = 6.0;
const ROTATED_LABEL_GAP_PX: f64 = 3.0;
const MAX_X_LABEL_ROTATION_DEG: u32 = 90;
const TICK_LENGTH_PX: f64 = 5.0;
const MAX_FIT_PASSES: usize = 64;

/// Which category labels get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XLabelVisibility {
    #[default]
    All,
    None,
    /// Draw roughly this many labels, evenly skipping the rest.
    Count(usize),
}

impl XLabelVisibility {
    /// Every `n`th label is drawn; `label_count + 1` draws none.
    #[must_use]
    pub fn skip_interval(self, label_count: usize) -> usize {
        match self {
            Self::All => 1,
            Self::None | Self::Count(0) => label_count + 1,
            Self::Count(count) => label_count.div_ceil(count).max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearScaleOptions {
    pub display: bool,
    pub show_labels: bool,
    pub font: FontSpec,
    pub text_color: Color,
    /// Extra inset applied to the plot area on every side.
    pub padding: f64,
    pub range_fit: RangeFitOptions,
    pub range_override: Option<RangeOverride>,
    /// Put categories between grid lines instead of on them (bar charts).
    pub offset_grid_lines: bool,
    pub show_x_labels: XLabelVisibility,
    pub line_width: f64,
    pub line_color: Color,
    pub grid_line_width: f64,
    pub grid_line_color: Color,
    pub show_horizontal_lines: bool,
    pub show_vertical_lines: bool,
    pub label_template: LabelTemplate,
}

impl Default for LinearScaleOptions {
    fn default() -> Self {
        Self {
            display: true,
            show_labels: true,
            font: FontSpec::default(),
            text_color: Color::from_rgba8(0x66, 0x66, 0x66, 1.0),
            padding: 0.0,
            range_fit: RangeFitOptions {
                begin_at_zero: false,
                integers_only: true,
            },
            range_override: None,
            offset_grid_lines: false,
            show_x_labels: XLabelVisibility::All,
            line_width: 1.0,
            line_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            grid_line_width: 1.0,
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.05),
            show_horizontal_lines: true,
            show_vertical_lines: true,
            label_template: LabelTemplate::default(),
        }
    }
}

/// Pixel bounds produced by [`LinearScale::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    /// Top of the value axis (pixel y of `max`).
    pub start_point: f64,
    /// Bottom of the value axis (pixel y of `min`).
    pub end_point: f64,
    pub x_padding_left: f64,
    pub x_padding_right: f64,
}

/// Partial update applied by [`LinearScale::update`] before refitting.
#[derive(Debug, Clone, Default)]
pub struct LinearScaleUpdate {
    pub viewport: Option<Viewport>,
    pub values: Option<Vec<Option<f64>>>,
    pub x_labels: Option<Vec<String>>,
    pub options: Option<LinearScaleOptions>,
}

/// Value axis plus category axis for rectangular charts.
///
/// Owns the plot-area geometry. The vertical extent, y-label width and
/// x-label rotation depend on each other, so [`LinearScale::fit`] iterates
/// until the plot height stops shrinking.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    options: LinearScaleOptions,
    viewport: Viewport,
    x_labels: Vec<String>,
    values: Vec<Option<f64>>,
    range: ScaleRange,
    y_labels: Vec<String>,
    y_label_width: f64,
    x_label_width: f64,
    x_label_rotation: u32,
    area: PlotArea,
    fit_passes: usize,
}

impl LinearScale {
    /// Builds and fits a scale for `values` over the `x_labels` categories.
    pub fn new(
        viewport: Viewport,
        x_labels: Vec<String>,
        values: Vec<Option<f64>>,
        options: LinearScaleOptions,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        viewport.validate()?;
        options.font.validate()?;

        let mut scale = Self {
            options,
            viewport,
            x_labels,
            values,
            range: ScaleRange::from_steps(0.0, 1, 1.0),
            y_labels: Vec::new(),
            y_label_width: 0.0,
            x_label_width: 0.0,
            x_label_rotation: 0,
            area: PlotArea {
                start_point: 0.0,
                end_point: viewport.height_px(),
                x_padding_left: 0.0,
                x_padding_right: 0.0,
            },
            fit_passes: 0,
        };
        scale.relayout(measurer)?;
        Ok(scale)
    }

    /// Recomputes range, labels and plot area from scratch.
    ///
    /// Idempotent: fitting twice without changes yields identical bounds.
    /// On error the previous layout is kept.
    pub fn fit(&mut self, measurer: &dyn TextMeasurer) -> ChartResult<()> {
        self.commit(measurer, |_| Ok(()))
    }

    /// Applies `change` to a copy, refits it and only then replaces `self`.
    fn commit<T>(
        &mut self,
        measurer: &dyn TextMeasurer,
        change: impl FnOnce(&mut Self) -> ChartResult<T>,
    ) -> ChartResult<T> {
        let mut next = self.clone();
        let outcome = change(&mut next)?;
        next.relayout(measurer)?;
        *self = next;
        Ok(outcome)
    }

    fn relayout(&mut self, measurer: &dyn TextMeasurer) -> ChartResult<()> {
        let font_size = self.options.font.size_px;
        let height = self.viewport.height_px();
        let padding = self.options.padding;

        self.area.start_point = if self.options.display { font_size } else { 0.0 } + padding;
        self.area.end_point = (if self.options.display {
            height - font_size * 1.5 - X_LABEL_BOTTOM_PAD_PX
        } else {
            height
        } - padding)
            .max(self.area.start_point);

        // End point before any room is taken for rotated x labels.
        let unrotated_end_point = self.area.end_point;
        let mut cached_height = self.plot_height();

        self.calculate_y_range(cached_height)?;
        self.build_y_labels(measurer);
        self.calculate_x_label_rotation(measurer);

        let mut passes = 1;
        while cached_height > self.plot_height() {
            passes += 1;
            if passes > MAX_FIT_PASSES {
                return Err(ChartError::LayoutDidNotConverge { passes });
            }

            cached_height = self.plot_height();
            let cached_y_label_width = self.y_label_width;

            self.calculate_y_range(cached_height)?;
            self.build_y_labels(measurer);

            if cached_y_label_width < self.y_label_width {
                self.area.end_point = unrotated_end_point;
                self.calculate_x_label_rotation(measurer);
            }
            trace!(
                passes,
                plot_height = self.plot_height(),
                y_label_width = self.y_label_width,
                rotation = self.x_label_rotation,
                "linear scale fit pass"
            );
        }

        self.fit_passes = passes;
        debug!(
            steps = self.range.steps,
            step_value = self.range.step_value,
            min = self.range.min,
            max = self.range.max,
            rotation = self.x_label_rotation,
            passes,
            "linear scale fitted"
        );
        Ok(())
    }

    /// Applies the given changes and refits. Nothing changes if the refit fails.
    pub fn update(
        &mut self,
        changes: LinearScaleUpdate,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<()> {
        self.commit(measurer, |scale| {
            if let Some(viewport) = changes.viewport {
                scale.viewport = viewport.validate()?;
            }
            if let Some(options) = changes.options {
                options.font.validate()?;
                scale.options = options;
            }
            if let Some(values) = changes.values {
                scale.values = values;
            }
            if let Some(x_labels) = changes.x_labels {
                scale.x_labels = x_labels;
            }
            Ok(())
        })
    }

    /// Appends a category label and refits.
    pub fn add_x_label(
        &mut self,
        label: impl Into<String>,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<()> {
        let label = label.into();
        self.commit(measurer, |scale| {
            scale.x_labels.push(label);
            Ok(())
        })
    }

    /// Drops the oldest category label and refits.
    pub fn remove_x_label(&mut self, measurer: &dyn TextMeasurer) -> ChartResult<Option<String>> {
        if self.x_labels.is_empty() {
            return Ok(None);
        }
        self.commit(measurer, |scale| Ok(Some(scale.x_labels.remove(0))))
    }

    /// Replaces the values the range is fitted to; call [`Self::fit`] afterwards.
    pub fn set_values(&mut self, values: Vec<Option<f64>>) {
        self.values = values;
    }

    /// Vertical pixel extent of the value axis.
    #[must_use]
    pub fn drawing_area(&self) -> f64 {
        self.plot_height()
    }

    /// Pixel y of a data value.
    #[must_use]
    pub fn calculate_y(&self, value: f64) -> f64 {
        let scaling_factor = self.drawing_area() / (self.range.max - self.range.min);
        self.area.end_point - scaling_factor * (value - self.range.min)
    }

    /// Pixel x of a category index; fractional indexes address grid lines
    /// between categories.
    #[must_use]
    pub fn calculate_x(&self, index: f64) -> f64 {
        let inner_width =
            self.viewport.width_px() - (self.area.x_padding_left + self.area.x_padding_right);
        let slots = self.values_count() as f64 - if self.options.offset_grid_lines { 0.0 } else { 1.0 };
        let value_width = inner_width / slots.max(1.0);
        let mut value_offset = value_width * index + self.area.x_padding_left;
        if self.options.offset_grid_lines {
            value_offset += value_width / 2.0;
        }
        value_offset.round()
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn start_point(&self) -> f64 {
        self.area.start_point
    }

    #[must_use]
    pub fn end_point(&self) -> f64 {
        self.area.end_point
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
    pub fn y_label_width(&self) -> f64 {
        self.y_label_width
    }

    #[must_use]
    pub fn x_labels(&self) -> &[String] {
        &self.x_labels
    }

    /// Projected width of the widest x label at the current rotation.
    #[must_use]
    pub fn x_label_width(&self) -> f64 {
        self.x_label_width
    }

    /// Rotation of the x labels in whole degrees, `0..=90`.
    #[must_use]
    pub fn x_label_rotation(&self) -> u32 {
        self.x_label_rotation
    }

    /// Number of categories on the x axis.
    #[must_use]
    pub fn values_count(&self) -> usize {
        self.x_labels.len()
    }

    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[must_use]
    pub fn options(&self) -> &LinearScaleOptions {
        &self.options
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Passes the last fit needed to reach its fixed point.
    #[must_use]
    pub fn fit_passes(&self) -> usize {
        self.fit_passes
    }

    fn plot_height(&self) -> f64 {
        self.area.end_point - self.area.start_point
    }

    fn calculate_y_range(&mut self, available_height: f64) -> ChartResult<()> {
        self.range = match self.options.range_override {
            Some(range_override) => range_override.to_range()?,
            None => calculate_scale_range(
                &self.values,
                available_height,
                self.options.font.size_px,
                self.options.range_fit,
            )?,
        };
        Ok(())
    }

    fn build_y_labels(&mut self, measurer: &dyn TextMeasurer) {
        self.y_labels = build_value_labels(&self.range, &self.options.label_template);
        self.y_label_width = if self.options.display && self.options.show_labels {
            longest_text(measurer, &self.options.font, &self.y_labels) + Y_LABEL_GAP_PX
        } else {
            0.0
        };
    }

    fn calculate_x_label_rotation(&mut self, measurer: &dyn TextMeasurer) {
        let font = &self.options.font;
        let measure = |label: Option<&String>| {
            label.map_or(0.0, |text| measurer.measure_text(text, font))
        };
        let first_width = measure(self.x_labels.first());
        let last_width = measure(self.x_labels.last());

        self.area.x_padding_right = last_width / 2.0 + 3.0;
        self.area.x_padding_left = (first_width / 2.0).max(self.y_label_width);
        self.x_label_rotation = 0;

        if !self.options.display {
            self.x_label_width = 0.0;
            self.area.x_padding_right = self.options.padding;
            self.area.x_padding_left = self.options.padding;
            return;
        }

        let original_label_width = longest_text(measurer, font, &self.x_labels);
        let half_font = font.size_px / 2.0;
        self.x_label_width = original_label_width;
        let x_grid_width = (self.calculate_x(1.0) - self.calculate_x(0.0)).floor() - X_LABEL_SLOT_PAD_PX;

        while self.x_label_width > x_grid_width && self.x_label_rotation < MAX_X_LABEL_ROTATION_DEG {
            self.x_label_rotation += 1;
            let cos_rotation = to_radians(f64::from(self.x_label_rotation)).cos();

            // Rotated labels are right-aligned at their tick, so the first one
            // hangs to the left of the plot.
            let first_rotated = cos_rotation * first_width;
            if first_rotated + half_font > self.y_label_width {
                self.area.x_padding_left = first_rotated + half_font;
            }
            self.area.x_padding_right = half_font;
            self.x_label_width = cos_rotation * original_label_width;
        }

        if self.x_label_rotation > 0 {
            let sin_rotation = to_radians(f64::from(self.x_label_rotation)).sin();
            self.area.end_point = (self.area.end_point
                - (sin_rotation * original_label_width + ROTATED_LABEL_GAP_PX))
                .max(self.area.start_point);
        }
    }

    /// Draws value labels, grid lines, ticks and category labels.
    pub fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        if !self.options.display {
            return Ok(());
        }

        let options = &self.options;
        let steps = f64::from(self.range.steps.max(1));
        let y_label_gap = self.plot_height() / steps;
        let x_start = self.area.x_padding_left.round();
        let width = self.viewport.width_px();

        ctx.set_fill_color(options.text_color);
        ctx.set_font(&options.font);

        for (index, label) in self.y_labels.iter().enumerate() {
            let y_label_center = self.area.end_point - y_label_gap * index as f64;
            // The base line is always drawn, even without horizontal grid lines.
            let draw_horizontal_line = options.show_horizontal_lines || index == 0;

            ctx.set_text_align(TextHAlign::Right);
            ctx.set_text_baseline(TextBaseline::Middle);
            if options.show_labels {
                ctx.fill_text(label, x_start - Y_LABEL_GAP_PX, y_label_center)?;
            }

            let (line_width, line_color) = self.grid_style(index);
            ctx.set_line_width(line_width);
            ctx.set_stroke_color(line_color);
            let line_y = y_label_center.round() + alias_pixel(line_width);

            if draw_horizontal_line {
                ctx.begin_path();
                ctx.move_to(x_start, line_y);
                ctx.line_to(width, line_y);
                ctx.stroke()?;
                ctx.close_path();
            }

            ctx.set_line_width(options.line_width);
            ctx.set_stroke_color(options.line_color);
            ctx.begin_path();
            ctx.move_to(x_start - TICK_LENGTH_PX, line_y);
            ctx.line_to(x_start, line_y);
            ctx.stroke()?;
            ctx.close_path();
        }

        let skip_interval = options.show_x_labels.skip_interval(self.x_labels.len());
        let is_rotated = self.x_label_rotation > 0;
        let grid_shift = if options.offset_grid_lines { 0.5 } else { 0.0 };

        for (index, label) in self.x_labels.iter().enumerate() {
            let position = index as f64;
            let x_pos = self.calculate_x(position) + alias_pixel(options.line_width);
            let line_pos = self.calculate_x(position - grid_shift) + alias_pixel(options.line_width);
            let draw_vertical_line = options.show_vertical_lines || index == 0;
            let shows_label = index % skip_interval == 0;

            let (line_width, line_color) = self.grid_style(index);
            ctx.set_line_width(line_width);
            ctx.set_stroke_color(line_color);

            if draw_vertical_line {
                ctx.begin_path();
                ctx.move_to(line_pos, self.area.end_point);
                ctx.line_to(line_pos, self.area.start_point - 3.0);
                ctx.stroke()?;
                ctx.close_path();
            }

            ctx.set_line_width(options.line_width);
            ctx.set_stroke_color(options.line_color);

            if shows_label {
                ctx.begin_path();
                ctx.move_to(line_pos, self.area.end_point);
                ctx.line_to(line_pos, self.area.end_point + TICK_LENGTH_PX);
                ctx.stroke()?;
                ctx.close_path();
            }

            ctx.save()?;
            ctx.translate(x_pos, self.area.end_point + if is_rotated { 12.0 } else { 8.0 });
            ctx.rotate(-to_radians(f64::from(self.x_label_rotation)));
            ctx.set_font(&options.font);
            ctx.set_text_align(if is_rotated {
                TextHAlign::Right
            } else {
                TextHAlign::Center
            });
            ctx.set_text_baseline(if is_rotated {
                TextBaseline::Middle
            } else {
                TextBaseline::Top
            });
            if shows_label {
                ctx.fill_text(label, 0.0, 0.0)?;
            }
            ctx.restore()?;
        }

        Ok(())
    }

    /// Axis style for the first line, grid style for the rest.
    fn grid_style(&self, index: usize) -> (f64, Color) {
        if index > 0 {
            (self.options.grid_line_width, self.options.grid_line_color)
        } else {
            (self.options.line_width, self.options.line_color)
        }
    }
}
