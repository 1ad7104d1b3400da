use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    LabelTemplate, LinearScaleOptions, RadialScaleOptions, RangeFitOptions, RangeOverride,
    XLabelVisibility,
};
use crate::element::{PointHitMode, PointShape};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FontSpec};

fn grey() -> Color {
    Color::from_rgba8(0x66, 0x66, 0x66, 1.0)
}

fn faint_line() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.1)
}

/// Fully resolved chart options.
///
/// Serializable so hosts can persist a chart setup; missing JSON fields fall
/// back to the global defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub show_scale: bool,
    /// Hard-coded range replacing the fitted one.
    pub scale_override: Option<RangeOverride>,
    pub scale_line_color: Color,
    pub scale_line_width: f64,
    pub scale_show_labels: bool,
    pub show_x_labels: XLabelVisibility,
    pub scale_label: LabelTemplate,
    pub scale_integers_only: bool,
    pub scale_begin_at_zero: bool,
    pub font_family: String,
    pub scale_font_size: f64,
    pub scale_font_style: String,
    pub scale_font_color: Color,

    pub scale_show_grid_lines: bool,
    pub scale_grid_line_color: Color,
    pub scale_grid_line_width: f64,
    pub scale_show_horizontal_lines: bool,
    pub scale_show_vertical_lines: bool,
    pub offset_grid_lines: bool,

    pub point_dot: bool,
    pub point_dot_radius: f64,
    pub point_dot_stroke_width: f64,
    pub point_hit_detection_radius: f64,

    pub scale_show_line: bool,
    pub angle_show_line_out: bool,
    pub angle_line_color: Color,
    pub angle_line_width: f64,
    pub angle_line_interval: usize,
    pub point_label_font_style: String,
    pub point_label_font_size: f64,
    pub point_label_font_color: Color,
    pub scale_show_label_backdrop: bool,
    pub scale_backdrop_color: Color,
    pub scale_backdrop_padding_x: f64,
    pub scale_backdrop_padding_y: f64,
    pub scale_background_colors: Vec<Color>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            show_scale: true,
            scale_override: None,
            scale_line_color: faint_line(),
            scale_line_width: 1.0,
            scale_show_labels: true,
            show_x_labels: XLabelVisibility::All,
            scale_label: LabelTemplate::default(),
            scale_integers_only: true,
            scale_begin_at_zero: false,
            font_family: "sans-serif".to_owned(),
            scale_font_size: 12.0,
            scale_font_style: "normal".to_owned(),
            scale_font_color: grey(),

            scale_show_grid_lines: true,
            scale_grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.05),
            scale_grid_line_width: 1.0,
            scale_show_horizontal_lines: true,
            scale_show_vertical_lines: true,
            offset_grid_lines: false,

            point_dot: true,
            point_dot_radius: 4.0,
            point_dot_stroke_width: 1.0,
            point_hit_detection_radius: 10.0,

            scale_show_line: true,
            angle_show_line_out: true,
            angle_line_color: faint_line(),
            angle_line_width: 1.0,
            angle_line_interval: 1,
            point_label_font_style: "normal".to_owned(),
            point_label_font_size: 10.0,
            point_label_font_color: grey(),
            scale_show_label_backdrop: true,
            scale_backdrop_color: Color::rgba(1.0, 1.0, 1.0, 0.75),
            scale_backdrop_padding_x: 2.0,
            scale_backdrop_padding_y: 2.0,
            scale_background_colors: Vec::new(),
        }
    }
}

/// Sparse layer over a [`ChartConfig`]; `None` keeps the lower layer's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub show_scale: Option<bool>,
    pub scale_override: Option<RangeOverride>,
    pub scale_line_color: Option<Color>,
    pub scale_line_width: Option<f64>,
    pub scale_show_labels: Option<bool>,
    pub show_x_labels: Option<XLabelVisibility>,
    pub scale_label: Option<LabelTemplate>,
    pub scale_integers_only: Option<bool>,
    pub scale_begin_at_zero: Option<bool>,
    pub font_family: Option<String>,
    pub scale_font_size: Option<f64>,
    pub scale_font_style: Option<String>,
    pub scale_font_color: Option<Color>,

    pub scale_show_grid_lines: Option<bool>,
    pub scale_grid_line_color: Option<Color>,
    pub scale_grid_line_width: Option<f64>,
    pub scale_show_horizontal_lines: Option<bool>,
    pub scale_show_vertical_lines: Option<bool>,
    pub offset_grid_lines: Option<bool>,

    pub point_dot: Option<bool>,
    pub point_dot_radius: Option<f64>,
    pub point_dot_stroke_width: Option<f64>,
    pub point_hit_detection_radius: Option<f64>,

    pub scale_show_line: Option<bool>,
    pub angle_show_line_out: Option<bool>,
    pub angle_line_color: Option<Color>,
    pub angle_line_width: Option<f64>,
    pub angle_line_interval: Option<usize>,
    pub point_label_font_style: Option<String>,
    pub point_label_font_size: Option<f64>,
    pub point_label_font_color: Option<Color>,
    pub scale_show_label_backdrop: Option<bool>,
    pub scale_backdrop_color: Option<Color>,
    pub scale_backdrop_padding_x: Option<f64>,
    pub scale_backdrop_padding_y: Option<f64>,
    pub scale_background_colors: Option<Vec<Color>>,
}

impl ConfigOverrides {
    /// Type defaults of line charts.
    #[must_use]
    pub fn line_chart() -> Self {
        Self {
            scale_show_grid_lines: Some(true),
            scale_grid_line_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.05)),
            scale_grid_line_width: Some(1.0),
            scale_show_horizontal_lines: Some(true),
            scale_show_vertical_lines: Some(true),
            offset_grid_lines: Some(false),
            point_dot: Some(true),
            point_dot_radius: Some(4.0),
            point_dot_stroke_width: Some(1.0),
            point_hit_detection_radius: Some(10.0),
            ..Self::default()
        }
    }

    /// Type defaults of radar charts.
    #[must_use]
    pub fn radar_chart() -> Self {
        Self {
            scale_show_line: Some(true),
            angle_show_line_out: Some(true),
            scale_show_labels: Some(false),
            scale_begin_at_zero: Some(true),
            angle_line_color: Some(faint_line()),
            angle_line_width: Some(1.0),
            angle_line_interval: Some(1),
            point_label_font_style: Some("normal".to_owned()),
            point_label_font_size: Some(10.0),
            point_label_font_color: Some(grey()),
            point_dot: Some(true),
            point_dot_radius: Some(3.0),
            point_dot_stroke_width: Some(1.0),
            point_hit_detection_radius: Some(10.0),
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse config overrides: {e}"))
        })
    }
}

macro_rules! apply_overrides {
    ($config:ident, $overrides:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$overrides.$field {
                $config.$field = value.clone();
            }
        )+
    };
}

impl ChartConfig {
    /// Copy of `self` with every `Some` field of `overrides` applied.
    #[must_use]
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.clone();
        apply_overrides!(config, overrides;
            show_scale,
            scale_line_color,
            scale_line_width,
            scale_show_labels,
            show_x_labels,
            scale_label,
            scale_integers_only,
            scale_begin_at_zero,
            font_family,
            scale_font_size,
            scale_font_style,
            scale_font_color,
            scale_show_grid_lines,
            scale_grid_line_color,
            scale_grid_line_width,
            scale_show_horizontal_lines,
            scale_show_vertical_lines,
            offset_grid_lines,
            point_dot,
            point_dot_radius,
            point_dot_stroke_width,
            point_hit_detection_radius,
            scale_show_line,
            angle_show_line_out,
            angle_line_color,
            angle_line_width,
            angle_line_interval,
            point_label_font_style,
            point_label_font_size,
            point_label_font_color,
            scale_show_label_backdrop,
            scale_backdrop_color,
            scale_backdrop_padding_x,
            scale_backdrop_padding_y,
            scale_background_colors,
        );
        if overrides.scale_override.is_some() {
            config.scale_override = overrides.scale_override;
        }
        config
    }

    /// Sets the scale font size.
    #[must_use]
    pub fn with_scale_font_size(mut self, size_px: f64) -> Self {
        self.scale_font_size = size_px;
        self
    }

    /// Replaces the fitted range with a fixed one.
    #[must_use]
    pub fn with_scale_override(mut self, scale_override: RangeOverride) -> Self {
        self.scale_override = Some(scale_override);
        self
    }

    #[must_use]
    pub fn with_begin_at_zero(mut self, begin_at_zero: bool) -> Self {
        self.scale_begin_at_zero = begin_at_zero;
        self
    }

    #[must_use]
    pub fn with_show_scale(mut self, show_scale: bool) -> Self {
        self.show_scale = show_scale;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.scale_font().validate()?;
        self.point_label_font().validate()?;

        let widths = [
            ("scale line width", self.scale_line_width),
            ("grid line width", self.scale_grid_line_width),
            ("angle line width", self.angle_line_width),
            ("point radius", self.point_dot_radius),
            ("point stroke width", self.point_dot_stroke_width),
            ("point hit radius", self.point_hit_detection_radius),
            ("backdrop padding x", self.scale_backdrop_padding_x),
            ("backdrop padding y", self.scale_backdrop_padding_y),
        ];
        for (name, width) in widths {
            if !width.is_finite() || width < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        if let Some(scale_override) = self.scale_override {
            scale_override.to_range()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn scale_font(&self) -> FontSpec {
        FontSpec::new(
            self.scale_font_size,
            self.scale_font_style.clone(),
            self.font_family.clone(),
        )
    }

    #[must_use]
    pub fn point_label_font(&self) -> FontSpec {
        FontSpec::new(
            self.point_label_font_size,
            self.point_label_font_style.clone(),
            self.font_family.clone(),
        )
    }

    #[must_use]
    pub fn range_fit_options(&self) -> RangeFitOptions {
        RangeFitOptions {
            begin_at_zero: self.scale_begin_at_zero,
            integers_only: self.scale_integers_only,
        }
    }

    /// Options for the rectangular scale of line and bar charts.
    ///
    /// Hidden grid lines get zero width and a transparent colour; without a
    /// visible scale the plot is inset by the point size instead.
    #[must_use]
    pub fn linear_scale_options(&self) -> LinearScaleOptions {
        let (grid_line_width, grid_line_color) = if self.scale_show_grid_lines {
            (self.scale_grid_line_width, self.scale_grid_line_color)
        } else {
            (0.0, Color::TRANSPARENT)
        };
        LinearScaleOptions {
            display: self.show_scale,
            show_labels: self.scale_show_labels,
            font: self.scale_font(),
            text_color: self.scale_font_color,
            padding: if self.show_scale {
                0.0
            } else {
                self.point_dot_radius + self.point_dot_stroke_width
            },
            range_fit: self.range_fit_options(),
            range_override: self.scale_override,
            offset_grid_lines: self.offset_grid_lines,
            show_x_labels: self.show_x_labels,
            line_width: self.scale_line_width,
            line_color: self.scale_line_color,
            grid_line_width,
            grid_line_color,
            show_horizontal_lines: self.scale_show_horizontal_lines,
            show_vertical_lines: self.scale_show_vertical_lines,
            label_template: self.scale_label.clone(),
        }
    }

    /// Options for the radar scale; set `line_arc` on the result for a
    /// circular grid.
    #[must_use]
    pub fn radial_scale_options(&self) -> RadialScaleOptions {
        RadialScaleOptions {
            display: self.show_scale,
            show_labels: self.scale_show_labels,
            font: self.scale_font(),
            text_color: self.scale_font_color,
            range_fit: self.range_fit_options(),
            range_override: self.scale_override,
            label_template: self.scale_label.clone(),
            line_arc: false,
            line_width: if self.scale_show_line {
                self.scale_line_width
            } else {
                0.0
            },
            line_color: self.scale_line_color,
            show_label_backdrop: self.scale_show_label_backdrop,
            backdrop_color: self.scale_backdrop_color,
            backdrop_padding_x: self.scale_backdrop_padding_x,
            backdrop_padding_y: self.scale_backdrop_padding_y,
            angle_line_width: if self.angle_show_line_out {
                self.angle_line_width
            } else {
                0.0
            },
            angle_line_color: self.angle_line_color,
            angle_line_interval: self.angle_line_interval.max(1),
            point_label_font: self.point_label_font(),
            point_label_color: self.point_label_font_color,
            background_colors: self.scale_background_colors.clone(),
        }
    }

    /// Point template for datasets; position, value and colours are filled
    /// in per data point.
    #[must_use]
    pub fn point_style(&self, hit_mode: PointHitMode) -> PointShape {
        PointShape {
            radius: self.point_dot_radius,
            stroke_width: self.point_dot_stroke_width,
            hit_detection_radius: self.point_hit_detection_radius,
            display: self.point_dot,
            hit_mode,
            ..PointShape::default()
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

/// Folds `layers` over `base` (later layers win) and validates the result.
pub fn resolve_config(base: &ChartConfig, layers: &[ConfigOverrides]) -> ChartResult<ChartConfig> {
    let config = layers
        .iter()
        .fold(base.clone(), |config, layer| config.merged(layer));
    config.validate()?;
    debug!(layers = layers.len(), "chart config resolved");
    Ok(config)
}
