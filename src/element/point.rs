use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::attributes::{
    AttributeKey, AttributeValue, ShapeAttributes, write_color, write_number,
};
use super::{Draw, HitTest};
use crate::error::ChartResult;
use crate::render::{Color, DrawingContext};

/// How close a pointer must be to hit a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointHitMode {
    /// Within the disc grown by the hit-detection radius.
    #[default]
    Radial,
    /// Only the horizontal distance counts (line charts).
    Horizontal,
}

/// Disc marker for line and radar datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointShape {
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
    pub radius: f64,
    pub hit_detection_radius: f64,
    pub stroke_width: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub highlight_fill: Color,
    pub highlight_stroke: Color,
    /// Hidden points still hit-test.
    pub display: bool,
    pub hit_mode: PointHitMode,
}

impl Default for PointShape {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            value: None,
            radius: 3.0,
            hit_detection_radius: 20.0,
            stroke_width: 1.0,
            fill_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            stroke_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            highlight_fill: Color::rgb(1.0, 1.0, 1.0),
            highlight_stroke: Color::rgba(0.0, 0.0, 0.0, 0.1),
            display: true,
            hit_mode: PointHitMode::Radial,
        }
    }
}

impl PointShape {
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

impl ShapeAttributes for PointShape {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue> {
        let value: AttributeValue = match key {
            AttributeKey::X => self.x.into(),
            AttributeKey::Y => self.y.into(),
            AttributeKey::Value => return self.value.map(AttributeValue::Number),
            AttributeKey::Radius => self.radius.into(),
            AttributeKey::HitDetectionRadius => self.hit_detection_radius.into(),
            AttributeKey::StrokeWidth => self.stroke_width.into(),
            AttributeKey::FillColor => self.fill_color.into(),
            AttributeKey::StrokeColor => self.stroke_color.into(),
            AttributeKey::HighlightFill => self.highlight_fill.into(),
            AttributeKey::HighlightStroke => self.highlight_stroke.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_attribute(&mut self, key: AttributeKey, value: AttributeValue) -> bool {
        match key {
            AttributeKey::X => write_number(&mut self.x, value),
            AttributeKey::Y => write_number(&mut self.y, value),
            AttributeKey::Value => match value.as_number() {
                Some(number) => {
                    self.value = Some(number);
                    true
                }
                None => false,
            },
            AttributeKey::Radius => write_number(&mut self.radius, value),
            AttributeKey::HitDetectionRadius => write_number(&mut self.hit_detection_radius, value),
            AttributeKey::StrokeWidth => write_number(&mut self.stroke_width, value),
            AttributeKey::FillColor => write_color(&mut self.fill_color, value),
            AttributeKey::StrokeColor => write_color(&mut self.stroke_color, value),
            AttributeKey::HighlightFill => write_color(&mut self.highlight_fill, value),
            AttributeKey::HighlightStroke => write_color(&mut self.highlight_stroke, value),
            _ => false,
        }
    }
}

impl HitTest for PointShape {
    fn in_range(&self, x: f64, y: f64) -> bool {
        let reach = self.radius + self.hit_detection_radius;
        let dx = x - self.x;
        let distance_squared = match self.hit_mode {
            PointHitMode::Radial => {
                let dy = y - self.y;
                dx * dx + dy * dy
            }
            PointHitMode::Horizontal => dx * dx,
        };
        distance_squared <= reach * reach
    }
}

impl Draw for PointShape {
    fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        if !self.display {
            return Ok(());
        }
        ctx.begin_path();
        ctx.arc(self.x, self.y, self.radius, 0.0, TAU, false);
        ctx.close_path();

        ctx.set_stroke_color(self.stroke_color);
        ctx.set_line_width(self.stroke_width);
        ctx.set_fill_color(self.fill_color);
        ctx.fill()?;
        ctx.stroke()
    }
}
