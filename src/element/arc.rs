use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::attributes::{
    AttributeKey, AttributeValue, ShapeAttributes, write_color, write_number,
};
use super::{Draw, HitTest};
use crate::core::{PixelPoint, angle_from_point};
use crate::error::ChartResult;
use crate::render::{Color, DrawingContext, LineJoin};

/// Annular sector centered on `(x, y)`; angles in radians, clockwise from
/// the positive x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stroke_width: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub highlight_fill: Color,
    pub highlight_stroke: Color,
    pub show_stroke: bool,
}

impl Default for ArcShape {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            value: None,
            start_angle: 0.0,
            end_angle: TAU,
            inner_radius: 0.0,
            outer_radius: 0.0,
            stroke_width: 2.0,
            fill_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            stroke_color: Color::rgb(1.0, 1.0, 1.0),
            highlight_fill: Color::rgba(0.0, 0.0, 0.0, 0.2),
            highlight_stroke: Color::rgb(1.0, 1.0, 1.0),
            show_stroke: true,
        }
    }
}

impl ArcShape {
    /// Whether `angle` (any turn) lies in `[start_angle, end_angle)`.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.end_angle - self.start_angle >= TAU {
            return true;
        }
        let angle = angle.rem_euclid(TAU);
        let start = self.start_angle.rem_euclid(TAU);
        let mut end = self.end_angle.rem_euclid(TAU);
        if end == 0.0 {
            end = TAU;
        }
        if end < start {
            angle < end || angle >= start
        } else {
            angle >= start && angle < end
        }
    }
}

impl ShapeAttributes for ArcShape {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue> {
        let value: AttributeValue = match key {
            AttributeKey::X => self.x.into(),
            AttributeKey::Y => self.y.into(),
            AttributeKey::Value => return self.value.map(AttributeValue::Number),
            AttributeKey::StartAngle => self.start_angle.into(),
            AttributeKey::EndAngle => self.end_angle.into(),
            AttributeKey::InnerRadius => self.inner_radius.into(),
            AttributeKey::OuterRadius => self.outer_radius.into(),
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
            AttributeKey::StartAngle => write_number(&mut self.start_angle, value),
            AttributeKey::EndAngle => write_number(&mut self.end_angle, value),
            AttributeKey::InnerRadius => write_number(&mut self.inner_radius, value),
            AttributeKey::OuterRadius => write_number(&mut self.outer_radius, value),
            AttributeKey::StrokeWidth => write_number(&mut self.stroke_width, value),
            AttributeKey::FillColor => write_color(&mut self.fill_color, value),
            AttributeKey::StrokeColor => write_color(&mut self.stroke_color, value),
            AttributeKey::HighlightFill => write_color(&mut self.highlight_fill, value),
            AttributeKey::HighlightStroke => write_color(&mut self.highlight_stroke, value),
            _ => false,
        }
    }
}

impl HitTest for ArcShape {
    fn in_range(&self, x: f64, y: f64) -> bool {
        let offset = angle_from_point(PixelPoint::new(self.x, self.y), PixelPoint::new(x, y));
        self.contains_angle(offset.angle)
            && offset.distance >= self.inner_radius
            && offset.distance <= self.outer_radius
    }

    /// Middle of the sector, halfway between inner and outer radius.
    fn tooltip_position(&self) -> PixelPoint {
        let centre_angle = self.start_angle + (self.end_angle - self.start_angle) / 2.0;
        let range_from_centre = (self.outer_radius - self.inner_radius) / 2.0 + self.inner_radius;
        PixelPoint::new(
            self.x + centre_angle.cos() * range_from_centre,
            self.y + centre_angle.sin() * range_from_centre,
        )
    }
}

impl Draw for ArcShape {
    fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        ctx.begin_path();
        ctx.arc(
            self.x,
            self.y,
            self.outer_radius.max(0.0),
            self.start_angle,
            self.end_angle,
            false,
        );
        ctx.arc(
            self.x,
            self.y,
            self.inner_radius.max(0.0),
            self.end_angle,
            self.start_angle,
            true,
        );
        ctx.close_path();

        ctx.set_stroke_color(self.stroke_color);
        ctx.set_line_width(self.stroke_width);
        ctx.set_fill_color(self.fill_color);
        ctx.fill()?;
        ctx.set_line_join(LineJoin::Bevel);

        if self.show_stroke {
            ctx.stroke()?;
        }
        Ok(())
    }
}
