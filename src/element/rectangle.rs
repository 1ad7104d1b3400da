use serde::{Deserialize, Serialize};

use super::attributes::{
    AttributeKey, AttributeValue, ShapeAttributes, write_color, write_number,
};
use super::{Draw, HitTest};
use crate::error::ChartResult;
use crate::render::{Color, DrawingContext};

/// Bar anchored at `base`, centered on `x`, reaching up to `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
    pub width: f64,
    pub base: f64,
    pub stroke_width: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub highlight_fill: Color,
    pub highlight_stroke: Color,
    pub show_stroke: bool,
}

impl Default for RectangleShape {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            value: None,
            width: 0.0,
            base: 0.0,
            stroke_width: 2.0,
            fill_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            stroke_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            highlight_fill: Color::rgba(0.0, 0.0, 0.0, 0.2),
            highlight_stroke: Color::rgba(0.0, 0.0, 0.0, 0.2),
            show_stroke: true,
        }
    }
}

impl RectangleShape {
    /// Pixel height from the base; negative for bars hanging below it.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.base - self.y
    }
}

impl ShapeAttributes for RectangleShape {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue> {
        let value: AttributeValue = match key {
            AttributeKey::X => self.x.into(),
            AttributeKey::Y => self.y.into(),
            AttributeKey::Value => return self.value.map(AttributeValue::Number),
            AttributeKey::Width => self.width.into(),
            AttributeKey::Base => self.base.into(),
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
            AttributeKey::Width => write_number(&mut self.width, value),
            AttributeKey::Base => write_number(&mut self.base, value),
            AttributeKey::StrokeWidth => write_number(&mut self.stroke_width, value),
            AttributeKey::FillColor => write_color(&mut self.fill_color, value),
            AttributeKey::StrokeColor => write_color(&mut self.stroke_color, value),
            AttributeKey::HighlightFill => write_color(&mut self.highlight_fill, value),
            AttributeKey::HighlightStroke => write_color(&mut self.highlight_stroke, value),
            _ => false,
        }
    }
}

impl HitTest for RectangleShape {
    fn in_range(&self, x: f64, y: f64) -> bool {
        let half_width = self.width / 2.0;
        let top = self.y.min(self.base);
        let bottom = self.y.max(self.base);
        x >= self.x - half_width && x <= self.x + half_width && y >= top && y <= bottom
    }
}

impl Draw for RectangleShape {
    /// Open path (no bottom edge); with a stroke the sides and top move in
    /// by half the stroke width so the outline stays inside `width`.
    fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        let half_width = self.width / 2.0;
        let mut left_x = self.x - half_width;
        let mut right_x = self.x + half_width;
        let mut top = self.y;

        if self.show_stroke {
            let half_stroke = self.stroke_width / 2.0;
            left_x += half_stroke;
            right_x -= half_stroke;
            top += half_stroke;
        }

        ctx.begin_path();
        ctx.set_fill_color(self.fill_color);
        ctx.set_stroke_color(self.stroke_color);
        ctx.set_line_width(self.stroke_width);

        ctx.move_to(left_x, self.base);
        ctx.line_to(left_x, top);
        ctx.line_to(right_x, top);
        ctx.line_to(right_x, self.base);
        ctx.fill()?;
        if self.show_stroke {
            ctx.stroke()?;
        }
        Ok(())
    }
}
