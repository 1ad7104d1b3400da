//! Animated, hit-testable chart elements.
//!
//! An [`Element`] pairs a shape's live attributes with a saved snapshot. The
//! snapshot is the start point of every animation: [`Element::update`] moves
//! the current values into it before assigning new ones, and
//! [`Element::transition`] blends from it towards a target.

mod arc;
mod attributes;
mod point;
mod rectangle;

pub use arc::ArcShape;
pub use attributes::{
    AttributeKey, AttributeSet, AttributeValue, COLOR_KEYS, ShapeAttributes, attribute_set,
};
pub use point::{PointHitMode, PointShape};
pub use rectangle::RectangleShape;

use tracing::trace;

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};
use crate::render::DrawingContext;

/// Point-in-shape test and tooltip anchor.
pub trait HitTest: ShapeAttributes {
    fn in_range(&self, x: f64, y: f64) -> bool;

    fn tooltip_position(&self) -> PixelPoint {
        PixelPoint::new(
            self.number(AttributeKey::X).unwrap_or(0.0),
            self.number(AttributeKey::Y).unwrap_or(0.0),
        )
    }
}

pub trait Draw {
    fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()>;
}

/// A shape plus its saved snapshot and the labels it reports on hover.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<S: ShapeAttributes> {
    live: S,
    saved: S,
    label: Option<String>,
    dataset_label: Option<String>,
}

pub type Point = Element<PointShape>;
pub type Arc = Element<ArcShape>;
pub type Rectangle = Element<RectangleShape>;

impl<S: ShapeAttributes> Element<S> {
    /// Runs the shape's `initialize` hook, then snapshots it.
    #[must_use]
    pub fn new(mut shape: S) -> Self {
        shape.initialize();
        Self {
            saved: shape.clone(),
            live: shape,
            label: None,
            dataset_label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_dataset_label(mut self, dataset_label: impl Into<String>) -> Self {
        self.dataset_label = Some(dataset_label.into());
        self
    }

    #[must_use]
    pub fn shape(&self) -> &S {
        &self.live
    }

    /// Live attributes; direct edits bypass the snapshot.
    pub fn shape_mut(&mut self) -> &mut S {
        &mut self.live
    }

    #[must_use]
    pub fn saved(&self) -> &S {
        &self.saved
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn dataset_label(&self) -> Option<&str> {
        self.dataset_label.as_deref()
    }

    #[must_use]
    pub fn attribute(&self, key: AttributeKey) -> Option<AttributeValue> {
        self.live.attribute(key)
    }

    pub fn save(&mut self) -> &mut Self {
        self.saved = self.live.clone();
        self
    }

    /// Copies saved values back for `keys`, or for every key when `None`.
    /// Keys the shape does not store are ignored.
    pub fn restore(&mut self, keys: Option<&[AttributeKey]>) -> &mut Self {
        match keys {
            None => self.live = self.saved.clone(),
            Some(keys) => {
                for &key in keys {
                    if let Some(value) = self.saved.attribute(key) {
                        self.live.set_attribute(key, value);
                    }
                }
            }
        }
        self
    }

    /// Assigns new values, first moving each current value into the
    /// snapshot so it becomes the animation start.
    pub fn update(&mut self, changes: &AttributeSet) -> &mut Self {
        for (&key, &value) in changes {
            if let Some(current) = self.live.attribute(key) {
                self.saved.set_attribute(key, current);
            }
            self.live.set_attribute(key, value);
        }
        self
    }

    /// Sets each target key to `saved + t * (target - saved)`.
    ///
    /// `t` may overshoot `[0, 1]` for elastic easing but must be finite.
    pub fn transition(&mut self, targets: &AttributeSet, t: f64) -> ChartResult<&mut Self> {
        if !t.is_finite() {
            return Err(ChartError::InvalidData(
                "transition progress must be finite".to_owned(),
            ));
        }
        for (&key, &target) in targets {
            let (Some(from), Some(_)) = (self.saved.attribute(key), self.live.attribute(key))
            else {
                continue;
            };
            self.live.set_attribute(key, from.lerp(target, t));
        }
        trace!(t, keys = targets.len(), "element transition");
        Ok(self)
    }

    /// Whether the element carries a finite `value`.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.live
            .number(AttributeKey::Value)
            .is_some_and(f64::is_finite)
    }

    /// Swaps fill and stroke for the highlight colours, where defined.
    pub fn highlight(&mut self) -> &mut Self {
        let pairs = [
            (AttributeKey::HighlightFill, AttributeKey::FillColor),
            (AttributeKey::HighlightStroke, AttributeKey::StrokeColor),
        ];
        for (source, target) in pairs {
            if let Some(color) = self.live.attribute(source) {
                self.live.set_attribute(target, color);
            }
        }
        self
    }
}

impl<S: HitTest> Element<S> {
    #[must_use]
    pub fn in_range(&self, x: f64, y: f64) -> bool {
        self.live.in_range(x, y)
    }

    #[must_use]
    pub fn tooltip_position(&self) -> PixelPoint {
        self.live.tooltip_position()
    }
}

impl<S: ShapeAttributes + Draw> Draw for Element<S> {
    fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        self.live.draw(ctx)
    }
}

/// Any element kind, for mixed collections.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartElement {
    Point(Point),
    Arc(Arc),
    Rectangle(Rectangle),
}

macro_rules! dispatch {
    ($self:expr, $element:ident => $body:expr) => {
        match $self {
            ChartElement::Point($element) => $body,
            ChartElement::Arc($element) => $body,
            ChartElement::Rectangle($element) => $body,
        }
    };
}

impl ChartElement {
    #[must_use]
    pub fn in_range(&self, x: f64, y: f64) -> bool {
        dispatch!(self, element => element.in_range(x, y))
    }

    #[must_use]
    pub fn tooltip_position(&self) -> PixelPoint {
        dispatch!(self, element => element.tooltip_position())
    }

    #[must_use]
    pub fn has_value(&self) -> bool {
        dispatch!(self, element => element.has_value())
    }

    #[must_use]
    pub fn attribute(&self, key: AttributeKey) -> Option<AttributeValue> {
        dispatch!(self, element => element.attribute(key))
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        dispatch!(self, element => element.label())
    }

    #[must_use]
    pub fn dataset_label(&self) -> Option<&str> {
        dispatch!(self, element => element.dataset_label())
    }

    pub fn save(&mut self) {
        dispatch!(self, element => { element.save(); })
    }

    pub fn restore(&mut self, keys: Option<&[AttributeKey]>) {
        dispatch!(self, element => { element.restore(keys); })
    }

    pub fn update(&mut self, changes: &AttributeSet) {
        dispatch!(self, element => { element.update(changes); })
    }

    pub fn transition(&mut self, targets: &AttributeSet, t: f64) -> ChartResult<()> {
        dispatch!(self, element => element.transition(targets, t).map(|_| ()))
    }

    pub fn highlight(&mut self) {
        dispatch!(self, element => { element.highlight(); })
    }
}

impl Draw for ChartElement {
    fn draw(&self, ctx: &mut dyn DrawingContext) -> ChartResult<()> {
        dispatch!(self, element => element.draw(ctx))
    }
}

impl From<Point> for ChartElement {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<Arc> for ChartElement {
    fn from(value: Arc) -> Self {
        Self::Arc(value)
    }
}

impl From<Rectangle> for ChartElement {
    fn from(value: Rectangle) -> Self {
        Self::Rectangle(value)
    }
}
