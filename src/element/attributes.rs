use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Named, animatable attribute of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKey {
    X,
    Y,
    Value,
    Radius,
    HitDetectionRadius,
    StrokeWidth,
    StartAngle,
    EndAngle,
    InnerRadius,
    OuterRadius,
    Width,
    Base,
    FillColor,
    StrokeColor,
    HighlightFill,
    HighlightStroke,
}

/// Colour keys swapped by hover highlighting.
pub const COLOR_KEYS: [AttributeKey; 2] = [AttributeKey::FillColor, AttributeKey::StrokeColor];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Number(f64),
    Color(Color),
}

impl AttributeValue {
    /// Linear step from `self` towards `target`; `t == 1` lands exactly on it.
    ///
    /// Values of different kinds cannot blend and jump straight to `target`.
    #[must_use]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        if t == 1.0 {
            return target;
        }
        match (self, target) {
            (Self::Number(from), Self::Number(to)) => Self::Number((to - from) * t + from),
            (Self::Color(from), Self::Color(to)) => Self::Color(from.lerp(to, t)),
            _ => target,
        }
    }

    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Color(_) => None,
        }
    }

    #[must_use]
    pub fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(color),
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Color> for AttributeValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// Ordered attribute changes, applied in insertion order.
pub type AttributeSet = IndexMap<AttributeKey, AttributeValue>;

/// Builds an [`AttributeSet`] from `(key, value)` pairs.
pub fn attribute_set<I, V>(entries: I) -> AttributeSet
where
    I: IntoIterator<Item = (AttributeKey, V)>,
    V: Into<AttributeValue>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key, value.into()))
        .collect()
}

/// Keyed access to a shape's fixed fields.
pub trait ShapeAttributes: Clone {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue>;

    /// Writes `value` if the key exists and the kind matches; returns
    /// whether anything changed.
    fn set_attribute(&mut self, key: AttributeKey, value: AttributeValue) -> bool;

    /// Runs before the first snapshot so derived fields are captured.
    fn initialize(&mut self) {}

    fn number(&self, key: AttributeKey) -> Option<f64> {
        self.attribute(key).and_then(AttributeValue::as_number)
    }
}

pub(crate) fn write_number(slot: &mut f64, value: AttributeValue) -> bool {
    match value {
        AttributeValue::Number(number) => {
            *slot = number;
            true
        }
        AttributeValue::Color(_) => false,
    }
}

pub(crate) fn write_color(slot: &mut Color, value: AttributeValue) -> bool {
    match value {
        AttributeValue::Color(color) => {
            *slot = color;
            true
        }
        AttributeValue::Number(_) => false,
    }
}
