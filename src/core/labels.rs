use serde::{Deserialize, Serialize};

use crate::core::range_fit::ScaleRange;

const VALUE_PLACEHOLDER: &str = "{value}";

/// Axis label template; every `{value}` is replaced by the formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTemplate(String);

impl LabelTemplate {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn render(&self, value: &str) -> String {
        self.0.replace(VALUE_PLACEHOLDER, value)
    }
}

impl Default for LabelTemplate {
    fn default() -> Self {
        Self::new(VALUE_PLACEHOLDER)
    }
}

/// Number of fractional digits in the shortest decimal form of `value`.
#[must_use]
pub fn decimal_places(value: f64) -> usize {
    if !value.is_finite() || value.fract() == 0.0 {
        return 0;
    }
    let text = value.to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

/// One label per grid line, formatted with the step's precision.
#[must_use]
pub fn build_value_labels(range: &ScaleRange, template: &LabelTemplate) -> Vec<String> {
    let precision = decimal_places(range.step_value);
    range
        .tick_values()
        .map(|value| template.render(&format!("{value:.precision$}")))
        .collect()
}
