use super::{FontSpec, TextMeasurer};

/// Deterministic, backend-independent text width estimate.
///
/// Widths are per-glyph-class multiples of the font size, so layout results
/// are reproducible across machines without font files.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        units * font.size_px
    }
}

/// Width of the widest string in `texts`, or `0` when empty.
pub fn longest_text<S: AsRef<str>>(
    measurer: &dyn TextMeasurer,
    font: &FontSpec,
    texts: &[S],
) -> f64 {
    texts
        .iter()
        .map(|text| measurer.measure_text(text.as_ref(), font))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::{EstimatedTextMeasurer, longest_text};
    use crate::render::{FontSpec, TextMeasurer};

    #[test]
    fn empty_text_has_zero_width() {
        let font = FontSpec::default();
        assert_eq!(EstimatedTextMeasurer.measure_text("", &font), 0.0);
    }

    #[test]
    fn width_scales_with_font_size() {
        let small = FontSpec::new(10.0, "normal", "sans-serif");
        let large = FontSpec::new(20.0, "normal", "sans-serif");
        let narrow = EstimatedTextMeasurer.measure_text("100", &small);
        let wide = EstimatedTextMeasurer.measure_text("100", &large);
        assert!((wide - 2.0 * narrow).abs() <= 1e-9);
    }

    #[test]
    fn longest_text_picks_widest_entry() {
        let font = FontSpec::default();
        let labels = ["1", "1000", "10"];
        let expected = EstimatedTextMeasurer.measure_text("1000", &font);
        assert_eq!(longest_text(&EstimatedTextMeasurer, &font, &labels), expected);
        let none: [&str; 0] = [];
        assert_eq!(longest_text(&EstimatedTextMeasurer, &font, &none), 0.0);
    }
}
