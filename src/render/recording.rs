use crate::error::{ChartError, ChartResult};

use super::{
    Color, DrawingContext, EstimatedTextMeasurer, FontSpec, LineJoin, TextBaseline, TextHAlign,
    TextMeasurer,
};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginPath,
    ClosePath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Fill,
    Stroke,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    FillText { text: String, x: f64, y: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    FillColor(Color),
    StrokeColor(Color),
    LineWidth(f64),
    LineJoin(LineJoin),
    Font(FontSpec),
    TextAlign(TextHAlign),
    TextBaseline(TextBaseline),
}

/// Headless drawing context that records every call.
///
/// Used by tests and by hosts that replay draw calls onto their own surface.
/// Like a real backend it rejects fills, strokes and text whose geometry is
/// not finite, so invalid layouts surface as errors instead of silent no-ops.
#[derive(Debug)]
pub struct RecordingContext<M: TextMeasurer = EstimatedTextMeasurer> {
    measurer: M,
    commands: Vec<DrawCommand>,
    path_is_finite: bool,
    save_depth: usize,
}

impl RecordingContext<EstimatedTextMeasurer> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_measurer(EstimatedTextMeasurer)
    }
}

impl Default for RecordingContext<EstimatedTextMeasurer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TextMeasurer> RecordingContext<M> {
    #[must_use]
    pub fn with_measurer(measurer: M) -> Self {
        Self {
            measurer,
            commands: Vec::new(),
            path_is_finite: true,
            save_depth: 0,
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.path_is_finite = true;
        self.save_depth = 0;
    }

    /// Texts drawn with `fill_text`, in call order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }

    fn track_point(&mut self, values: &[f64]) {
        if values.iter().any(|value| !value.is_finite()) {
            self.path_is_finite = false;
        }
    }

    fn ensure_finite_path(&self, operation: &str) -> ChartResult<()> {
        if self.path_is_finite {
            Ok(())
        } else {
            Err(ChartError::InvalidData(format!(
                "{operation} on a path with non-finite coordinates"
            )))
        }
    }
}

impl<M: TextMeasurer> TextMeasurer for RecordingContext<M> {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f64 {
        self.measurer.measure_text(text, font)
    }
}

impl<M: TextMeasurer> DrawingContext for RecordingContext<M> {
    fn begin_path(&mut self) {
        self.path_is_finite = true;
        self.commands.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.track_point(&[x, y]);
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.track_point(&[x, y]);
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        self.track_point(&[x, y, radius, start_angle, end_angle]);
        if radius < 0.0 {
            self.path_is_finite = false;
        }
        self.commands.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.ensure_finite_path("fill")?;
        self.commands.push(DrawCommand::Fill);
        Ok(())
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.ensure_finite_path("stroke")?;
        self.commands.push(DrawCommand::Stroke);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        if ![x, y, width, height].iter().all(|value| value.is_finite()) {
            return Err(ChartError::InvalidData(
                "rectangle geometry must be finite".to_owned(),
            ));
        }
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
    }

    fn save(&mut self) -> ChartResult<()> {
        self.save_depth += 1;
        self.commands.push(DrawCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        if self.save_depth == 0 {
            return Err(ChartError::InvalidData(
                "restore without matching save".to_owned(),
            ));
        }
        self.save_depth -= 1;
        self.commands.push(DrawCommand::Restore);
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, radians: f64) {
        self.commands.push(DrawCommand::Rotate { radians });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.commands.push(DrawCommand::LineJoin(join));
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.commands.push(DrawCommand::Font(font.clone()));
    }

    fn set_text_align(&mut self, align: TextHAlign) {
        self.commands.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(DrawCommand::TextBaseline(baseline));
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, RecordingContext};
    use crate::render::DrawingContext;

    #[test]
    fn non_finite_path_is_rejected_on_fill() {
        let mut context = RecordingContext::new();
        context.begin_path();
        context.move_to(0.0, 0.0);
        context.line_to(f64::NAN, 1.0);
        assert!(context.fill().is_err());

        context.begin_path();
        context.move_to(0.0, 0.0);
        assert!(context.fill().is_ok());
    }

    #[test]
    fn unbalanced_restore_is_rejected() {
        let mut context = RecordingContext::new();
        assert!(context.restore().is_err());
        context.save().expect("save");
        context.restore().expect("restore");
        assert_eq!(
            context.count(|command| matches!(command, DrawCommand::Save | DrawCommand::Restore)),
            2
        );
    }
}
