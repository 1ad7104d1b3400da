mod primitives;
mod recording;
mod text_measure;

pub use primitives::{Color, FontSpec, LineJoin, TextBaseline, TextHAlign};
pub use recording::{DrawCommand, RecordingContext};
pub use text_measure::{EstimatedTextMeasurer, longest_text};

use crate::error::ChartResult;

/// Capability to measure the rendered width of a string in pixels.
///
/// Scales take this instead of a live drawing surface so layout can be
/// computed (and tested) headless.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f64;
}

/// Immediate-mode 2D drawing surface, modelled on the canvas 2D context.
///
/// Elements and scales borrow a context only for the duration of a draw call.
/// Path construction is infallible; operations that rasterize may fail in
/// real backends and therefore return `ChartResult`.
pub trait DrawingContext: TextMeasurer {
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Adds a circular arc centered at `(x, y)`; angles in radians, clockwise
    /// in screen space unless `anticlockwise` is set.
    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );

    fn fill(&mut self) -> ChartResult<()>;
    fn stroke(&mut self) -> ChartResult<()>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;

    fn save(&mut self) -> ChartResult<()>;
    fn restore(&mut self) -> ChartResult<()>;
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, radians: f64);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_font(&mut self, font: &FontSpec);
    fn set_text_align(&mut self, align: TextHAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoDrawingContext, PangoTextMeasurer};
