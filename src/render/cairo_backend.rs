use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingContext, FontSpec, LineJoin, TextBaseline, TextHAlign, TextMeasurer,
};

/// `DrawingContext` over a borrowed Cairo context (for example a GTK
/// `DrawingArea` draw callback or an offscreen `ImageSurface`).
///
/// Cairo has a single source pattern, so fill and stroke colors are tracked
/// here and applied right before each rasterizing call. Text is laid out and
/// measured with Pango.
pub struct CairoDrawingContext<'a> {
    context: &'a Context,
    fill_color: Color,
    stroke_color: Color,
    font: FontSpec,
    text_align: TextHAlign,
    text_baseline: TextBaseline,
}

impl<'a> CairoDrawingContext<'a> {
    #[must_use]
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            fill_color: Color::rgb(0.0, 0.0, 0.0),
            stroke_color: Color::rgb(0.0, 0.0, 0.0),
            font: FontSpec::default(),
            text_align: TextHAlign::Left,
            text_baseline: TextBaseline::Top,
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }
}

impl TextMeasurer for CairoDrawingContext<'_> {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f64 {
        let layout = text_layout(self.context, text, font);
        f64::from(layout.pixel_size().0)
    }
}

impl DrawingContext for CairoDrawingContext<'_> {
    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
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
        if anticlockwise {
            self.context.arc_negative(x, y, radius, start_angle, end_angle);
        } else {
            self.context.arc(x, y, radius, start_angle, end_angle);
        }
    }

    fn fill(&mut self) -> ChartResult<()> {
        apply_color(self.context, self.fill_color);
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn stroke(&mut self) -> ChartResult<()> {
        apply_color(self.context, self.stroke_color);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        // Canvas `fillRect` leaves the current path untouched.
        let path = self
            .context
            .copy_path()
            .map_err(|err| map_backend_error("failed to copy path", err))?;
        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        apply_color(self.context, self.fill_color);
        let filled = self
            .context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err));
        self.context.append_path(&path);
        filled
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let layout = text_layout(self.context, text, &self.font);
        let (width, height) = layout.pixel_size();
        let (width, height) = (f64::from(width), f64::from(height));
        let left = match self.text_align {
            TextHAlign::Left => x,
            TextHAlign::Center => x - width / 2.0,
            TextHAlign::Right => x - width,
        };
        let top = match self.text_baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - height / 2.0,
            TextBaseline::Bottom => y - height,
        };

        apply_color(self.context, self.fill_color);
        self.context.move_to(left, top);
        pangocairo::functions::show_layout(self.context, &layout);
        self.context.new_path();
        Ok(())
    }

    fn save(&mut self) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))
    }

    fn restore(&mut self) -> ChartResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.context.translate(x, y);
    }

    fn rotate(&mut self, radians: f64) {
        self.context.rotate(radians);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.context.set_line_join(match join {
            LineJoin::Miter => cairo::LineJoin::Miter,
            LineJoin::Round => cairo::LineJoin::Round,
            LineJoin::Bevel => cairo::LineJoin::Bevel,
        });
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextHAlign) {
        self.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.text_baseline = baseline;
    }
}

/// Standalone Pango measurer backed by a 1x1 offscreen surface, for fitting
/// scales before any drawing surface exists.
pub struct PangoTextMeasurer {
    context: Context,
}

impl PangoTextMeasurer {
    pub fn new() -> ChartResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self { context })
    }
}

impl TextMeasurer for PangoTextMeasurer {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f64 {
        let layout = text_layout(&self.context, text, font);
        f64::from(layout.pixel_size().0)
    }
}

fn text_layout(context: &Context, text: &str, font: &FontSpec) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(context);
    let mut description = FontDescription::from_string(&format!("{} {}", font.family, font.style));
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&description));
    layout.set_text(text);
    layout
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
