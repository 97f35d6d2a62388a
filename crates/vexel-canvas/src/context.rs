//! The drawing context
//!
//! One front door over two render paths. Binding a surface decides the
//! capability tier once: surfaces that hand out a pixel buffer get a
//! native vector backend, the rest draw through the primitive fallback
//! renderer, and a surface that breaks the promotion contract yields an
//! unbound context whose operations are silent no-ops.

use vexel_geom::{Point, Rect, Size};
use vexel_raster::{Brush, FillRule, Font, Pen, Surface};

use crate::backend::{Antialias, VectorBackend};
use crate::fallback::{self, DrawMode};
use crate::path::SymbolicPath;

enum Binding<'a> {
    /// No usable target; every operation is ignored.
    Unbound,
    /// Promoted pixel surface with retained native paths.
    Native(VectorBackend<'a>),
    /// Primitive surface driven through the fallback renderer.
    Raster(&'a mut dyn Surface),
}

/// Stateful 2-D drawing context over a bound surface.
///
/// Carries the current pen, brush and font; every draw call reads them.
/// Construction never fails: a defective surface produces an unbound
/// context instead, mirroring how drawing toolkits keep rendering code
/// free of error plumbing.
pub struct DrawingContext<'a> {
    binding: Binding<'a>,
    pen: Pen,
    brush: Brush,
    font: Font,
}

impl Default for DrawingContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DrawingContext<'a> {
    /// Unbound context. Valid to hold and call; draws nothing.
    pub fn new() -> Self {
        Self {
            binding: Binding::Unbound,
            pen: Pen::default(),
            brush: Brush::default(),
            font: Font::default(),
        }
    }

    /// Bind a surface, promoting it to a native backend when it offers a
    /// pixel buffer.
    pub fn bound(surface: &'a mut dyn Surface) -> Self {
        let mut ctx = Self::new();
        ctx.bind(surface);
        ctx
    }

    /// Rebind to another surface. Replaces the prior binding; a
    /// previously owned native backend is released. Pen, brush and font
    /// state carry over.
    pub fn bind(&mut self, surface: &'a mut dyn Surface) {
        self.binding = if surface.supports_native() {
            match surface.native_pixels() {
                Some(pixels) => {
                    tracing::debug!("bound native vector backend");
                    Binding::Native(VectorBackend::new(pixels))
                }
                None => {
                    tracing::warn!("surface advertises native support but gave no pixels; context unbound");
                    Binding::Unbound
                }
            }
        } else {
            tracing::debug!("bound raster-only surface");
            Binding::Raster(surface)
        };
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.binding, Binding::Unbound)
    }

    pub fn is_native(&self) -> bool {
        matches!(self.binding, Binding::Native(_))
    }

    pub fn is_raster_only(&self) -> bool {
        matches!(self.binding, Binding::Raster(_))
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// New path for this context's tier: native-capable contexts hand out
    /// paths with a retained native mirror, the rest record symbolically
    /// only.
    pub fn create_path(&self) -> SymbolicPath {
        match self.binding {
            Binding::Native(_) => SymbolicPath::with_native(),
            _ => {
                tracing::debug!("creating tracking-only path without native mirror");
                SymbolicPath::new()
            }
        }
    }

    fn emit_path(&mut self, path: &SymbolicPath, rule: FillRule, mode: DrawMode) {
        match &mut self.binding {
            Binding::Native(backend) => match mode {
                DrawMode::Outline => backend.draw_path(path, &self.pen, &self.brush, rule),
                DrawMode::Fill => backend.fill_path(path, &self.brush, rule),
                DrawMode::Stroke => backend.stroke_path(path, &self.pen),
            },
            Binding::Raster(surface) => fallback::render_path(
                &mut **surface,
                path.segments(),
                &self.pen,
                &self.brush,
                rule,
                mode,
            ),
            Binding::Unbound => tracing::trace!("path draw ignored on unbound context"),
        }
    }

    /// Fill and outline a path with the current brush and pen under the
    /// even-odd rule.
    pub fn draw_path(&mut self, path: &SymbolicPath) {
        self.emit_path(path, FillRule::default(), DrawMode::Outline);
    }

    /// Fill only. The pen is swapped for an invisible one around the
    /// draw, so surfaces with combined fill-and-outline primitives skip
    /// the outline.
    pub fn fill_path(&mut self, path: &SymbolicPath, rule: FillRule) {
        let saved = std::mem::replace(&mut self.pen, Pen::invisible());
        self.emit_path(path, rule, DrawMode::Fill);
        self.pen = saved;
    }

    /// Outline only, via the same swap with an invisible brush.
    pub fn stroke_path(&mut self, path: &SymbolicPath) {
        let saved = std::mem::replace(&mut self.brush, Brush::invisible());
        self.emit_path(path, FillRule::default(), DrawMode::Stroke);
        self.brush = saved;
    }

    pub fn draw_rectangle(&mut self, rect: Rect) {
        match &mut self.binding {
            Binding::Native(backend) => backend.draw_rect(rect, &self.pen, &self.brush),
            Binding::Raster(surface) => surface.draw_rect(rect, &self.pen, &self.brush),
            Binding::Unbound => tracing::trace!("rectangle ignored on unbound context"),
        }
    }

    pub fn stroke_line(&mut self, a: Point, b: Point) {
        match &mut self.binding {
            Binding::Native(backend) => backend.stroke_line(a, b, &self.pen),
            Binding::Raster(surface) => surface.stroke_line(a, b, &self.pen),
            Binding::Unbound => tracing::trace!("line ignored on unbound context"),
        }
    }

    /// Connected line segments through consecutive points.
    pub fn stroke_lines(&mut self, points: &[Point]) {
        match &mut self.binding {
            Binding::Native(backend) => backend.stroke_polyline(points, &self.pen),
            Binding::Raster(surface) => surface.stroke_polyline(points, &self.pen),
            Binding::Unbound => tracing::trace!("polyline ignored on unbound context"),
        }
    }

    pub fn draw_text(&mut self, s: &str, pos: Point) {
        match &mut self.binding {
            Binding::Native(backend) => backend.draw_text(s, pos, None, &self.font),
            Binding::Raster(surface) => surface.draw_text(s, pos, &self.font),
            Binding::Unbound => tracing::trace!("text ignored on unbound context"),
        }
    }

    /// Text rotated counter-clockwise by `angle` radians around `pos`.
    pub fn draw_rotated_text(&mut self, s: &str, pos: Point, angle: f32) {
        match &mut self.binding {
            Binding::Native(backend) => backend.draw_text(s, pos, Some(angle), &self.font),
            Binding::Raster(surface) => {
                surface.draw_rotated_text(s, pos, angle.to_degrees(), &self.font)
            }
            Binding::Unbound => tracing::trace!("rotated text ignored on unbound context"),
        }
    }

    /// Extent of `s` in the current font. Native contexts report
    /// fractional metrics, raster surfaces integer-biased ones, unbound
    /// contexts zero.
    pub fn text_extent(&self, s: &str) -> Size {
        match &self.binding {
            Binding::Native(backend) => backend.text_extent(s, &self.font),
            Binding::Raster(surface) => surface.text_extent(s, &self.font),
            Binding::Unbound => Size::new(0.0, 0.0),
        }
    }

    /// Cumulative width of every prefix of `s`, one entry per character.
    pub fn partial_text_extents(&self, s: &str) -> Vec<f32> {
        let mut widths = Vec::new();
        for (i, ch) in s.char_indices() {
            let end = i + ch.len_utf8();
            widths.push(self.text_extent(&s[..end]).width);
        }
        widths
    }

    /// Axis-aligned box covering `s` rotated by `angle` radians.
    pub fn text_size(&self, s: &str, angle: f32) -> Size {
        let extent = self.text_extent(s);
        if angle == 0.0 {
            return extent;
        }
        let (sin, cos) = (angle.sin().abs(), angle.cos().abs());
        Size::new(
            extent.width * cos + extent.height * sin,
            extent.width * sin + extent.height * cos,
        )
    }

    /// Concatenate a scale onto the transform. Only native backends carry
    /// a transform; elsewhere this is ignored.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        match &mut self.binding {
            Binding::Native(backend) => backend.scale(sx, sy),
            _ => tracing::trace!("scale ignored without native backend"),
        }
    }

    /// Request an antialiasing mode. Returns whether the request took
    /// effect; only native backends honor it.
    pub fn set_antialias(&mut self, mode: Antialias) -> bool {
        match &mut self.binding {
            Binding::Native(backend) => {
                backend.set_antialias(mode);
                true
            }
            _ => false,
        }
    }

    /// Effective antialiasing mode; non-native contexts always report the
    /// default.
    pub fn antialias(&self) -> Antialias {
        match &self.binding {
            Binding::Native(backend) => backend.antialias(),
            _ => Antialias::Default,
        }
    }

    pub fn flush(&mut self) {
        match &mut self.binding {
            Binding::Native(backend) => backend.flush(),
            Binding::Raster(surface) => surface.flush(),
            Binding::Unbound => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexel_raster::{Color, MemorySurface, SvgSurface};

    #[test]
    fn promotable_surface_binds_native() {
        let mut surface = MemorySurface::new(16, 16).unwrap();
        let ctx = DrawingContext::bound(&mut surface);
        assert!(ctx.is_valid());
        assert!(ctx.is_native());
        assert!(ctx.create_path().has_native());
    }

    #[test]
    fn stream_surface_binds_raster_only() {
        let mut surface = SvgSurface::new(16, 16).unwrap();
        let ctx = DrawingContext::bound(&mut surface);
        assert!(ctx.is_valid());
        assert!(ctx.is_raster_only());
        assert!(!ctx.create_path().has_native());
    }

    #[test]
    fn rebinding_replaces_the_backend() {
        let mut first = SvgSurface::new(8, 8).unwrap();
        let mut second = MemorySurface::new(8, 8).unwrap();
        let mut ctx = DrawingContext::bound(&mut first);
        assert!(ctx.is_raster_only());
        ctx.set_pen(Pen::solid(Color::RED, 3.0));
        ctx.bind(&mut second);
        assert!(ctx.is_native());
        // Tool state survives the rebind
        assert_eq!(ctx.pen().width, 3.0);
    }

    #[test]
    fn unbound_context_is_inert() {
        let mut ctx = DrawingContext::new();
        assert!(!ctx.is_valid());
        ctx.draw_rectangle(Rect::new(0.0, 0.0, 4.0, 4.0));
        ctx.stroke_line(Point::ZERO, Point::new(4.0, 4.0));
        assert_eq!(ctx.text_extent("hi"), Size::new(0.0, 0.0));
    }

    #[test]
    fn fill_and_stroke_restore_tool_state() {
        let mut surface = MemorySurface::raster_only(16, 16).unwrap();
        let mut ctx = DrawingContext::bound(&mut surface);
        ctx.set_pen(Pen::solid(Color::RED, 2.0));
        ctx.set_brush(Brush::solid(Color::BLUE));

        let mut path = ctx.create_path();
        path.move_to(Point::new(1.0, 1.0));
        path.line_to(Point::new(10.0, 1.0));
        path.line_to(Point::new(10.0, 10.0));
        path.close();

        ctx.fill_path(&path, FillRule::EvenOdd);
        assert_eq!(ctx.pen().color, Color::RED);
        assert_eq!(ctx.pen().width, 2.0);

        ctx.stroke_path(&path);
        assert_eq!(ctx.brush().color(), Color::BLUE);
        assert!(ctx.brush().is_visible());
    }

    #[test]
    fn antialias_rejected_off_native() {
        let mut surface = SvgSurface::new(8, 8).unwrap();
        let mut ctx = DrawingContext::bound(&mut surface);
        assert!(!ctx.set_antialias(Antialias::None));
        assert_eq!(ctx.antialias(), Antialias::Default);

        let mut pixels = MemorySurface::new(8, 8).unwrap();
        let mut native = DrawingContext::bound(&mut pixels);
        assert!(native.set_antialias(Antialias::None));
        assert_eq!(native.antialias(), Antialias::None);
    }

    #[test]
    fn rotated_text_size_covers_rotated_box() {
        let mut surface = MemorySurface::new(32, 32).unwrap();
        let ctx = DrawingContext::bound(&mut surface);
        let flat = ctx.text_size("ab", 0.0);
        let quarter = ctx.text_size("ab", std::f32::consts::FRAC_PI_2);
        assert!((quarter.width - flat.height).abs() < 1e-3);
        assert!((quarter.height - flat.width).abs() < 1e-3);
    }

    #[test]
    fn partial_extents_are_cumulative() {
        let mut surface = MemorySurface::new(32, 32).unwrap();
        let ctx = DrawingContext::bound(&mut surface);
        let widths = ctx.partial_text_extents("abc");
        assert_eq!(widths.len(), 3);
        assert!(widths[0] < widths[1] && widths[1] < widths[2]);
        assert_eq!(widths[2], ctx.text_extent("abc").width);
    }
}
