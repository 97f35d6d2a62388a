//! Memory-backed raster surface
//!
//! Plain pixel-buffer scan conversion: Bresenham lines, bounding-loop
//! ellipses, scanline polygon fill. No antialiasing, no subpixel
//! positioning. The buffer is a tiny-skia pixmap so the surface can be
//! promoted to a native vector backend.

use tiny_skia::{ColorU8, Pixmap, PixmapMut};
use vexel_geom::{approx, Point, Rect, Size};

use crate::style::{Brush, Color, FillRule, Font, FontWeight, Pen};
use crate::surface::{Surface, SurfaceError};
use crate::text;

/// Pixel-buffer surface with primitive scan conversion.
pub struct MemorySurface {
    pixmap: Pixmap,
    promotable: bool,
}

impl MemorySurface {
    /// Create a surface that a drawing context may promote to a native
    /// vector backend.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(SurfaceError::ZeroSize { width, height })?;
        tracing::debug!("Memory surface {}x{}", width, height);
        Ok(Self { pixmap, promotable: true })
    }

    /// Create a surface that stays raster-only even under a context that
    /// would promote it. Useful when the caller wants plain scan
    /// conversion, e.g. to match the output of other raster-only targets.
    pub fn raster_only(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let mut surface = Self::new(width, height)?;
        surface.promotable = false;
        Ok(surface)
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    /// Read back a pixel, straight (non-premultiplied) color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        let idx = (y * self.pixmap.width() + x) as usize;
        let c = self.pixmap.pixels()[idx].demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }
        let idx = (y * self.pixmap.width() + x) as usize;
        let px = ColorU8::from_rgba(color.r, color.g, color.b, color.a).premultiply();
        self.pixmap.pixels_mut()[idx] = px;
    }

    fn fill_span(&mut self, y: i32, x0: f32, x1: f32, color: Color) {
        // Fill pixels whose center lies in [x0, x1)
        let start = (x0 - 0.5).ceil() as i32;
        let end = (x1 - 0.5).ceil() as i32;
        for x in start..end {
            self.set_pixel(x, y, color);
        }
    }

    /// Scanline polygon fill honoring the fill rule. Edges are sampled at
    /// pixel centers with a half-open [min, max) rule so shared vertices
    /// are counted once.
    fn fill_polygon(&mut self, points: &[Point], color: Color, rule: FillRule) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let y_start = (min_y.floor() as i32).max(0);
        let y_end = (max_y.ceil() as i32).min(self.pixmap.height() as i32);

        let n = points.len();
        let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(8);
        for y in y_start..y_end {
            let sample_y = y as f32 + 0.5;
            crossings.clear();
            for i in 0..n {
                let p = points[i];
                let q = points[(i + 1) % n];
                if p.y == q.y {
                    continue;
                }
                let (top, bot, dir) = if p.y < q.y { (p, q, 1) } else { (q, p, -1) };
                if sample_y >= top.y && sample_y < bot.y {
                    let x = top.x + (sample_y - top.y) * (bot.x - top.x) / (bot.y - top.y);
                    crossings.push((x, dir));
                }
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            match rule {
                FillRule::EvenOdd => {
                    for pair in crossings.chunks(2) {
                        if let [(x0, _), (x1, _)] = pair {
                            self.fill_span(y, *x0, *x1, color);
                        }
                    }
                }
                FillRule::NonZero => {
                    let mut winding = 0;
                    for w in crossings.windows(2) {
                        winding += w[0].1;
                        if winding != 0 {
                            self.fill_span(y, w[0].0, w[1].0, color);
                        }
                    }
                }
            }
        }
    }

    fn blit_glyph_px(&mut self, origin: Point, dx: f32, dy: f32, scale: f32, rot: Option<(f32, f32)>, color: Color) {
        // One font-grid cell becomes a scale x scale block of pixels.
        let cell = scale.ceil().max(1.0) as i32;
        let (ox, oy) = match rot {
            // Counter-clockwise rotation in y-down screen coordinates
            Some((cos, sin)) => (dx * cos + dy * sin, -dx * sin + dy * cos),
            None => (dx, dy),
        };
        let px = (origin.x + ox).round() as i32;
        let py = (origin.y + oy).round() as i32;
        for yy in 0..cell {
            for xx in 0..cell {
                self.set_pixel(px + xx, py + yy, color);
            }
        }
    }

    fn draw_text_impl(&mut self, s: &str, pos: Point, rot: Option<(f32, f32)>, font: &Font) {
        let scale = text::scale_for(font);
        if scale <= 0.0 {
            return;
        }
        let mut advance = 0.0f32;
        for ch in s.chars() {
            let rows = text::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..text::GLYPH_WIDTH {
                    if bits & (1 << (text::GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let dx = advance + col as f32 * scale;
                    let dy = row as f32 * scale;
                    self.blit_glyph_px(pos, dx, dy, scale, rot, font.color);
                    if font.weight == FontWeight::Bold {
                        self.blit_glyph_px(pos, dx + 1.0, dy, scale, rot, font.color);
                    }
                }
            }
            advance += text::GLYPH_ADVANCE * scale;
        }
    }
}

impl Surface for MemorySurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn stroke_line(&mut self, a: Point, b: Point, pen: &Pen) {
        if !pen.is_visible() {
            return;
        }
        // Bresenham on rounded endpoints; pen width beyond 1 is drawn as
        // parallel offset lines.
        let (x0, y0) = (a.x.round() as i32, a.y.round() as i32);
        let (x1, y1) = (b.x.round() as i32, b.y.round() as i32);
        let thickness = pen.width.round().max(1.0) as i32;
        let steep = (y1 - y0).abs() > (x1 - x0).abs();

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            for t in 0..thickness {
                let off = t - thickness / 2;
                if steep {
                    self.set_pixel(x + off, y, pen.color);
                } else {
                    self.set_pixel(x, y + off, pen.color);
                }
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        if brush.is_visible() {
            let x0 = rect.x.round().max(0.0) as i32;
            let y0 = rect.y.round().max(0.0) as i32;
            let x1 = rect.right().round() as i32;
            let y1 = rect.bottom().round() as i32;
            for y in y0..y1 {
                for x in x0..x1 {
                    self.set_pixel(x, y, brush.color());
                }
            }
        }
        if pen.is_visible() {
            let tl = rect.top_left();
            let tr = Point::new(rect.right(), rect.y);
            let br = rect.bottom_right();
            let bl = Point::new(rect.x, rect.bottom());
            self.stroke_line(tl, tr, pen);
            self.stroke_line(tr, br, pen);
            self.stroke_line(br, bl, pen);
            self.stroke_line(bl, tl, pen);
        }
    }

    fn draw_ellipse(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        let rx = rect.width / 2.0;
        let ry = rect.height / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let cx = rect.x + rx;
        let cy = rect.y + ry;
        if brush.is_visible() {
            let color = brush.color();
            let y0 = rect.y.floor() as i32;
            let y1 = rect.bottom().ceil() as i32;
            let x0 = rect.x.floor() as i32;
            let x1 = rect.right().ceil() as i32;
            for y in y0..y1 {
                for x in x0..x1 {
                    let nx = (x as f32 + 0.5 - cx) / rx;
                    let ny = (y as f32 + 0.5 - cy) / ry;
                    if nx * nx + ny * ny <= 1.0 {
                        self.set_pixel(x, y, color);
                    }
                }
            }
        }
        if pen.is_visible() {
            // Parametric outline; step count grows with the larger radius.
            let steps = (rx.max(ry) as u32).max(12) * 2;
            let mut prev: Option<Point> = None;
            for i in 0..=steps {
                let t = i as f32 / steps as f32 * std::f32::consts::TAU;
                let p = Point::new(cx + rx * t.cos(), cy + ry * t.sin());
                if let Some(prev) = prev {
                    self.stroke_line(prev, p, pen);
                }
                prev = Some(p);
            }
        }
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: &Brush, rule: FillRule) {
        if points.len() < 2 {
            return;
        }
        if brush.is_visible() {
            self.fill_polygon(points, brush.color(), rule);
        }
        if pen.is_visible() {
            self.stroke_polyline(points, pen);
            self.stroke_line(points[points.len() - 1], points[0], pen);
        }
    }

    fn draw_text(&mut self, s: &str, pos: Point, font: &Font) {
        self.draw_text_impl(s, pos, None, font);
    }

    fn draw_rotated_text(&mut self, s: &str, pos: Point, degrees: f32, font: &Font) {
        let rad = degrees.to_radians();
        self.draw_text_impl(s, pos, Some((rad.cos(), rad.sin())), font);
    }

    fn text_extent(&self, s: &str, font: &Font) -> Size {
        // Integer-biased metrics, like any plain device
        let exact = text::measure(s, font);
        Size::new(exact.width.ceil(), exact.height.ceil())
    }

    fn supports_native(&self) -> bool {
        self.promotable
    }

    fn native_pixels(&mut self) -> Option<PixmapMut<'_>> {
        if self.promotable {
            Some(self.pixmap.as_mut())
        } else {
            None
        }
    }
}
