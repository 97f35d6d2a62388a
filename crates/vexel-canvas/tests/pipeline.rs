//! End-to-end drawing through the context on every surface tier.

use vexel_canvas::{Antialias, DrawingContext};
use vexel_geom::{Point, Rect, Size};
use vexel_raster::{Brush, Color, FillRule, Font, MemorySurface, Pen, Surface, SvgSurface};

fn triangle(ctx: &DrawingContext) -> vexel_canvas::SymbolicPath {
    let mut path = ctx.create_path();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(10.0, 0.0));
    path.line_to(Point::new(10.0, 10.0));
    path.close();
    path
}

#[test]
fn fallback_fill_hits_interior_pixels() {
    let mut surface = MemorySurface::raster_only(20, 20).unwrap();
    let mut ctx = DrawingContext::bound(&mut surface);
    assert!(ctx.is_raster_only());

    ctx.set_brush(Brush::solid(Color::RED));
    let path = triangle(&ctx);
    assert!(!path.has_native());
    ctx.fill_path(&path, FillRule::NonZero);
    drop(ctx);

    assert_eq!(surface.pixel(7, 3), Some(Color::RED));
    assert_eq!(surface.pixel(1, 9), Some(Color::TRANSPARENT));
}

#[test]
fn native_fill_hits_interior_pixels() {
    let mut surface = MemorySurface::new(20, 20).unwrap();
    let mut ctx = DrawingContext::bound(&mut surface);
    assert!(ctx.is_native());

    ctx.set_brush(Brush::solid(Color::RED));
    let path = triangle(&ctx);
    assert!(path.has_native());
    ctx.fill_path(&path, FillRule::NonZero);
    drop(ctx);

    assert_eq!(surface.pixel(7, 3), Some(Color::RED));
    assert_eq!(surface.pixel(1, 9), Some(Color::TRANSPARENT));
}

#[test]
fn both_tiers_agree_on_path_introspection() {
    let mut pixels = MemorySurface::new(20, 20).unwrap();
    let native_ctx = DrawingContext::bound(&mut pixels);
    let native_path = triangle(&native_ctx);
    drop(native_ctx);

    let mut stream = SvgSurface::new(20, 20).unwrap();
    let raster_ctx = DrawingContext::bound(&mut stream);
    let tracked_path = triangle(&raster_ctx);

    assert_eq!(native_path.bounding_box(), tracked_path.bounding_box());
    assert_eq!(native_path.current_point(), tracked_path.current_point());
    for p in [Point::new(7.0, 3.0), Point::new(1.0, 9.0)] {
        assert_eq!(
            native_path.contains(p, FillRule::NonZero),
            tracked_path.contains(p, FillRule::NonZero)
        );
    }
}

#[test]
fn svg_surface_records_path_elements() {
    let mut surface = SvgSurface::new(40, 40).unwrap();
    let mut ctx = DrawingContext::bound(&mut surface);
    ctx.set_brush(Brush::solid(Color::BLUE));
    let path = triangle(&ctx);
    ctx.draw_path(&path);
    ctx.draw_rectangle(Rect::new(12.0, 12.0, 8.0, 8.0));
    ctx.draw_text("hi", Point::new(2.0, 30.0));
    drop(ctx);

    let doc = surface.finish();
    assert!(doc.contains("<polygon"));
    assert!(doc.contains("<rect"));
    assert!(doc.contains(">hi</text>"));
}

#[test]
fn native_scale_applies_to_subsequent_draws() {
    let mut surface = MemorySurface::new(20, 20).unwrap();
    let mut ctx = DrawingContext::bound(&mut surface);
    ctx.set_pen(Pen::invisible());
    ctx.set_brush(Brush::solid(Color::GREEN));
    ctx.scale(2.0, 2.0);
    ctx.draw_rectangle(Rect::new(1.0, 1.0, 4.0, 4.0));
    drop(ctx);

    // Rect lands at (2,2)..(10,10) after the scale
    assert_eq!(surface.pixel(6, 6), Some(Color::GREEN));
    assert_eq!(surface.pixel(11, 11), Some(Color::TRANSPARENT));
}

#[test]
fn metrics_bias_differs_by_tier() {
    let font = Font::new(11.0);

    let mut pixels = MemorySurface::new(20, 20).unwrap();
    let mut native_ctx = DrawingContext::bound(&mut pixels);
    native_ctx.set_font(font);
    let fractional = native_ctx.text_extent("abc");
    drop(native_ctx);

    let mut stream = SvgSurface::new(20, 20).unwrap();
    let mut raster_ctx = DrawingContext::bound(&mut stream);
    raster_ctx.set_font(font);
    let biased = raster_ctx.text_extent("abc");

    assert_eq!(biased.width, fractional.width.ceil());
    assert_eq!(biased.height, fractional.height.ceil());
    assert!(biased.width >= fractional.width);
}

struct BrokenSurface;

impl Surface for BrokenSurface {
    fn width(&self) -> u32 {
        8
    }
    fn height(&self) -> u32 {
        8
    }
    fn stroke_line(&mut self, _: Point, _: Point, _: &Pen) {}
    fn draw_rect(&mut self, _: Rect, _: &Pen, _: &Brush) {}
    fn draw_ellipse(&mut self, _: Rect, _: &Pen, _: &Brush) {}
    fn draw_polygon(&mut self, _: &[Point], _: &Pen, _: &Brush, _: FillRule) {}
    fn draw_text(&mut self, _: &str, _: Point, _: &Font) {}
    fn draw_rotated_text(&mut self, _: &str, _: Point, _: f32, _: &Font) {}
    fn text_extent(&self, _: &str, _: &Font) -> Size {
        Size::new(0.0, 0.0)
    }
    // Claims promotion support but never delivers a pixel buffer
    fn supports_native(&self) -> bool {
        true
    }
}

#[test]
fn broken_promotion_contract_yields_unbound_context() {
    let mut surface = BrokenSurface;
    let mut ctx = DrawingContext::bound(&mut surface);
    assert!(!ctx.is_valid());
    assert!(!ctx.set_antialias(Antialias::None));
    // Draw calls are ignored rather than panicking
    ctx.draw_rectangle(Rect::new(0.0, 0.0, 4.0, 4.0));
}

#[test]
fn rotated_text_lands_off_the_baseline_row() {
    let mut surface = MemorySurface::raster_only(40, 40).unwrap();
    let mut ctx = DrawingContext::bound(&mut surface);
    ctx.set_font(Font::new(8.0).with_color(Color::BLACK));
    ctx.draw_rotated_text("II", Point::new(20.0, 20.0), std::f32::consts::FRAC_PI_2);
    drop(ctx);

    // A quarter turn counter-clockwise runs the text upward from the anchor
    let mut above = 0;
    let mut right = 0;
    for y in 0..20 {
        for x in 0..40 {
            if surface.pixel(x, y) == Some(Color::BLACK) {
                above += 1;
            }
        }
    }
    for y in 20..40 {
        for x in 21..40 {
            if surface.pixel(x, y) == Some(Color::BLACK) {
                right += 1;
            }
        }
    }
    assert!(above > 0);
    assert_eq!(right, 0);
}
