//! Example: draw one scene to a pixel buffer and to an SVG stream.

use vexel_canvas::DrawingContext;
use vexel_geom::{Point, Rect};
use vexel_raster::{Brush, Color, FillRule, Font, MemorySurface, Pen, SvgSurface};

fn draw_scene(ctx: &mut DrawingContext) {
    ctx.set_pen(Pen::solid(Color::BLACK, 2.0));
    ctx.set_brush(Brush::solid(Color::rgb(70, 130, 220)));
    ctx.draw_rectangle(Rect::new(10.0, 10.0, 60.0, 40.0));

    let mut path = ctx.create_path();
    path.move_to(Point::new(90.0, 90.0));
    path.line_to(Point::new(140.0, 20.0));
    path.quad_curve_to(Point::new(180.0, 60.0), Point::new(150.0, 100.0));
    path.close();
    ctx.set_brush(Brush::solid(Color::rgb(220, 90, 70)));
    ctx.fill_path(&path, FillRule::NonZero);
    ctx.stroke_path(&path);

    ctx.set_font(Font::new(16.0));
    ctx.draw_text("vexel", Point::new(12.0, 120.0));
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut pixels = MemorySurface::new(200, 150).unwrap();
    let mut ctx = DrawingContext::bound(&mut pixels);
    println!("pixel target: native = {}", ctx.is_native());
    draw_scene(&mut ctx);
    ctx.flush();
    drop(ctx);
    pixels.pixmap().save_png("scene.png").unwrap();
    println!("wrote scene.png");

    let mut svg = SvgSurface::new(200, 150).unwrap();
    let mut ctx = DrawingContext::bound(&mut svg);
    println!("svg target: native = {}", ctx.is_native());
    draw_scene(&mut ctx);
    drop(ctx);
    println!("{}", svg.finish());
}
