//! vexel-raster - Raster Surfaces
//!
//! The raster-only side of the drawing stack: pen/brush/font state, the
//! `Surface` scan-conversion contract, a memory pixel-buffer surface and
//! an SVG stream-writer surface.

mod memory;
mod style;
mod surface;
mod svg;
pub mod text;

pub use memory::MemorySurface;
pub use style::{Brush, Color, FillRule, Font, FontWeight, Pen, PenStyle};
pub use surface::{Surface, SurfaceError};
pub use svg::SvgSurface;
