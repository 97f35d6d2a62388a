//! Dual-backend 2-D drawing
//!
//! A [`DrawingContext`] fronts two render paths behind one API. Binding a
//! [`Surface`](vexel_raster::Surface) promotes it to a native vector
//! backend when it exposes a pixel buffer; otherwise every draw call is
//! decomposed into the surface's primitive operations by the fallback
//! renderer. Paths are recorded symbolically either way, so containment
//! queries, bounding boxes and transforms work on every tier.

pub mod backend;
pub mod context;
pub mod fallback;
pub mod path;
pub mod segment;

mod flatten;

pub use backend::{Antialias, NativePath, VectorBackend};
pub use context::DrawingContext;
pub use fallback::DrawMode;
pub use path::SymbolicPath;
pub use segment::{PathSegment, SegmentKind};
