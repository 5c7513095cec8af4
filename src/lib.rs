//! Postage stamp effect for RGBA images.
//!
//! The effect cuts a rectangular selection into a postage stamp: a scalloped (or zig-zag)
//! perforated border, an optional colored mat band just inside it, an optional light outline,
//! and full transparency outside the border.
//!
//! # Pipeline overview
//!
//! 1. **Boundary**: `selection + StampParams -> StampLayout -> Boundary` (four edge point
//!    sequences, clockwise when walked top, right, reversed bottom, reversed left)
//! 2. **Rebuild**: [`PostageStamp::rebuild`] paints the owned stamp surface (source copy, mat,
//!    outline) and the eraser surface (complement of the boundary inside the selection) with the
//!    `vello_cpu` rasterizer
//! 3. **Render**: [`PostageStamp::render_tile`] / [`PostageStamp::render_tiles`] write
//!    `(stamp.rgb, 255 - eraser)` into destination tiles, polling a [`CancelSignal`] per row
//!
//! Rebuild takes `&mut self` and rendering takes `&self`: tiles can be rendered concurrently
//! once a rebuild has returned.
//!
//! Pixels are straight (non-premultiplied) RGBA8 on input and output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod geometry;
mod params;
mod render;

pub use foundation::core::{BezPath, IntRect, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{StampError, StampResult};
pub use geometry::boundary::{Boundary, StampLayout, compute_boundary};
pub use geometry::spline::cardinal_path;
pub use params::{PerforationStyle, StampParams};
pub use render::composite::{PremulRgba8, composite_pixel, over};
pub use render::effect::{DEFAULT_TILE_ROWS, PostageStamp, apply};
pub use render::surface::{AlphaSurface, Surface};
pub use render::tiles::{
    CancelSignal, CancelToken, NeverCancel, RenderStats, RenderThreading, TileOutcome,
};
