//! The effect instance: two owned surfaces rebuilt on parameter change and read during tiles.
//!
//! `rebuild` takes `&mut self` and every render entry point takes `&self`, so a rebuild always
//! finishes before any tile can read the surfaces.

use rayon::prelude::*;

use crate::foundation::core::{BezPath, IntRect};
use crate::foundation::error::{StampError, StampResult};
use crate::geometry::boundary::{Boundary, StampLayout};
use crate::params::StampParams;
use crate::render::composite::{
    alpha_from_layer, composite_pixel, composite_row, layer_over_straight_in_place,
};
use crate::render::raster::{
    Decorations, MatStyle, raster_size, rasterize_decorations, rasterize_eraser,
};
use crate::render::surface::{AlphaSurface, Surface};
use crate::render::tiles::{
    CancelSignal, NeverCancel, RenderStats, RenderThreading, ThreadPoolCache, TileOutcome,
};

/// Rows per band used by [`apply`].
pub const DEFAULT_TILE_ROWS: u32 = 64;

#[derive(Clone, Debug)]
struct Prepared {
    selection: IntRect,
    layout: StampLayout,
    boundary: Boundary,
}

/// Postage stamp effect with its cached stamp and eraser surfaces.
#[derive(Debug)]
pub struct PostageStamp {
    stamp: Surface,
    eraser: AlphaSurface,
    prepared: Option<Prepared>,
    pools: ThreadPoolCache,
}

impl Default for PostageStamp {
    fn default() -> Self {
        Self::new()
    }
}

struct TileBuffer {
    rect: IntRect,
    rows_written: u32,
    data: Vec<u8>,
}

impl PostageStamp {
    /// Effect with empty surfaces; call [`PostageStamp::rebuild`] before rendering.
    pub fn new() -> Self {
        Self {
            stamp: Surface::new(0, 0),
            eraser: AlphaSurface::new(0, 0),
            prepared: None,
            pools: ThreadPoolCache::default(),
        }
    }

    /// Recompute the boundary and repaint both surfaces for `params`.
    ///
    /// Surfaces are reallocated when `src` changed size and fully overwritten otherwise.
    #[tracing::instrument(skip(self, src, params), fields(width = src.width(), height = src.height()))]
    pub fn rebuild(
        &mut self,
        src: &Surface,
        selection: IntRect,
        params: &StampParams,
    ) -> StampResult<()> {
        if selection.is_empty() || !src.bounds().contains_rect(selection) {
            return Err(StampError::validation(format!(
                "selection {selection:?} must be non-empty and inside the {}x{} source",
                src.width(),
                src.height()
            )));
        }
        let (w, h) = raster_size(src.width(), src.height())?;

        self.prepared = None;
        let resized_stamp = self.stamp.ensure_size(src.width(), src.height());
        let resized_eraser = self.eraser.ensure_size(src.width(), src.height());
        if resized_stamp || resized_eraser {
            tracing::debug!(width = w, height = h, "reallocated stamp surfaces");
        }

        let layout = StampLayout::from_params(selection, params);
        tracing::debug!(
            offset_x = layout.offset.x,
            offset_y = layout.offset.y,
            stamp_width = layout.width,
            stamp_height = layout.height,
            tension = layout.tension,
            "stamp layout"
        );
        let boundary = layout.boundary();
        let boundary_path = boundary.path();

        paint_stamp_surface(
            &mut self.stamp,
            src,
            selection,
            &layout,
            &boundary,
            &boundary_path,
            params,
        )?;
        paint_eraser_surface(&mut self.eraser, selection, &boundary_path)?;

        self.prepared = Some(Prepared {
            selection,
            layout,
            boundary,
        });
        Ok(())
    }

    /// Stamp color surface (source copy plus decorations).
    pub fn stamp_surface(&self) -> &Surface {
        &self.stamp
    }

    /// Eraser surface: 0 inside the stamp, 255 outside it within the selection.
    pub fn eraser_surface(&self) -> &AlphaSurface {
        &self.eraser
    }

    /// Layout of the last rebuild.
    pub fn layout(&self) -> Option<&StampLayout> {
        self.prepared.as_ref().map(|p| &p.layout)
    }

    /// Boundary of the last rebuild.
    pub fn boundary(&self) -> Option<&Boundary> {
        self.prepared.as_ref().map(|p| &p.boundary)
    }

    /// Selection of the last rebuild.
    pub fn selection(&self) -> Option<IntRect> {
        self.prepared.as_ref().map(|p| p.selection)
    }

    /// Output pixel at `(x, y)`; `None` before the first rebuild or outside the surfaces.
    pub fn composite_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.prepared.as_ref()?;
        Some(composite_pixel(self.stamp.pixel(x, y)?, self.eraser.value(x, y)?))
    }

    /// Render one tile of `dst`, polling `cancel` before each scanline.
    ///
    /// The tile is clipped to `dst`. On cancellation the rows already written stay as they are.
    pub fn render_tile<C>(
        &self,
        dst: &mut Surface,
        tile: IntRect,
        cancel: &C,
    ) -> StampResult<TileOutcome>
    where
        C: CancelSignal + ?Sized,
    {
        self.check_target(dst)?;
        let Some(tile) = tile.intersect(dst.bounds()) else {
            return Ok(TileOutcome::Completed);
        };

        for (rows_written, y) in (tile.top..tile.bottom).enumerate() {
            if cancel.is_cancelled() {
                tracing::trace!(?tile, rows_written, "tile cancelled");
                return Ok(TileOutcome::Cancelled {
                    rows_written: rows_written as u32,
                });
            }
            composite_row(
                dst.row_mut(y, tile.left, tile.right),
                self.stamp.row(y, tile.left, tile.right),
                self.eraser.row(y, tile.left, tile.right),
            );
        }
        Ok(TileOutcome::Completed)
    }

    /// Render a list of tiles, serially or on a rayon pool.
    ///
    /// Tiles are expected to be disjoint; their order does not matter. The pool is kept on the
    /// effect and reused by later calls with the same thread count.
    pub fn render_tiles<C>(
        &self,
        dst: &mut Surface,
        tiles: &[IntRect],
        threading: &RenderThreading,
        cancel: &C,
    ) -> StampResult<RenderStats>
    where
        C: CancelSignal + ?Sized,
    {
        self.check_target(dst)?;
        let mut stats = RenderStats::default();

        if !threading.parallel {
            for &tile in tiles {
                stats.record(self.render_tile(dst, tile, cancel)?);
            }
            return Ok(stats);
        }

        let bounds = dst.bounds();
        let pool = self.pools.get(threading.threads)?;
        let rendered = pool.install(|| {
            tiles
                .par_iter()
                .map(|tile| {
                    tile.intersect(bounds)
                        .map(|rect| self.render_tile_buffer(rect, cancel))
                })
                .collect::<Vec<_>>()
        });

        for buf in rendered {
            let Some(buf) = buf else {
                stats.record(TileOutcome::Completed);
                continue;
            };
            let row_bytes = buf.rect.width() as usize * 4;
            for (i, chunk) in buf
                .data
                .chunks_exact(row_bytes)
                .take(buf.rows_written as usize)
                .enumerate()
            {
                let y = buf.rect.top + i as i32;
                dst.row_mut(y, buf.rect.left, buf.rect.right)
                    .copy_from_slice(chunk);
            }
            stats.record(if buf.rows_written == buf.rect.height() {
                TileOutcome::Completed
            } else {
                TileOutcome::Cancelled {
                    rows_written: buf.rows_written,
                }
            });
        }
        Ok(stats)
    }

    fn render_tile_buffer<C>(&self, rect: IntRect, cancel: &C) -> TileBuffer
    where
        C: CancelSignal + ?Sized,
    {
        let row_bytes = rect.width() as usize * 4;
        let mut data = vec![0u8; row_bytes * rect.height() as usize];
        let mut rows_written = 0u32;
        for (y, out) in (rect.top..rect.bottom).zip(data.chunks_exact_mut(row_bytes)) {
            if cancel.is_cancelled() {
                tracing::trace!(tile = ?rect, rows_written, "tile cancelled");
                break;
            }
            composite_row(
                out,
                self.stamp.row(y, rect.left, rect.right),
                self.eraser.row(y, rect.left, rect.right),
            );
            rows_written += 1;
        }
        TileBuffer {
            rect,
            rows_written,
            data,
        }
    }

    fn check_target(&self, dst: &Surface) -> StampResult<()> {
        if self.prepared.is_none() {
            return Err(StampError::render("render called before rebuild"));
        }
        if dst.width() != self.stamp.width() || dst.height() != self.stamp.height() {
            return Err(StampError::render(format!(
                "destination {}x{} does not match prepared surfaces {}x{}",
                dst.width(),
                dst.height(),
                self.stamp.width(),
                self.stamp.height()
            )));
        }
        Ok(())
    }
}

/// Clear `stamp`, copy the selection from `src`, then draw mat and outline over it.
pub(crate) fn paint_stamp_surface(
    stamp: &mut Surface,
    src: &Surface,
    selection: IntRect,
    layout: &StampLayout,
    boundary: &Boundary,
    boundary_path: &BezPath,
    params: &StampParams,
) -> StampResult<()> {
    stamp.clear();
    stamp.copy_rect_from(src, selection);

    let edges = boundary.edge_curves();
    let deco = Decorations {
        bounds: layout.bounds(),
        boundary: boundary_path,
        edges: &edges,
        mat: params.mat_enabled.then(|| MatStyle {
            color: params.mat_color,
            pen_width: f64::from(params.mat_size) * params.scale * 2.0,
        }),
        outline: params.outline_enabled,
    };
    let (w, h) = raster_size(stamp.width(), stamp.height())?;
    if let Some(layer) = rasterize_decorations(w, h, &deco) {
        layer_over_straight_in_place(stamp, layer.data_as_u8_slice())?;
    }
    Ok(())
}

/// Repaint `eraser` as the complement of the stamp inside `selection`.
pub(crate) fn paint_eraser_surface(
    eraser: &mut AlphaSurface,
    selection: IntRect,
    boundary_path: &BezPath,
) -> StampResult<()> {
    let (w, h) = raster_size(eraser.width(), eraser.height())?;
    let mask = rasterize_eraser(w, h, selection, boundary_path);
    alpha_from_layer(eraser, mask.data_as_u8_slice())
}

/// One-shot helper: rebuild for `params` and render the whole selection into a copy of `src`.
pub fn apply(src: &Surface, selection: IntRect, params: &StampParams) -> StampResult<Surface> {
    let mut fx = PostageStamp::new();
    fx.rebuild(src, selection, params)?;
    let mut out = src.clone();
    fx.render_tiles(
        &mut out,
        &selection.split_rows(DEFAULT_TILE_ROWS),
        &RenderThreading::default(),
        &NeverCancel,
    )?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/effect.rs"]
mod tests;
