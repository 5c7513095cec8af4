//! `vello_cpu` rasterization of the stamp decorations and the eraser mask.
//!
//! Both functions render into a fresh, transparent, premultiplied pixmap the size of the source
//! image; callers merge the result into the owned surfaces.

use vello_cpu::kurbo as cpu_kurbo;
use vello_cpu::peniko::{Color, Fill};

use crate::foundation::core::{BezPath, IntRect, Point, Rect, Rgba8};
use crate::foundation::error::{StampError, StampResult};

/// Coverage at or above this value counts as fully inside while anti-aliasing is off.
const ALIASED_COVERAGE_THRESHOLD: u8 = 128;

/// Mat band settings in pixel units.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MatStyle {
    pub(crate) color: Rgba8,
    /// Width of the rectangle pen; half of it lands inside the stamp.
    pub(crate) pen_width: f64,
}

/// Decorations painted over the stamp surface.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Decorations<'a> {
    pub(crate) bounds: Rect,
    pub(crate) boundary: &'a BezPath,
    pub(crate) edges: &'a BezPath,
    pub(crate) mat: Option<MatStyle>,
    pub(crate) outline: bool,
}

/// Raster size as accepted by `vello_cpu`.
pub(crate) fn raster_size(width: u32, height: u32) -> StampResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| StampError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| StampError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

/// Paint mat and outline; `None` when neither is enabled.
pub(crate) fn rasterize_decorations(
    width: u16,
    height: u16,
    deco: &Decorations<'_>,
) -> Option<vello_cpu::Pixmap> {
    if deco.mat.is_none() && !deco.outline {
        return None;
    }

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    let boundary = bezpath_to_cpu(deco.boundary);

    if let Some(mat) = deco.mat {
        let paint = color_to_cpu(mat.color);

        // Bleed: thick rectangle stroke, hard-clipped to the perforated outline.
        ctx.set_aliasing_threshold(Some(ALIASED_COVERAGE_THRESHOLD));
        ctx.set_fill_rule(Fill::NonZero);
        ctx.push_clip_layer(&boundary);
        ctx.set_paint(paint);
        ctx.set_stroke(cpu_kurbo::Stroke::new(mat.pen_width));
        ctx.stroke_rect(&rect_to_cpu(deco.bounds));
        ctx.pop_layer();

        // Crisp: anti-aliased hairline along the outline itself.
        ctx.set_aliasing_threshold(None);
        ctx.set_stroke(cpu_kurbo::Stroke::new(1.0));
        ctx.stroke_path(&boundary);
    }

    if deco.outline {
        ctx.set_aliasing_threshold(None);
        ctx.set_paint(color_to_cpu(Rgba8::LIGHT_GRAY));
        ctx.set_stroke(cpu_kurbo::Stroke::new(2.0).with_caps(cpu_kurbo::Cap::Round));
        ctx.stroke_path(&bezpath_to_cpu(deco.edges));
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Some(pixmap)
}

/// Fill everything inside `selection` but outside `boundary` with opaque coverage.
pub(crate) fn rasterize_eraser(
    width: u16,
    height: u16,
    selection: IntRect,
    boundary: &BezPath,
) -> vello_cpu::Pixmap {
    let sel = selection.to_rect();
    let mut complement = cpu_kurbo::BezPath::new();
    complement.move_to(cpu_kurbo::Point::new(sel.x0, sel.y0));
    complement.line_to(cpu_kurbo::Point::new(sel.x1, sel.y0));
    complement.line_to(cpu_kurbo::Point::new(sel.x1, sel.y1));
    complement.line_to(cpu_kurbo::Point::new(sel.x0, sel.y1));
    complement.close_path();
    for &el in bezpath_to_cpu(boundary).elements() {
        complement.push(el);
    }

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_aliasing_threshold(None);
    ctx.set_fill_rule(Fill::EvenOdd);
    ctx.set_paint(Color::from_rgba8(0, 0, 0, 255));
    ctx.fill_path(&complement);

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

fn color_to_cpu(c: Rgba8) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> cpu_kurbo::Point {
    cpu_kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> cpu_kurbo::Rect {
    cpu_kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> cpu_kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = cpu_kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
