//! Perforated stamp outline.
//!
//! Each edge alternates an inward notch (depth `amplitude`) and an outward tip (on the edge line)
//! every half wavelength, bracketed by two corner points pulled in by `corner_offset` on both
//! axes. Edges are generated left-to-right / top-to-bottom; the closed outline walks them
//! clockwise as top, right, reversed bottom, reversed left.

use kurbo::{BezPath, Point, Rect, Vec2};

use crate::foundation::core::IntRect;
use crate::geometry::spline::append_cardinal;
use crate::params::{PerforationStyle, StampParams};

/// Derived stamp geometry for one selection and parameter set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StampLayout {
    /// Perforation depth.
    pub amplitude: f64,
    /// Distance between a notch and the next tip.
    pub half_wavelength: f64,
    /// Inset of the corner points on both axes.
    pub corner_offset: f64,
    /// Notch/tip count along the horizontal edges (user count doubled).
    pub hor_perforations: u32,
    /// Notch/tip count along the vertical edges (user count doubled).
    pub ver_perforations: u32,
    /// Outer stamp width.
    pub width: f64,
    /// Outer stamp height.
    pub height: f64,
    /// Top-left corner of the stamp.
    pub offset: Point,
    /// Spline tension for the edges.
    pub tension: f64,
}

impl StampLayout {
    /// Compute the layout from raw parameters.
    ///
    /// Inputs are assumed pre-validated. A stamp larger than the selection is placed outside
    /// of it without clamping.
    pub fn compute(
        selection: IntRect,
        scale: f64,
        hor_perf_count: u32,
        ver_perf_count: u32,
        position: Vec2,
        style: PerforationStyle,
    ) -> Self {
        let amplitude = 4.0 * scale;
        let half_wavelength = 5.4 * scale;
        let corner_offset = amplitude / 2.0;
        let hor_perforations = hor_perf_count * 2;
        let ver_perforations = ver_perf_count * 2;
        let width = half_wavelength * f64::from(hor_perforations) + amplitude + half_wavelength;
        let height = half_wavelength * f64::from(ver_perforations) + amplitude + half_wavelength;

        let center = selection.center();
        let sel_w = f64::from(selection.width());
        let sel_h = f64::from(selection.height());
        let offset = Point::new(
            center.x - width / 2.0 + position.x * (sel_w / 2.0 - width / 2.0 - 1.0),
            center.y - height / 2.0 + position.y * (sel_h / 2.0 - height / 2.0 - 1.0),
        );

        Self {
            amplitude,
            half_wavelength,
            corner_offset,
            hor_perforations,
            ver_perforations,
            width,
            height,
            offset,
            tension: style.tension(),
        }
    }

    /// Compute the layout from a parameter set.
    pub fn from_params(selection: IntRect, params: &StampParams) -> Self {
        Self::compute(
            selection,
            params.scale,
            params.horizontal_perforations,
            params.vertical_perforations,
            params.position,
            params.perforation_style,
        )
    }

    /// Outer bounding box of the stamp (tips included).
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.offset, (self.width, self.height))
    }

    /// Build the four edge point sequences.
    pub fn boundary(&self) -> Boundary {
        let Point { x: ox, y: oy } = self.offset;
        let (a, h, c) = (self.amplitude, self.half_wavelength, self.corner_offset);
        let (w, ht) = (self.width, self.height);

        // Positions along an edge, measured from the first corner point.
        let along = |i: u32| f64::from(i) * h + c;

        let edge = |count: u32, corner_a: Point, corner_b: Point, at: &dyn Fn(u32) -> Point| {
            let mut pts = Vec::with_capacity(count as usize + 2);
            pts.push(corner_a);
            pts.extend((1..=count).map(at));
            pts.push(corner_b);
            pts
        };

        // Each corner is shared by two edges and must be bit-identical in both.
        let tl = Point::new(ox + c, oy + c);
        let tr = Point::new(ox + w - c, oy + c);
        let bl = Point::new(ox + c, oy + ht - c);
        let br = Point::new(ox + w - c, oy + ht - c);

        let nh = self.hor_perforations;
        let nv = self.ver_perforations;
        let top = edge(nh, tl, tr, &|i: u32| {
            Point::new(ox + along(i), if i % 2 == 1 { oy + a } else { oy })
        });
        let bottom = edge(nh, bl, br, &|i: u32| {
            Point::new(ox + along(i), if i % 2 == 1 { oy + ht } else { oy + ht - a })
        });
        let left = edge(nv, tl, bl, &|i: u32| {
            Point::new(if i % 2 == 1 { ox } else { ox + a }, oy + along(i))
        });
        let right = edge(nv, tr, br, &|i: u32| {
            Point::new(if i % 2 == 1 { ox + w - a } else { ox + w }, oy + along(i))
        });

        Boundary {
            top,
            right,
            bottom,
            left,
            tension: self.tension,
        }
    }
}

/// Four edge point sequences of the stamp, each in generation order.
///
/// `top`/`bottom` run left to right, `left`/`right` run top to bottom. Adjacent edges share their
/// corner points exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    /// Top edge, left to right.
    pub top: Vec<Point>,
    /// Right edge, top to bottom.
    pub right: Vec<Point>,
    /// Bottom edge, left to right.
    pub bottom: Vec<Point>,
    /// Left edge, top to bottom.
    pub left: Vec<Point>,
    /// Spline tension used when turning the edges into curves.
    pub tension: f64,
}

impl Boundary {
    /// Edges in clockwise walking order (bottom and left reversed).
    pub fn clockwise_edges(&self) -> [Vec<Point>; 4] {
        let mut bottom = self.bottom.clone();
        bottom.reverse();
        let mut left = self.left.clone();
        left.reverse();
        [self.top.clone(), self.right.clone(), bottom, left]
    }

    /// Closed control polygon, shared corners listed once, first point not repeated.
    pub fn outline(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(
            self.top.len() + self.right.len() + self.bottom.len() + self.left.len(),
        );
        for edge in self.clockwise_edges() {
            for p in edge {
                if out.last() != Some(&p) {
                    out.push(p);
                }
            }
        }
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }

    /// Closed path through the four edge curves, usable as a fill or clip boundary.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        for (i, edge) in self.clockwise_edges().iter().enumerate() {
            append_cardinal(&mut path, edge, self.tension, i > 0);
        }
        path.close_path();
        path
    }

    /// The four edge curves as separate open subpaths.
    pub fn edge_curves(&self) -> BezPath {
        let mut path = BezPath::new();
        for edge in [&self.top, &self.bottom, &self.left, &self.right] {
            append_cardinal(&mut path, edge, self.tension, false);
        }
        path
    }
}

/// Compute the four edge sequences for a selection and parameter values.
pub fn compute_boundary(
    selection: IntRect,
    scale: f64,
    hor_perf_count: u32,
    ver_perf_count: u32,
    position: Vec2,
    style: PerforationStyle,
) -> Boundary {
    StampLayout::compute(
        selection,
        scale,
        hor_perf_count,
        ver_perf_count,
        position,
        style,
    )
    .boundary()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/boundary.rs"]
mod tests;
