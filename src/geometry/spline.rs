//! Cardinal spline to cubic Bezier conversion.
//!
//! A cardinal spline passes through every control point; `tension` scales the tangent at each
//! point (`0` collapses the tangents and yields straight segments).

use kurbo::{BezPath, Point};

/// Append an open cardinal spline through `points` to `path`.
///
/// When `connect` is `true` the curve continues the current subpath with a line to its first
/// point (a no-op when the subpath already ends there); otherwise a new subpath is started.
pub(crate) fn append_cardinal(path: &mut BezPath, points: &[Point], tension: f64, connect: bool) {
    let Some(&first) = points.first() else {
        return;
    };
    if connect && path.elements().last().is_some() {
        if path_end(path) != Some(first) {
            path.line_to(first);
        }
    } else {
        path.move_to(first);
    }

    if tension == 0.0 {
        for &p in &points[1..] {
            path.line_to(p);
        }
        return;
    }

    let k = tension / 3.0;
    let n = points.len();
    for i in 0..n.saturating_sub(1) {
        let prev = points[i.saturating_sub(1)];
        let p0 = points[i];
        let p1 = points[i + 1];
        let next = points[(i + 2).min(n - 1)];
        let c1 = p0 + (p1 - prev) * k;
        let c2 = p1 - (next - p0) * k;
        path.curve_to(c1, c2, p1);
    }
}

/// Open cardinal spline through `points` as a standalone path.
pub fn cardinal_path(points: &[Point], tension: f64) -> BezPath {
    let mut path = BezPath::new();
    append_cardinal(&mut path, points, tension, false);
    path
}

fn path_end(path: &BezPath) -> Option<Point> {
    use kurbo::PathEl;

    match path.elements().last()? {
        PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
            Some(*p)
        }
        PathEl::ClosePath => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/spline.rs"]
mod tests;
