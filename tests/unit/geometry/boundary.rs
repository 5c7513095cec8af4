use super::*;
use kurbo::Shape;

fn selection() -> IntRect {
    IntRect::new(0, 0, 200, 160).unwrap()
}

fn layout(scale: f64, h: u32, v: u32, style: PerforationStyle) -> StampLayout {
    StampLayout::compute(selection(), scale, h, v, Vec2::ZERO, style)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn derived_quantities_follow_scale() {
    let l = layout(1.0, 5, 4, PerforationStyle::Curved);
    assert!(close(l.amplitude, 4.0));
    assert!(close(l.half_wavelength, 5.4));
    assert!(close(l.corner_offset, 2.0));
    assert_eq!((l.hor_perforations, l.ver_perforations), (10, 8));
    assert!(close(l.width, 5.4 * 10.0 + 4.0 + 5.4));
    assert!(close(l.height, 5.4 * 8.0 + 4.0 + 5.4));
    assert!(close(l.offset.x, 100.0 - l.width / 2.0));
    assert!(close(l.offset.y, 80.0 - l.height / 2.0));
    assert_eq!(l.tension, 0.75);
    assert_eq!(layout(1.0, 5, 4, PerforationStyle::Straight).tension, 0.0);
}

#[test]
fn edge_lengths_and_shared_corners() {
    let b = layout(1.5, 6, 3, PerforationStyle::Straight).boundary();
    assert_eq!(b.top.len(), 14);
    assert_eq!(b.bottom.len(), 14);
    assert_eq!(b.left.len(), 8);
    assert_eq!(b.right.len(), 8);

    assert_eq!(b.top.first(), b.left.first());
    assert_eq!(b.top.last(), b.right.first());
    assert_eq!(b.right.last(), b.bottom.last());
    assert_eq!(b.bottom.first(), b.left.last());
}

#[test]
fn corners_are_shared_exactly_across_scales_and_counts() {
    let sel = IntRect::new(3, 7, 1203, 907).unwrap();
    for step in 2..=40 {
        let scale = f64::from(step) * 0.25;
        for h in 2..=30 {
            for v in [2, 7, 13] {
                let l = StampLayout::compute(
                    sel,
                    scale,
                    h,
                    v,
                    Vec2::new(0.3, -0.6),
                    PerforationStyle::Curved,
                );
                let b = l.boundary();
                let ctx = format!("scale {scale}, counts {h}x{v}");
                assert_eq!(b.top.first(), b.left.first(), "{ctx}");
                assert_eq!(b.top.last(), b.right.first(), "{ctx}");
                assert_eq!(b.right.last(), b.bottom.last(), "{ctx}");
                assert_eq!(b.bottom.first(), b.left.last(), "{ctx}");

                let total = b.top.len() + b.right.len() + b.bottom.len() + b.left.len();
                assert_eq!(b.outline().len(), total - 4, "{ctx}");
            }
        }
    }
}

#[test]
fn top_edge_alternates_notch_and_tip() {
    let l = layout(2.0, 3, 3, PerforationStyle::Straight);
    let b = l.boundary();
    for (i, p) in b.top.iter().enumerate().skip(1).take(b.top.len() - 2) {
        let depth = p.y - l.offset.y;
        let expected = if i % 2 == 1 { l.amplitude } else { 0.0 };
        assert!(close(depth, expected), "point {i}: depth {depth}");
    }
    let xs: Vec<f64> = b.top.iter().map(|p| p.x).collect();
    assert!(xs.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn outline_is_closed_and_deduplicated() {
    let b = layout(1.0, 5, 4, PerforationStyle::Straight).boundary();
    let outline = b.outline();
    let total = b.top.len() + b.right.len() + b.bottom.len() + b.left.len();
    assert_eq!(outline.len(), total - 4);
    assert_eq!(outline[0], b.top[0]);
    for w in outline.windows(2) {
        assert_ne!(w[0], w[1]);
    }
}

#[test]
fn outline_winds_clockwise_in_screen_space() {
    let outline = layout(1.0, 4, 4, PerforationStyle::Straight)
        .boundary()
        .outline();
    let mut twice_area = 0.0;
    for i in 0..outline.len() {
        let p = outline[i];
        let q = outline[(i + 1) % outline.len()];
        twice_area += p.x * q.y - q.x * p.y;
    }
    // Positive shoelace area with y pointing down is a clockwise walk on screen.
    assert!(twice_area > 0.0, "area {twice_area}");
}

#[test]
fn straight_path_bbox_matches_layout_bounds() {
    let l = layout(3.0, 7, 5, PerforationStyle::Straight);
    let bb = l.boundary().path().bounding_box();
    let expect = l.bounds();
    assert!(close(bb.x0, expect.x0) && close(bb.x1, expect.x1));
    assert!(close(bb.y0, expect.y0) && close(bb.y1, expect.y1));
}

#[test]
fn curved_path_bbox_stays_near_layout_bounds() {
    let l = layout(1.0, 9, 9, PerforationStyle::Curved);
    let bb = l.boundary().path().bounding_box();
    let expect = l.bounds();
    let tol = l.amplitude;
    assert!((bb.x0 - expect.x0).abs() <= tol && (bb.x1 - expect.x1).abs() <= tol);
    assert!((bb.y0 - expect.y0).abs() <= tol && (bb.y1 - expect.y1).abs() <= tol);
}

#[test]
fn edge_curves_hold_four_subpaths() {
    let path = layout(1.0, 2, 2, PerforationStyle::Curved)
        .boundary()
        .edge_curves();
    let moves = path
        .elements()
        .iter()
        .filter(|e| matches!(e, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 4);
}

#[test]
fn compute_boundary_matches_layout() {
    let sel = selection();
    let a = compute_boundary(
        sel,
        1.25,
        8,
        6,
        Vec2::new(0.3, -0.2),
        PerforationStyle::Curved,
    );
    let b = StampLayout::compute(
        sel,
        1.25,
        8,
        6,
        Vec2::new(0.3, -0.2),
        PerforationStyle::Curved,
    )
    .boundary();
    assert_eq!(a, b);
}
