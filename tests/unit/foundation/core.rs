use super::*;

#[test]
fn new_rejects_degenerate_rectangles() {
    assert!(IntRect::new(0, 0, 0, 10).is_err());
    assert!(IntRect::new(0, 5, 10, 5).is_err());
    assert!(IntRect::new(3, 4, 2, 9).is_err());
    let r = IntRect::new(-2, 1, 3, 2).unwrap();
    assert_eq!((r.width(), r.height()), (5, 1));
}

#[test]
fn center_uses_half_extent_from_origin() {
    let r = IntRect::new(10, 20, 31, 40).unwrap();
    assert_eq!(r.center(), Point::new(20.5, 30.0));
}

#[test]
fn intersect_and_containment() {
    let a = IntRect::new(0, 0, 10, 10).unwrap();
    let b = IntRect::new(5, -5, 20, 5).unwrap();
    assert_eq!(a.intersect(b), Some(IntRect::new(5, 0, 10, 5).unwrap()));
    assert_eq!(a.intersect(IntRect::new(10, 0, 12, 3).unwrap()), None);
    assert!(a.contains_rect(IntRect::new(2, 2, 10, 10).unwrap()));
    assert!(!a.contains_rect(b));
    assert!(a.contains(9, 0));
    assert!(!a.contains(10, 0));
}

#[test]
fn split_rows_covers_rect_without_overlap() {
    let r = IntRect::new(3, 7, 40, 30).unwrap();
    let bands = r.split_rows(5);
    assert_eq!(bands.len(), 5);
    assert_eq!(bands[0].top, 7);
    assert_eq!(bands.last().unwrap().bottom, 30);
    for w in bands.windows(2) {
        assert_eq!(w[0].bottom, w[1].top);
    }
    let rows: u32 = bands.iter().map(|b| b.height()).sum();
    assert_eq!(rows, r.height());
    assert!(bands.iter().all(|b| b.left == 3 && b.right == 40));
}

#[test]
fn split_rows_zero_band_is_single_rows() {
    let r = IntRect::new(0, 0, 4, 3).unwrap();
    assert_eq!(r.split_rows(0).len(), 3);
}

#[test]
fn rgba_default_is_opaque_white() {
    assert_eq!(Rgba8::default().to_array(), [255, 255, 255, 255]);
}
