use super::*;

#[test]
fn from_rgba8_checks_length() {
    assert!(Surface::from_rgba8(2, 2, vec![0; 15]).is_err());
    let s = Surface::from_rgba8(2, 2, vec![7; 16]).unwrap();
    assert_eq!(s.pixel(1, 1), Some([7, 7, 7, 7]));
}

#[test]
fn pixel_access_is_bounds_checked() {
    let mut s = Surface::new(3, 2);
    s.set_pixel(2, 1, [1, 2, 3, 4]);
    s.set_pixel(3, 0, [9, 9, 9, 9]);
    s.set_pixel(-1, 0, [9, 9, 9, 9]);
    assert_eq!(s.pixel(2, 1), Some([1, 2, 3, 4]));
    assert_eq!(s.pixel(3, 1), None);
    assert_eq!(s.data().iter().filter(|&&b| b == 9).count(), 0);
}

#[test]
fn ensure_size_reallocates_only_on_change() {
    let mut s = Surface::new(4, 4);
    s.set_pixel(0, 0, [5, 5, 5, 5]);
    assert!(!s.ensure_size(4, 4));
    assert_eq!(s.pixel(0, 0), Some([5, 5, 5, 5]));
    assert!(s.ensure_size(5, 3));
    assert_eq!((s.width(), s.height()), (5, 3));
    assert!(s.data().iter().all(|&b| b == 0));

    let mut a = AlphaSurface::new(2, 2);
    assert!(!a.ensure_size(2, 2));
    assert!(a.ensure_size(3, 1));
    assert_eq!(a.data().len(), 3);
}

#[test]
fn copy_rect_only_touches_region() {
    let src = Surface::from_rgba8(4, 3, vec![200; 48]).unwrap();
    let mut dst = Surface::new(4, 3);
    dst.copy_rect_from(&src, IntRect::new(1, 1, 3, 3).unwrap());
    for y in 0..3 {
        for x in 0..4 {
            let inside = (1..3).contains(&x) && (1..3).contains(&y);
            let expect = if inside { [200; 4] } else { [0; 4] };
            assert_eq!(dst.pixel(x, y), Some(expect), "({x},{y})");
        }
    }
}

#[test]
fn alpha_value_lookup() {
    let mut a = AlphaSurface::new(2, 2);
    a.data_mut()[3] = 255;
    assert_eq!(a.value(1, 1), Some(255));
    assert_eq!(a.value(0, 1), Some(0));
    assert_eq!(a.value(2, 0), None);
    assert_eq!(a.row(1, 0, 2), &[0, 255]);
}
