use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let src = [255, 0, 0, 255];
    assert_eq!(over([0, 0, 0, 255], src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn composite_pixel_inverts_eraser_and_keeps_color() {
    assert_eq!(composite_pixel([1, 2, 3, 77], 0), [1, 2, 3, 255]);
    assert_eq!(composite_pixel([1, 2, 3, 77], 255), [1, 2, 3, 0]);
    assert_eq!(composite_pixel([9, 8, 7, 0], 55), [9, 8, 7, 200]);
}

#[test]
fn composite_row_is_pixelwise() {
    let stamp = [10, 20, 30, 255, 40, 50, 60, 0];
    let eraser = [0, 200];
    let mut dst = [0u8; 8];
    composite_row(&mut dst, &stamp, &eraser);
    assert_eq!(dst, [10, 20, 30, 255, 40, 50, 60, 55]);
}

#[test]
fn layer_over_straight_keeps_color_under_transparent_layer() {
    let mut s = Surface::from_rgba8(2, 1, vec![50, 60, 70, 0, 50, 60, 70, 255]).unwrap();
    let layer = [0, 0, 0, 0, 255, 255, 255, 255];
    layer_over_straight_in_place(&mut s, &layer).unwrap();
    assert_eq!(s.pixel(0, 0), Some([50, 60, 70, 0]));
    assert_eq!(s.pixel(1, 0), Some([255, 255, 255, 255]));
}

#[test]
fn layer_over_straight_blends_partial_coverage() {
    let mut s = Surface::from_rgba8(1, 1, vec![0, 0, 0, 255]).unwrap();
    // White at half coverage, premultiplied.
    layer_over_straight_in_place(&mut s, &[128, 128, 128, 128]).unwrap();
    let px = s.pixel(0, 0).unwrap();
    assert_eq!(px[3], 255);
    assert!((127..=129).contains(&px[0]), "{px:?}");
}

#[test]
fn layer_length_mismatch_is_render_error() {
    let mut s = Surface::new(2, 2);
    assert!(layer_over_straight_in_place(&mut s, &[0; 4]).is_err());
    let mut a = AlphaSurface::new(2, 2);
    assert!(alpha_from_layer(&mut a, &[0; 4]).is_err());
}

#[test]
fn alpha_from_layer_reads_alpha_channel() {
    let mut a = AlphaSurface::new(2, 1);
    alpha_from_layer(&mut a, &[0, 0, 0, 255, 0, 0, 0, 64]).unwrap();
    assert_eq!(a.data(), &[255, 64]);
}
