use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::{mul_div255, premul, unpremul};
use crate::render::surface::{AlphaSurface, Surface};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Final output pixel: stamp color with the eraser turned into transparency.
///
/// No blending with the destination takes place.
pub fn composite_pixel(stamp: [u8; 4], eraser: u8) -> [u8; 4] {
    [stamp[0], stamp[1], stamp[2], 255 - eraser]
}

pub(crate) fn composite_row(dst: &mut [u8], stamp: &[u8], eraser: &[u8]) {
    for ((d, s), &e) in dst
        .chunks_exact_mut(4)
        .zip(stamp.chunks_exact(4))
        .zip(eraser)
    {
        d.copy_from_slice(&composite_pixel([s[0], s[1], s[2], s[3]], e));
    }
}

/// Composite a premultiplied layer over a straight-alpha surface in place.
pub(crate) fn layer_over_straight_in_place(dst: &mut Surface, layer: &[u8]) -> StampResult<()> {
    if dst.data().len() != layer.len() {
        return Err(StampError::render(
            "layer_over_straight_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.data_mut().chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = unpremul(over(premul([d[0], d[1], d[2], d[3]]), [s[0], s[1], s[2], s[3]]));
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Copy the alpha channel of a premultiplied layer into `dst`.
pub(crate) fn alpha_from_layer(dst: &mut AlphaSurface, layer: &[u8]) -> StampResult<()> {
    if dst.data().len() * 4 != layer.len() {
        return Err(StampError::render(
            "alpha_from_layer expects a layer matching the alpha surface",
        ));
    }
    for (d, s) in dst.data_mut().iter_mut().zip(layer.chunks_exact(4)) {
        *d = s[3];
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
