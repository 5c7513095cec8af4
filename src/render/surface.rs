use crate::foundation::core::IntRect;
use crate::foundation::error::{StampError, StampResult};

/// Straight-alpha RGBA8 pixel buffer, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap existing RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> StampResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(StampError::validation(format!(
                "rgba8 buffer length {} does not match {width}x{height} (expected {expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whole-surface rectangle.
    pub fn bounds(&self) -> IntRect {
        IntRect::from_size(self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the surface and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`; `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite pixel `(x, y)`; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, px: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&px);
        }
    }

    /// Bytes of row `y` between columns `[left, right)`.
    pub(crate) fn row(&self, y: i32, left: i32, right: i32) -> &[u8] {
        let start = self.row_offset(y, left);
        &self.data[start..start + (right - left) as usize * 4]
    }

    pub(crate) fn row_mut(&mut self, y: i32, left: i32, right: i32) -> &mut [u8] {
        let start = self.row_offset(y, left);
        &mut self.data[start..start + (right - left) as usize * 4]
    }

    /// Reallocate when the size changed; returns `true` when it did.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        *self = Self::new(width, height);
        true
    }

    /// Set every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copy the `rect` region of `src` to the same location in `self`.
    ///
    /// `rect` must lie inside both surfaces.
    pub fn copy_rect_from(&mut self, src: &Surface, rect: IntRect) {
        for y in rect.top..rect.bottom {
            self.row_mut(y, rect.left, rect.right)
                .copy_from_slice(src.row(y, rect.left, rect.right));
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    fn row_offset(&self, y: i32, x: i32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Single-channel 8-bit surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaSurface {
    /// Zero-filled surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes, one per pixel.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Value at `(x, y)`; `None` outside the surface.
    pub fn value(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    pub(crate) fn row(&self, y: i32, left: i32, right: i32) -> &[u8] {
        let start = y as usize * self.width as usize + left as usize;
        &self.data[start..start + (right - left) as usize]
    }

    /// Reallocate when the size changed; returns `true` when it did.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        *self = Self::new(width, height);
        true
    }

    /// Set every value to 0.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
