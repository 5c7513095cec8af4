use crate::foundation::error::{StampError, StampResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Integer pixel rectangle with exclusive `right`/`bottom` bounds.
///
/// Used both for the processed selection and for render tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IntRect {
    /// Inclusive left bound.
    pub left: i32,
    /// Inclusive top bound.
    pub top: i32,
    /// Exclusive right bound.
    pub right: i32,
    /// Exclusive bottom bound.
    pub bottom: i32,
}

impl IntRect {
    /// Create a validated rectangle with `width >= 1` and `height >= 1`.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> StampResult<Self> {
        if right <= left || bottom <= top {
            return Err(StampError::validation(format!(
                "rectangle must be at least 1x1, got ({left},{top})-({right},{bottom})"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Rectangle covering a whole `width x height` buffer.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: i32::try_from(width).unwrap_or(i32::MAX),
            bottom: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }

    /// Width in pixels (0 for empty rectangles).
    pub fn width(self) -> u32 {
        self.right.saturating_sub(self.left).max(0) as u32
    }

    /// Height in pixels (0 for empty rectangles).
    pub fn height(self) -> u32 {
        self.bottom.saturating_sub(self.top).max(0) as u32
    }

    /// Return `true` when the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Geometric center in pixel space.
    pub fn center(self) -> Point {
        Point::new(
            f64::from(self.right - self.left) / 2.0 + f64::from(self.left),
            f64::from(self.bottom - self.top) / 2.0 + f64::from(self.top),
        )
    }

    /// Return `true` when `other` lies entirely inside `self`.
    pub fn contains_rect(self, other: IntRect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Return `true` when pixel `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: i32, y: i32) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }

    /// Overlap of two rectangles, `None` when they do not share a pixel.
    pub fn intersect(self, other: IntRect) -> Option<IntRect> {
        let r = IntRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        (!r.is_empty()).then_some(r)
    }

    /// Split into disjoint horizontal bands of at most `band_height` rows.
    ///
    /// A `band_height` of 0 is treated as 1.
    pub fn split_rows(self, band_height: u32) -> Vec<IntRect> {
        if self.is_empty() {
            return Vec::new();
        }
        let step = i32::try_from(band_height.max(1)).unwrap_or(i32::MAX);
        let mut out = Vec::with_capacity(self.height().div_ceil(band_height.max(1)) as usize);
        let mut top = self.top;
        while top < self.bottom {
            let bottom = top.saturating_add(step).min(self.bottom);
            out.push(IntRect {
                left: self.left,
                top,
                right: self.right,
                bottom,
            });
            top = bottom;
        }
        out
    }

    /// Same rectangle as a floating-point `kurbo` rect.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// The light gray used for the perforation outline.
    pub const LIGHT_GRAY: Self = Self::new(211, 211, 211, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
