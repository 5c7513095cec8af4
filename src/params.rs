use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{StampError, StampResult};

/// Shape of the perforation teeth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerforationStyle {
    /// Rounded teeth (curve tension 0.75).
    #[default]
    Curved,
    /// Zig-zag teeth (curve tension 0).
    Straight,
}

impl PerforationStyle {
    /// Curve tension handed to the spline builder.
    pub fn tension(self) -> f64 {
        match self {
            Self::Curved => 0.75,
            Self::Straight => 0.0,
        }
    }
}

/// Parameter set for one render pass.
///
/// The effect treats this as pre-validated: [`StampParams::validate`] is the host-side check and
/// is never called from the rebuild or render steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StampParams {
    /// Overall size multiplier, `[0.5, 10]`.
    pub scale: f64,
    /// Perforations along the top/bottom edges, `[2, 200]`.
    pub horizontal_perforations: u32,
    /// Perforations along the left/right edges, `[2, 200]`.
    pub vertical_perforations: u32,
    /// Tooth shape.
    pub perforation_style: PerforationStyle,
    /// Normalized placement inside the selection, each axis in `[-1, 1]`.
    pub position: Vec2,
    /// Draw the light perforation outline.
    pub outline_enabled: bool,
    /// Draw the mat band.
    pub mat_enabled: bool,
    /// Mat band size before scaling, `[5, 20]`.
    pub mat_size: u32,
    /// Mat band color (straight alpha).
    pub mat_color: Rgba8,
}

impl Default for StampParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            horizontal_perforations: 13,
            vertical_perforations: 13,
            perforation_style: PerforationStyle::Curved,
            position: Vec2::ZERO,
            outline_enabled: false,
            mat_enabled: false,
            mat_size: 12,
            mat_color: Rgba8::WHITE,
        }
    }
}

impl StampParams {
    /// Valid range for [`StampParams::scale`].
    pub const SCALE_RANGE: (f64, f64) = (0.5, 10.0);
    /// Valid range for the perforation counts.
    pub const PERFORATION_RANGE: (u32, u32) = (2, 200);
    /// Valid range for [`StampParams::mat_size`].
    pub const MAT_SIZE_RANGE: (u32, u32) = (5, 20);

    /// Parse a parameter set from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> StampResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| StampError::validation(format!("parameter json: {e}")))
    }

    /// Check every field against its documented bounds.
    ///
    /// Mat size is only checked while the mat is enabled; it has no effect otherwise.
    pub fn validate(&self) -> StampResult<()> {
        let (lo, hi) = Self::SCALE_RANGE;
        if !self.scale.is_finite() || self.scale < lo || self.scale > hi {
            return Err(StampError::validation(format!(
                "scale must be in [{lo}, {hi}], got {}",
                self.scale
            )));
        }

        let (lo, hi) = Self::PERFORATION_RANGE;
        for (name, v) in [
            ("horizontal_perforations", self.horizontal_perforations),
            ("vertical_perforations", self.vertical_perforations),
        ] {
            if !(lo..=hi).contains(&v) {
                return Err(StampError::validation(format!(
                    "{name} must be in [{lo}, {hi}], got {v}"
                )));
            }
        }

        for (name, v) in [("position.x", self.position.x), ("position.y", self.position.y)] {
            if !v.is_finite() || !(-1.0..=1.0).contains(&v) {
                return Err(StampError::validation(format!(
                    "{name} must be in [-1, 1], got {v}"
                )));
            }
        }

        if self.mat_enabled {
            let (lo, hi) = Self::MAT_SIZE_RANGE;
            if !(lo..=hi).contains(&self.mat_size) {
                return Err(StampError::validation(format!(
                    "mat_size must be in [{lo}, {hi}], got {}",
                    self.mat_size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/params.rs"]
mod tests;
