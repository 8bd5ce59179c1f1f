pub use kurbo::{Point, Rect, Vec2};

/// A point or span on the scene's virtual clock, in milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn saturating_add(self, other: Millis) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Millis) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Scale a duration by a non-negative factor, rounding to the nearest millisecond.
    pub fn scaled(self, factor: f64) -> Self {
        let v = (self.0 as f64) * factor.max(0.0);
        Self(v.round() as u64)
    }

    pub fn as_secs_f64(self) -> f64 {
        (self.0 as f64) / 1000.0
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A 3D pose expressed the way the stage composes CSS-like transforms:
/// translate, then rotate X/Y/Z (degrees), then uniform scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Pose3 {
    pub translate: [f64; 3],
    pub rotate_deg: [f64; 3],
    pub scale: f64,
}

impl Default for Pose3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose3 {
    pub const IDENTITY: Self = Self {
        translate: [0.0, 0.0, 0.0],
        rotate_deg: [0.0, 0.0, 0.0],
        scale: 1.0,
    };

    pub fn translated(mut self, x: f64, y: f64, z: f64) -> Self {
        self.translate = [x, y, z];
        self
    }

    pub fn rotated(mut self, x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        self.rotate_deg = [x_deg, y_deg, z_deg];
        self
    }

    pub fn scaled(mut self, s: f64) -> Self {
        self.scale = s;
        self
    }

    /// Planar projection of the pose (drops Z translation and X/Y rotation).
    pub fn to_affine_2d(self) -> kurbo::Affine {
        kurbo::Affine::translate(Vec2::new(self.translate[0], self.translate[1]))
            * kurbo::Affine::rotate(self.rotate_deg[2].to_radians())
            * kurbo::Affine::scale(self.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
