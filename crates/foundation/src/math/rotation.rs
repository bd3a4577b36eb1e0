//! Two-axis view rotation.
//!
//! Every consumer that needs a rotated position (projection, depth ordering,
//! hit testing) must go through [`YawPitch::rotate`]. Projection and depth
//! sorting disagreeing by even a sign produces visible seams.

use super::Vec3;

/// Rotation angles in radians.
///
/// Angles are unbounded; the trig functions wrap them implicitly.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct YawPitch {
    /// Rotation about the X axis (pitch), applied second.
    pub x: f64,
    /// Rotation about the Y axis (yaw), applied first.
    pub y: f64,
}

impl YawPitch {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates `v` about Y by `self.y`, then about X by `self.x`.
    #[inline]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let (sin_y, cos_y) = self.y.sin_cos();
        let (sin_x, cos_x) = self.x.sin_cos();

        // Yaw.
        let x1 = v.x * cos_y - v.z * sin_y;
        let z1 = v.x * sin_y + v.z * cos_y;

        // Pitch.
        let y2 = v.y * cos_x - z1 * sin_x;
        let z2 = v.y * sin_x + z1 * cos_x;

        Vec3::new(x1, y2, z2)
    }

    /// Rotated depth only. Identical to `self.rotate(v).z`.
    #[inline]
    pub fn rotated_depth(self, v: Vec3) -> f64 {
        self.rotate(v).z
    }
}
