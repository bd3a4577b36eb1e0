use catalog::ContentPoint;
use foundation::math::{Vec2, Vec3, YawPitch};

use crate::viewport::Viewport;

/// Smallest allowed perspective denominator.
const MIN_DEPTH_DENOMINATOR: f64 = 1e-6;

/// Current view: rotation (radians, unbounded) and zoom.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub rotation: YawPitch,
    pub zoom: f64,
}

impl ViewState {
    pub fn new(rotation: YawPitch, zoom: f64) -> Self {
        Self { rotation, zoom }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation: YawPitch::default(),
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Perspective focal constant `k` in `scale = k / (k + z)`.
    pub focal_length: f64,
    /// Fraction of the shorter viewport side used as the cube radius at zoom 1.
    pub radius_fraction: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            focal_length: 400.0,
            radius_fraction: 0.45,
        }
    }
}

/// A content point after rotation and perspective, recomputed every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transformed2D {
    pub screen: Vec2,
    /// Perspective scale, always positive.
    pub scale: f64,
    /// Rotated depth; positive faces the camera.
    pub depth: f64,
}

impl Transformed2D {
    pub fn is_front_facing(&self) -> bool {
        self.depth > 0.0
    }
}

/// Rotates and perspective-projects normalized content positions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projector {
    pub config: ProjectionConfig,
}

impl Projector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Screen center and radius for `view` on `viewport`.
    pub fn frame(&self, viewport: &Viewport, view: &ViewState) -> (Vec2, f64) {
        (
            viewport.center(),
            viewport.radius(self.config.radius_fraction, view.zoom),
        )
    }

    /// Projects a position in `[0, 1]^3`.
    ///
    /// The position is remapped to `[-1, 1]^3`, rotated with
    /// [`YawPitch::rotate`], then placed at `center + xy * radius * scale`.
    pub fn project_position(
        &self,
        position: Vec3,
        view: &ViewState,
        center: Vec2,
        radius: f64,
    ) -> Transformed2D {
        let rotated = view.rotation.rotate(position.unit_to_signed());
        let k = self.config.focal_length;
        let scale = k / (k + rotated.z).max(MIN_DEPTH_DENOMINATOR);
        let screen = center + Vec2::new(rotated.x, rotated.y).scale(radius * scale);
        Transformed2D {
            screen,
            scale,
            depth: rotated.z,
        }
    }

    pub fn project(
        &self,
        point: &ContentPoint,
        view: &ViewState,
        center: Vec2,
        radius: f64,
    ) -> Transformed2D {
        self.project_position(point.position, view, center, radius)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Projector, ViewState};
    use crate::viewport::Viewport;
    use foundation::math::{Vec2, Vec3, YawPitch};
    use std::f64::consts::PI;

    #[test]
    fn center_point_projects_to_center_with_unit_scale() {
        let p = Projector::default();
        let view = ViewState::default();
        let (center, radius) = p.frame(&Viewport::new(800.0, 600.0), &view);
        let t = p.project_position(Vec3::new(0.5, 0.5, 0.5), &view, center, radius);
        assert_eq!(t.screen, center);
        assert!((t.scale - 1.0).abs() < 1e-12);
        assert_eq!(t.depth, 0.0);
    }

    #[test]
    fn corner_projects_by_radius_at_identity() {
        let p = Projector::default();
        let view = ViewState::default();
        let center = Vec2::new(100.0, 100.0);
        let t = p.project_position(Vec3::new(1.0, 0.0, 0.5), &view, center, 50.0);
        assert!((t.screen.x - 150.0).abs() < 1e-9);
        assert!((t.screen.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn perspective_scale_depends_on_rotated_depth() {
        let p = Projector::default();
        let view = ViewState::default();
        let near = p.project_position(Vec3::new(0.5, 0.5, 1.0), &view, Vec2::ZERO, 1.0);
        let far = p.project_position(Vec3::new(0.5, 0.5, 0.0), &view, Vec2::ZERO, 1.0);
        assert_eq!(near.depth, 1.0);
        assert_eq!(far.depth, -1.0);
        assert!((near.scale - 400.0 / 401.0).abs() < 1e-12);
        assert!((far.scale - 400.0 / 399.0).abs() < 1e-12);
    }

    #[test]
    fn half_turn_yaw_flips_front_and_back() {
        let p = Projector::default();
        let view = ViewState::new(YawPitch::new(0.0, PI), 1.0);
        let t = p.project_position(Vec3::new(0.5, 0.5, 1.0), &view, Vec2::ZERO, 1.0);
        assert!(t.depth < 0.0);
        assert!(!t.is_front_facing());
    }

    #[test]
    fn zoom_scales_radius() {
        let p = Projector::default();
        let vp = Viewport::new(800.0, 600.0);
        let (_, r1) = p.frame(&vp, &ViewState::default());
        let (_, r2) = p.frame(&vp, &ViewState::new(YawPitch::default(), 2.0));
        assert_eq!(r2, 2.0 * r1);
    }

    #[test]
    fn huge_angles_stay_finite() {
        let p = Projector::default();
        let view = ViewState::new(YawPitch::new(1e15, -3e14), 1.0);
        let t = p.project_position(Vec3::new(0.9, 0.1, 0.3), &view, Vec2::ZERO, 100.0);
        assert!(t.screen.is_finite());
        assert!(t.scale > 0.0);
    }
}
