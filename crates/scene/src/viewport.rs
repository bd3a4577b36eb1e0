use foundation::math::Vec2;

/// Pixel dimensions of the render surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Screen radius of the unit cube: `min(width, height) * fraction * zoom`.
    pub fn radius(&self, fraction: f64, zoom: f64) -> f64 {
        self.width.min(self.height) * fraction * zoom
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;
    use foundation::math::Vec2;

    #[test]
    fn center_and_radius_follow_shorter_side() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.center(), Vec2::new(400.0, 300.0));
        assert_eq!(v.radius(0.45, 1.0), 270.0);
        assert_eq!(v.radius(0.45, 2.0), 540.0);
    }

    #[test]
    fn rejects_degenerate_surfaces() {
        assert!(Viewport::new(1.0, 1.0).is_valid());
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(f64::NAN, 600.0).is_valid());
        assert!(!Viewport::new(800.0, f64::INFINITY).is_valid());
    }
}
