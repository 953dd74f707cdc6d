use super::{Rect, Vec2};

/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis for converting logical px
/// positions to NDC. The starfield uses it as the drawable surface extent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Center point of the viewport.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Full-surface rectangle anchored at the origin.
    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Closed-interval containment: `[0, width] × [0, height]`.
    #[inline]
    pub fn contains_inclusive(self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_extent() {
        assert_eq!(Viewport::new(800.0, 600.0).center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn inclusive_containment_accepts_edges() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(vp.contains_inclusive(Vec2::new(0.0, 0.0)));
        assert!(vp.contains_inclusive(Vec2::new(800.0, 600.0)));
        assert!(!vp.contains_inclusive(Vec2::new(800.5, 10.0)));
        assert!(!vp.contains_inclusive(Vec2::new(10.0, -0.5)));
    }

    #[test]
    fn zero_extent_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}
