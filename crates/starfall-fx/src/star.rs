use std::ops::Range;

use rand::Rng;
use starfall_engine::coords::{Vec2, Viewport};

/// A point particle with a fixed planar offset and a recycling depth.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    /// Horizontal offset from the surface center.
    pub x: f32,
    /// Vertical offset from the surface center.
    pub y: f32,
    /// Depth; always in `(0, width]` after the first advance.
    pub z: f32,
    /// Base radius, scaled by the projection factor when painted.
    pub size: f32,
}

impl Star {
    /// Samples a star uniformly over the centered viewport extent.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, size: &Range<f32>) -> Self {
        let w = viewport.width;
        let h = viewport.height;
        Self {
            x: rng.random::<f32>() * w - w / 2.0,
            y: rng.random::<f32>() * h - h / 2.0,
            z: rng.random::<f32>() * w,
            size: size.start + rng.random::<f32>() * (size.end - size.start),
        }
    }

    /// Moves the star toward the viewer; a star that reaches the viewer
    /// reappears at the far plane (`far = surface width`).
    #[inline]
    pub fn advance(&mut self, step: f32, far: f32) {
        self.z -= step;
        if self.z <= 0.0 {
            self.z = far;
        }
    }

    /// Pinhole projection factor `focal / z`.
    #[inline]
    pub fn scale(&self, focal_length: f32) -> f32 {
        focal_length / self.z
    }

    /// Screen position for projection factor `k` around `center`.
    #[inline]
    pub fn project(&self, k: f32, center: Vec2) -> Vec2 {
        Vec2::new(self.x * k + center.x, self.y * k + center.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sampling_stays_inside_centered_extent() {
        let mut rng = StdRng::seed_from_u64(1);
        let vp = Viewport::new(800.0, 600.0);
        for _ in 0..1000 {
            let s = Star::sample(&mut rng, vp, &(0.8..3.3));
            assert!((-400.0..400.0).contains(&s.x));
            assert!((-300.0..300.0).contains(&s.y));
            assert!((0.0..800.0).contains(&s.z));
            assert!(s.size >= 0.8 && s.size <= 3.3);
        }
    }

    #[test]
    fn zero_viewport_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = Star::sample(&mut rng, Viewport::new(0.0, 0.0), &(0.0..0.0));
        assert_eq!((s.x, s.y, s.z, s.size), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn advance_wraps_at_or_below_zero() {
        let mut s = Star { x: 0.0, y: 0.0, z: 2.0, size: 1.0 };
        s.advance(2.0, 800.0);
        assert_eq!(s.z, 800.0);

        let mut s = Star { x: 0.0, y: 0.0, z: 5.0, size: 1.0 };
        s.advance(2.0, 800.0);
        assert_eq!(s.z, 3.0);
    }

    #[test]
    fn projection_scales_offset_around_center() {
        let s = Star { x: 100.0, y: 50.0, z: 800.0, size: 1.0 };
        let k = s.scale(128.0);
        assert!((k - 0.16).abs() < 1e-6);
        let p = s.project(k, Vec2::new(400.0, 300.0));
        assert!((p.x - 416.0).abs() < 1e-4);
        assert!((p.y - 308.0).abs() < 1e-4);
    }
}
