use std::ops::Range;

use starfall_engine::paint::Color;

/// Focal length of the pinhole projection, in logical pixels.
pub const FOCAL_LENGTH: f32 = 128.0;

/// How the surface is prepared at the start of each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BackgroundMode {
    /// Clear, then fill the whole surface with a solid color.
    Opaque(Color),
    /// Clear only; whatever is behind the surface shows through.
    Transparent,
}

/// Tunables for one [`RenderLoop`](crate::RenderLoop).
///
/// The two presets reproduce the two flavors of the effect: the standalone
/// background starfield and the pointer-reactive welcome screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldConfig {
    /// Number of stars; fixed for the lifetime of the loop.
    pub star_count: usize,

    /// Depth removed from every star per frame.
    pub depth_step: f32,

    pub background: BackgroundMode,

    /// Screen-space offset, in pixels, at a fully deflected pointer.
    pub parallax_strength: f32,

    /// Skip stars whose projected center falls outside the surface.
    pub cull_offscreen: bool,

    pub focal_length: f32,

    /// Base radius range, sampled once per star.
    pub star_size: Range<f32>,

    pub star_color: Color,

    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl StarfieldConfig {
    /// Pointer-reactive variant drawn behind the auth form and welcome screen.
    pub fn interactive() -> Self {
        Self {
            star_count: 300,
            depth_step: 1.6,
            background: BackgroundMode::Transparent,
            parallax_strength: 30.0,
            cull_offscreen: false,
            focal_length: FOCAL_LENGTH,
            star_size: 0.8..3.3,
            star_color: Color::from_rgba_u8(0, 200, 255, 0.6),
            seed: None,
        }
    }

    /// Plain background variant: opaque black, no parallax, off-screen culling.
    pub fn standalone() -> Self {
        Self {
            star_count: 200,
            depth_step: 2.0,
            background: BackgroundMode::Opaque(Color::black()),
            parallax_strength: 0.0,
            cull_offscreen: true,
            focal_length: FOCAL_LENGTH,
            star_size: 0.0..1.5,
            star_color: Color::from_hex(0x00eaff),
            seed: None,
        }
    }

    pub fn with_star_count(mut self, star_count: usize) -> Self {
        self.star_count = star_count;
        self
    }

    pub fn with_depth_step(mut self, depth_step: f32) -> Self {
        self.depth_step = depth_step;
        self
    }

    pub fn with_background(mut self, background: BackgroundMode) -> Self {
        self.background = background;
        self
    }

    pub fn with_parallax(mut self, strength: f32) -> Self {
        self.parallax_strength = strength;
        self
    }

    pub fn with_culling(mut self, cull: bool) -> Self {
        self.cull_offscreen = cull;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_only_where_the_variants_do() {
        let i = StarfieldConfig::interactive();
        let s = StarfieldConfig::standalone();

        assert_eq!((i.star_count, s.star_count), (300, 200));
        assert_eq!((i.depth_step, s.depth_step), (1.6, 2.0));
        assert_eq!(i.background, BackgroundMode::Transparent);
        assert_eq!(s.background, BackgroundMode::Opaque(Color::black()));
        assert_eq!((i.parallax_strength, s.parallax_strength), (30.0, 0.0));
        assert!(!i.cull_offscreen && s.cull_offscreen);
        assert_eq!(i.focal_length, s.focal_length);
    }

    #[test]
    fn builders_override_fields() {
        let c = StarfieldConfig::standalone()
            .with_star_count(12)
            .with_parallax(5.0)
            .with_culling(false)
            .with_seed(7);
        assert_eq!(c.star_count, 12);
        assert_eq!(c.parallax_strength, 5.0);
        assert!(!c.cull_offscreen);
        assert_eq!(c.seed, Some(7));
    }
}
