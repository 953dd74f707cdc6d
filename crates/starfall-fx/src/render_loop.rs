use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starfall_engine::coords::{Vec2, Viewport};

use crate::config::{BackgroundMode, StarfieldConfig};
use crate::effects::TiltEffect;
use crate::motion::{HueCycle, Rotation};
use crate::pointer::PointerState;
use crate::star::Star;
use crate::surface::{BoundElements, DrawSurface};

/// Whether the caller should schedule another frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

/// All animated state for one mounted view.
///
/// Created active by [`RenderLoop::activate`]; [`RenderLoop::deactivate`]
/// stops it for good. A remount builds a fresh loop.
pub struct RenderLoop<R = StdRng> {
    config: StarfieldConfig,
    viewport: Viewport,
    stars: Vec<Star>,
    pointer: PointerState,
    rotation: Rotation,
    hue: HueCycle,
    active: bool,
    frames: u64,
    rng: R,
}

impl RenderLoop<StdRng> {
    /// Binds to `viewport` and samples the star set. Uses `config.seed` when
    /// present, OS entropy otherwise.
    pub fn activate(config: StarfieldConfig, viewport: Viewport) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, viewport, rng)
    }
}

impl<R: Rng> RenderLoop<R> {
    pub fn with_rng(config: StarfieldConfig, viewport: Viewport, mut rng: R) -> Self {
        let stars = (0..config.star_count)
            .map(|_| Star::sample(&mut rng, viewport, &config.star_size))
            .collect();

        log::info!(
            "starfield activated: {} stars on {}x{}",
            config.star_count,
            viewport.width,
            viewport.height
        );

        Self {
            config,
            viewport,
            stars,
            pointer: PointerState::default(),
            rotation: Rotation::default(),
            hue: HueCycle::default(),
            active: true,
            frames: 0,
            rng,
        }
    }

    /// Viewport-relative pixel position. Ignored once deactivated.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if !self.active {
            return;
        }
        self.pointer = PointerState::from_viewport_position(x, y, self.viewport);
    }

    /// Resynchronizes the surface size. Stars keep their sampled offsets and
    /// depths; only recycled stars pick up the new far plane.
    pub fn resized(&mut self, viewport: Viewport) {
        if !self.active {
            return;
        }
        log::debug!("starfield resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn deactivate(&mut self) {
        if self.active {
            log::info!("starfield deactivated after {} frames", self.frames);
        }
        self.active = false;
    }

    /// Paints one frame and pushes descriptors to the bound elements.
    pub fn frame<S>(&mut self, now_ms: f64, surface: &mut S, elements: BoundElements<'_>) -> FrameStatus
    where
        S: DrawSurface + ?Sized,
    {
        if !self.active {
            return FrameStatus::Stopped;
        }

        surface.clear();
        if let BackgroundMode::Opaque(color) = self.config.background {
            surface.fill_rect(self.viewport.bounds(), color);
        }

        self.paint_stars(surface);

        self.rotation.advance(&mut self.rng);
        self.hue.advance(&mut self.rng);

        let color = self.hue.color();
        if let Some(logo) = elements.logo {
            let effect = TiltEffect::LOGO;
            let transform = effect.transform(self.pointer, self.rotation.angles, now_ms);
            logo.apply(&transform, &effect.style(color));
        }
        if let Some(caption) = elements.caption {
            let effect = TiltEffect::CAPTION;
            let transform = effect.transform(self.pointer, self.rotation.angles, now_ms);
            caption.apply(&transform, &effect.style(color));
        }

        self.frames += 1;
        log::trace!("frame {} hue {:.1}", self.frames, self.hue.hue());

        FrameStatus::Continue
    }

    fn paint_stars<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        let vp = self.viewport;
        let center = vp.center();
        let parallax = Vec2::new(
            self.pointer.x * self.config.parallax_strength,
            self.pointer.y * self.config.parallax_strength,
        );

        for star in &mut self.stars {
            star.advance(self.config.depth_step, vp.width);

            let k = star.scale(self.config.focal_length);
            // A zero-width surface recycles stars to z = 0.
            if !k.is_finite() {
                continue;
            }

            let p = star.project(k, center) + parallax;
            if self.config.cull_offscreen && !vp.contains_inclusive(p) {
                continue;
            }
            surface.fill_circle(p, star.size * k, self.config.star_color);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn hue(&self) -> f32 {
        self.hue.hue()
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ElementStyle, ElementTransform};
    use crate::surface::VisualElement;
    use starfall_engine::coords::Rect;
    use starfall_engine::paint::Color;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Rect(Rect, Color),
        Circle(Vec2, f32, Color),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn circles(&self) -> Vec<(Vec2, f32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Circle(c, r, _) => Some((*c, *r)),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.clear();
            self.ops.push(Op::Clear);
        }
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Rect(rect, color));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ops.push(Op::Circle(center, radius, color));
        }
    }

    #[derive(Default)]
    struct Captured {
        last: Option<(ElementTransform, ElementStyle)>,
    }

    impl VisualElement for Captured {
        fn apply(&mut self, transform: &ElementTransform, style: &ElementStyle) {
            self.last = Some((*transform, style.clone()));
        }
    }

    fn seeded(config: StarfieldConfig, w: f32, h: f32) -> RenderLoop {
        RenderLoop::activate(config.with_seed(9), Viewport::new(w, h))
    }

    #[test]
    fn depth_stays_in_range_and_count_is_fixed() {
        let mut rl = seeded(StarfieldConfig::interactive(), 800.0, 600.0);
        let mut surface = RecordingSurface::default();

        for _ in 0..2000 {
            assert_eq!(rl.frame(0.0, &mut surface, BoundElements::none()), FrameStatus::Continue);
            assert_eq!(rl.stars().len(), 300);
            assert!(rl.stars().iter().all(|s| s.z > 0.0 && s.z <= 800.0));
            assert!((0.0..360.0).contains(&rl.hue()));
        }
        // No culling: every star paints every frame.
        assert_eq!(surface.circles().len(), 300);
    }

    #[test]
    fn single_star_projects_through_center() {
        let config = StarfieldConfig::interactive()
            .with_star_count(0)
            .with_depth_step(2.0)
            .with_parallax(0.0);
        let mut rl = seeded(config, 800.0, 600.0);
        rl.stars.push(Star { x: 100.0, y: 50.0, z: 1.0, size: 1.0 });

        let mut surface = RecordingSurface::default();
        rl.frame(0.0, &mut surface, BoundElements::none());

        assert_eq!(rl.stars()[0].z, 800.0);
        let circles = surface.circles();
        assert_eq!(circles.len(), 1);
        let (c, r) = circles[0];
        assert!((c.x - 416.0).abs() < 1e-3);
        assert!((c.y - 308.0).abs() < 1e-3);
        assert!((r - 0.16).abs() < 1e-6);
    }

    #[test]
    fn parallax_shifts_by_pointer_deflection() {
        let config = StarfieldConfig::interactive().with_star_count(0);
        let mut rl = seeded(config, 800.0, 600.0);
        rl.stars.push(Star { x: 0.0, y: 0.0, z: 400.0, size: 1.0 });
        rl.pointer_moved(800.0, 0.0);
        assert_eq!(rl.pointer(), PointerState { x: 1.0, y: -1.0 });

        let mut surface = RecordingSurface::default();
        rl.frame(0.0, &mut surface, BoundElements::none());
        let (c, _) = surface.circles()[0];
        assert_eq!(c, Vec2::new(430.0, 270.0));
    }

    #[test]
    fn standalone_fills_background_and_culls() {
        let config = StarfieldConfig::standalone().with_star_count(0);
        let mut rl = seeded(config, 200.0, 100.0);
        rl.stars.push(Star { x: 90.0, y: 0.0, z: 20.0, size: 1.0 });
        rl.stars.push(Star { x: 1.0, y: 1.0, z: 150.0, size: 1.0 });

        let mut surface = RecordingSurface::default();
        rl.frame(0.0, &mut surface, BoundElements::none());

        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.ops[1], Op::Rect(Rect::new(0.0, 0.0, 200.0, 100.0), Color::black()));
        // 90 * 128/18 lands far right of the surface.
        assert_eq!(surface.circles().len(), 1);
    }

    #[test]
    fn transparent_background_only_clears() {
        let config = StarfieldConfig::interactive().with_star_count(0);
        let mut rl = seeded(config, 100.0, 100.0);
        let mut surface = RecordingSurface::default();
        rl.frame(0.0, &mut surface, BoundElements::none());
        assert_eq!(surface.ops, vec![Op::Clear]);
    }

    #[test]
    fn resize_keeps_stars_and_moves_far_plane() {
        let mut rl = seeded(StarfieldConfig::interactive(), 800.0, 600.0);
        let before: Vec<(f32, f32, f32)> = rl.stars().iter().map(|s| (s.x, s.y, s.size)).collect();

        rl.resized(Viewport::new(100.0, 100.0));
        assert_eq!(rl.viewport(), Viewport::new(100.0, 100.0));

        // Depths are not clamped to the new width; deep stars drain out as
        // they recycle.
        let mut surface = RecordingSurface::default();
        rl.frame(0.0, &mut surface, BoundElements::none());
        assert!(rl.stars().iter().any(|s| s.z > 100.0));

        for _ in 0..600 {
            rl.frame(0.0, &mut surface, BoundElements::none());
        }
        let after: Vec<(f32, f32, f32)> = rl.stars().iter().map(|s| (s.x, s.y, s.size)).collect();
        assert_eq!(before, after);
        assert!(rl.stars().iter().all(|s| s.z <= 100.0));
    }

    #[test]
    fn deactivated_loop_stops_and_ignores_input() {
        let mut rl = seeded(StarfieldConfig::interactive(), 800.0, 600.0);
        rl.deactivate();
        assert!(!rl.is_active());

        rl.pointer_moved(0.0, 0.0);
        rl.resized(Viewport::new(10.0, 10.0));
        assert_eq!(rl.pointer(), PointerState::default());
        assert_eq!(rl.viewport(), Viewport::new(800.0, 600.0));

        let mut surface = RecordingSurface::default();
        assert_eq!(rl.frame(0.0, &mut surface, BoundElements::none()), FrameStatus::Stopped);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn bound_elements_receive_descriptors() {
        let mut rl = seeded(StarfieldConfig::interactive().with_star_count(3), 800.0, 600.0);
        let mut logo = Captured::default();
        let mut caption = Captured::default();
        let mut surface = RecordingSurface::default();

        let now = 500.0;
        let elements = BoundElements::none().with_logo(&mut logo).with_caption(&mut caption);
        rl.frame(now, &mut surface, elements);

        let (t, style) = logo.last.expect("logo applied");
        assert_eq!(t.scale, 1.0 + (now / 1000.0).sin() as f32 * 0.05);
        assert_eq!(t.rotate_x, rl.rotation().angles.x);
        assert_eq!(t.rotate_z, Some(rl.rotation().angles.z));
        assert_eq!(style.glow.len(), 1);
        assert_eq!(style.glow[0].color.hue, rl.hue());

        let (t, style) = caption.last.expect("caption applied");
        assert_eq!(t.scale, 1.0 + (now / 800.0).sin() as f32 * 0.03);
        assert_eq!((t.rotate_x, t.rotate_y, t.rotate_z), (0.0, 0.0, None));
        assert_eq!(style.text_color.map(|c| c.hue), Some(rl.hue()));
        assert_eq!(style.glow.iter().map(|l| l.blur).collect::<Vec<_>>(), vec![25.0, 50.0, 70.0]);
    }

    #[test]
    fn absent_elements_are_skipped() {
        let mut rl = seeded(StarfieldConfig::interactive(), 800.0, 600.0);
        let mut caption = Captured::default();
        let mut surface = RecordingSurface::default();
        let status = rl.frame(0.0, &mut surface, BoundElements::none().with_caption(&mut caption));
        assert_eq!(status, FrameStatus::Continue);
        assert!(caption.last.is_some());
    }

    #[test]
    fn zero_sized_surface_paints_nothing() {
        let mut rl = seeded(StarfieldConfig::interactive(), 0.0, 0.0);
        let mut surface = RecordingSurface::default();
        assert_eq!(rl.frame(0.0, &mut surface, BoundElements::none()), FrameStatus::Continue);
        assert!(surface.circles().is_empty());
    }

    #[test]
    fn same_seed_same_field() {
        let a = seeded(StarfieldConfig::standalone(), 640.0, 480.0);
        let b = seeded(StarfieldConfig::standalone(), 640.0, 480.0);
        assert_eq!(a.stars(), b.stars());
    }
}
