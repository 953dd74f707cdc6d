use std::f32::consts::TAU;

use starfall_engine::coords::Vec2;
use starfall_engine::paint::Color;
use starfall_engine::scene::{DrawList, ZIndex};
use starfall_fx::effects::PERSPECTIVE;
use starfall_fx::{ElementStyle, ElementTransform, VisualElement};

use crate::glyphs::paint_glow;

const ORBIT_RADIUS: f32 = 90.0;
/// Minor/major axis ratio of each orbit ellipse.
const ORBIT_FLATTEN: f32 = 0.38;
const ORBIT_SAMPLES: usize = 96;
const NUCLEUS_RADIUS: f32 = 11.0;
const STROKE_RADIUS: f32 = 2.2;

/// Atom emblem: a nucleus and three tilted elliptical orbits, held as a
/// point set in the logo's local plane.
pub struct LogoElement {
    points: Vec<Vec2>,
    color: Color,
    transform: ElementTransform,
    style: Option<ElementStyle>,
}

impl LogoElement {
    pub fn new() -> Self {
        let mut points = Vec::with_capacity(ORBIT_SAMPLES * 3);
        for orbit in 0..3 {
            let (s, c) = (orbit as f32 * TAU / 6.0).sin_cos();
            for i in 0..ORBIT_SAMPLES {
                let t = i as f32 / ORBIT_SAMPLES as f32 * TAU;
                let (x, y) = (ORBIT_RADIUS * t.cos(), ORBIT_RADIUS * ORBIT_FLATTEN * t.sin());
                points.push(Vec2::new(x * c - y * s, x * s + y * c));
            }
        }

        Self {
            points,
            color: Color::from_hex(0x61dafb),
            transform: ElementTransform::IDENTITY,
            style: None,
        }
    }

    /// Radius of the emblem's bounding circle before transforms.
    pub fn extent(&self) -> f32 {
        ORBIT_RADIUS
    }

    pub fn paint(&self, list: &mut DrawList, anchor: Vec2) {
        let t = &self.transform;

        if let Some(style) = &self.style {
            paint_glow(list, anchor, t, style, self.points.iter().copied(), 24.0);
        }

        for &local in &self.points {
            let p = t.project(local, PERSPECTIVE);
            list.push_solid_circle(
                ZIndex::ELEMENT,
                anchor + p.offset,
                STROKE_RADIUS * t.scale * p.depth_scale,
                self.color,
            );
        }

        let nucleus = t.project(Vec2::zero(), PERSPECTIVE);
        list.push_solid_circle(
            ZIndex::ELEMENT,
            anchor + nucleus.offset,
            NUCLEUS_RADIUS * t.scale * nucleus.depth_scale,
            self.color,
        );
    }
}

impl Default for LogoElement {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualElement for LogoElement {
    fn apply(&mut self, transform: &ElementTransform, style: &ElementStyle) {
        log::trace!("logo transform: {transform}");
        self.transform = *transform;
        self.style = Some(style.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_engine::scene::DrawCmd;
    use starfall_fx::{HslColor, TiltEffect};

    #[test]
    fn orbit_points_lie_within_extent() {
        let logo = LogoElement::new();
        assert_eq!(logo.points.len(), ORBIT_SAMPLES * 3);
        for p in &logo.points {
            assert!((p.x * p.x + p.y * p.y).sqrt() <= logo.extent() + 1e-3);
        }
    }

    #[test]
    fn glow_paints_only_after_apply() {
        let mut logo = LogoElement::new();
        let mut list = DrawList::new();
        logo.paint(&mut list, Vec2::new(100.0, 100.0));
        assert!(list.items().iter().all(|i| i.key.z == ZIndex::ELEMENT));
        let bare = list.len();

        logo.apply(&ElementTransform::IDENTITY, &TiltEffect::LOGO.style(HslColor::glow(200.0)));
        list.clear();
        logo.paint(&mut list, Vec2::new(100.0, 100.0));
        assert!(list.len() > bare);
        assert!(list.items().iter().any(|i| i.key.z == ZIndex::GLOW));
    }

    #[test]
    fn nucleus_follows_anchor() {
        let logo = LogoElement::new();
        let mut list = DrawList::new();
        logo.paint(&mut list, Vec2::new(50.0, 60.0));
        let Some(DrawCmd::Circle(c)) = list.items().last().map(|i| &i.cmd) else {
            panic!("nucleus missing");
        };
        assert_eq!(c.center, Vec2::new(50.0, 60.0));
        assert_eq!(c.radius, NUCLEUS_RADIUS);
    }
}
