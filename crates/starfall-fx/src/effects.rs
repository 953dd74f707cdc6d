//! Transform and color descriptors for the bound elements.
//!
//! The loop never touches element geometry. It computes an
//! [`ElementTransform`] and an [`ElementStyle`] per element per frame; the
//! element's adapter decides how to present them.

use std::fmt;

use starfall_engine::coords::Vec2;
use starfall_engine::paint::Color;

use crate::motion::Axes;
use crate::pointer::PointerState;

/// Perspective distance used by [`ElementTransform::project`], in logical pixels.
pub const PERSPECTIVE: f32 = 800.0;

/// CSS-style `hsl()` color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HslColor {
    pub hue: f32,
    /// Percent, `[0, 100]`.
    pub saturation: f32,
    /// Percent, `[0, 100]`.
    pub lightness: f32,
}

impl HslColor {
    /// The glow palette: full saturation, 60% lightness.
    #[inline]
    pub fn glow(hue: f32) -> Self {
        Self { hue, saturation: 100.0, lightness: 60.0 }
    }

    #[inline]
    pub fn to_color(self) -> Color {
        Color::from_hsl(self.hue, self.saturation / 100.0, self.lightness / 100.0)
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({},{}%,{}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Rotation on up to three axes (degrees) plus a uniform scale.
///
/// Applied in CSS order: the rightmost operation first, so a local point is
/// scaled, then rotated about Z, then Y, then X.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ElementTransform {
    pub rotate_x: f32,
    pub rotate_y: f32,
    /// `None` for elements that only tilt.
    pub rotate_z: Option<f32>,
    pub scale: f32,
}

/// A projected local point: screen offset from the element anchor and the
/// perspective magnification at that point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projected {
    pub offset: Vec2,
    pub depth_scale: f32,
}

impl ElementTransform {
    pub const IDENTITY: ElementTransform = ElementTransform {
        rotate_x: 0.0,
        rotate_y: 0.0,
        rotate_z: None,
        scale: 1.0,
    };

    /// Maps a point in the element's local plane (origin at its center,
    /// +Y down) through the transform and a perspective of `perspective` px.
    pub fn project(&self, local: Vec2, perspective: f32) -> Projected {
        let (mut x, mut y, mut z) = (local.x * self.scale, local.y * self.scale, 0.0f32);

        if let Some(rz) = self.rotate_z {
            let (s, c) = rz.to_radians().sin_cos();
            (x, y) = (x * c - y * s, x * s + y * c);
        }

        let (s, c) = self.rotate_y.to_radians().sin_cos();
        (x, z) = (x * c + z * s, -x * s + z * c);

        let (s, c) = self.rotate_x.to_radians().sin_cos();
        (y, z) = (y * c - z * s, y * s + z * c);

        // Points swung past the eye would invert; pin them just in front of it.
        let depth_scale = perspective / (perspective - z).max(1.0);

        Projected {
            offset: Vec2::new(x * depth_scale, y * depth_scale),
            depth_scale,
        }
    }
}

impl fmt::Display for ElementTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotateX({}deg) rotateY({}deg)", self.rotate_x, self.rotate_y)?;
        if let Some(rz) = self.rotate_z {
            write!(f, " rotateZ({rz}deg)")?;
        }
        write!(f, " scale({})", self.scale)
    }
}

/// One stacked glow: a blur radius in logical pixels and its color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlowLayer {
    pub blur: f32,
    pub color: HslColor,
}

/// Glow and text color pushed to an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    /// Text fill; `None` for non-text elements.
    pub text_color: Option<HslColor>,
    /// Innermost layer first.
    pub glow: Vec<GlowLayer>,
}

impl ElementStyle {
    /// CSS `filter` value for drop-shadow glows.
    pub fn filter_css(&self) -> String {
        self.glow
            .iter()
            .map(|l| format!("drop-shadow(0 0 {}px {})", l.blur, l.color))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// CSS `text-shadow` value for text glows.
    pub fn text_shadow_css(&self) -> String {
        self.glow
            .iter()
            .map(|l| format!("0 0 {}px {}", l.blur, l.color))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Pointer-tilt, breathing and glow parameters for one kind of element.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TiltEffect {
    /// Tilt in degrees at a fully deflected pointer.
    pub tilt: f32,
    /// Breathing scale is `1 + amplitude * sin(now_ms / period_ms)`.
    pub breath_period_ms: f64,
    pub breath_amplitude: f32,
    /// Whether the cumulative rotation is added (logo) or not (caption).
    pub spins: bool,
    pub glow_blurs: &'static [f32],
    pub colors_text: bool,
}

impl TiltEffect {
    pub const LOGO: TiltEffect = TiltEffect {
        tilt: 20.0,
        breath_period_ms: 1000.0,
        breath_amplitude: 0.05,
        spins: true,
        glow_blurs: &[30.0],
        colors_text: false,
    };

    pub const CAPTION: TiltEffect = TiltEffect {
        tilt: 15.0,
        breath_period_ms: 800.0,
        breath_amplitude: 0.03,
        spins: false,
        glow_blurs: &[25.0, 50.0, 70.0],
        colors_text: true,
    };

    #[inline]
    pub fn breathing_scale(&self, now_ms: f64) -> f32 {
        1.0 + (now_ms / self.breath_period_ms).sin() as f32 * self.breath_amplitude
    }

    /// Pointer X tilts about the Y axis and pointer Y about the X axis.
    pub fn transform(&self, pointer: PointerState, rotation: Axes, now_ms: f64) -> ElementTransform {
        let tilt_x = pointer.y * self.tilt;
        let tilt_y = pointer.x * self.tilt;
        let scale = self.breathing_scale(now_ms);

        if self.spins {
            ElementTransform {
                rotate_x: rotation.x + tilt_x,
                rotate_y: rotation.y + tilt_y,
                rotate_z: Some(rotation.z),
                scale,
            }
        } else {
            ElementTransform {
                rotate_x: tilt_x,
                rotate_y: tilt_y,
                rotate_z: None,
                scale,
            }
        }
    }

    pub fn style(&self, color: HslColor) -> ElementStyle {
        ElementStyle {
            text_color: self.colors_text.then_some(color),
            glow: self
                .glow_blurs
                .iter()
                .map(|&blur| GlowLayer { blur, color })
                .collect(),
        }
    }
}
