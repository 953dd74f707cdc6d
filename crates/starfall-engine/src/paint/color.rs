/// Premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
///
/// Components are authored in sRGB (CSS-style literals and `hsl()` values);
/// the runtime selects a non-sRGB surface so they pass through unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`)
    /// and a straight alpha in `[0, 1]`, i.e. CSS `rgba(r, g, b, a)`.
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// Creates a premultiplied color from a 24-bit `0xRRGGBB` literal.
    #[inline]
    pub fn from_hex(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self::from_rgba_u8(r, g, b, 1.0)
    }

    /// Creates an opaque color from CSS-style `hsl(hue, saturation, lightness)`.
    ///
    /// `hue` is in degrees (any value, wrapped into `[0, 360)`); `saturation`
    /// and `lightness` are fractions in `[0, 1]`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Self::from_straight(r + m, g + m, b + m, 1.0)
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Same hue with a new straight alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        let (r, g, b, _) = self.to_straight();
        Self::from_straight(r, g, b, a)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn hsl_primary_hues_at_sixty_percent_lightness() {
        // hsl(0,100%,60%) = #ff3333
        let red = Color::from_hsl(0.0, 1.0, 0.6);
        assert!(approx(red.r, 1.0) && approx(red.g, 0.2) && approx(red.b, 0.2));

        let green = Color::from_hsl(120.0, 1.0, 0.6);
        assert!(approx(green.r, 0.2) && approx(green.g, 1.0) && approx(green.b, 0.2));

        let blue = Color::from_hsl(240.0, 1.0, 0.6);
        assert!(approx(blue.r, 0.2) && approx(blue.g, 0.2) && approx(blue.b, 1.0));
    }

    #[test]
    fn hsl_wraps_hue() {
        assert_eq!(Color::from_hsl(360.0, 1.0, 0.6), Color::from_hsl(0.0, 1.0, 0.6));
    }

    #[test]
    fn rgba_literal_is_premultiplied() {
        let c = Color::from_rgba_u8(0, 200, 255, 0.6);
        assert!(approx(c.g, 200.0 / 255.0 * 0.6));
        assert!(approx(c.b, 0.6));
        assert!(approx(c.a, 0.6));
    }

    #[test]
    fn hex_literal_is_opaque() {
        let c = Color::from_hex(0x00eaff);
        assert_eq!(c.r, 0.0);
        assert!(approx(c.g, 234.0 / 255.0));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn with_alpha_keeps_straight_rgb() {
        let c = Color::from_hsl(200.0, 1.0, 0.6).with_alpha(0.25);
        let (r, g, b, a) = c.to_straight();
        let o = Color::from_hsl(200.0, 1.0, 0.6);
        assert!(approx(r, o.r) && approx(g, o.g) && approx(b, o.b));
        assert!(approx(a, 0.25));
    }
}
