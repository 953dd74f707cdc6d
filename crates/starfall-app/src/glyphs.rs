//! Text as dots.
//!
//! Strings are laid out and rasterized once with fontdue; every covered cell
//! of the coverage bitmap becomes a dot in the text's local plane. Dots are
//! then projected through an element transform and drawn as circles, so text
//! can tilt and breathe with the rest of the scene.

use std::fmt;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use starfall_engine::coords::Vec2;
use starfall_engine::paint::Color;
use starfall_engine::scene::{DrawList, ZIndex};
use starfall_fx::effects::PERSPECTIVE;
use starfall_fx::{ElementStyle, ElementTransform};

/// Coverage below this (0-255) does not produce a dot.
const COVERAGE_THRESHOLD: u8 = 48;

const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Loads `path`, or the first readable system font when `path` is `None`.
pub fn load_font(path: Option<&Path>) -> Result<fontdue::Font, FontLoadError> {
    let bytes = match path {
        Some(p) => std::fs::read(p).map_err(|e| FontLoadError(format!("{}: {e}", p.display())))?,
        None => FALLBACK_FONTS
            .iter()
            .find_map(|p| std::fs::read(p).ok())
            .ok_or_else(|| FontLoadError("no system font found; pass --font".to_string()))?,
    };
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(|e| FontLoadError(e.to_string()))
}

/// One covered cell: position relative to the text's center and coverage in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dot {
    pub pos: Vec2,
    pub coverage: f32,
}

/// A string rasterized into dots, centered on the origin.
#[derive(Debug, Clone, Default)]
pub struct GlyphDots {
    dots: Vec<Dot>,
    size: Vec2,
    /// Sampling pitch in pixels; also the nominal dot diameter.
    pitch: f32,
}

impl GlyphDots {
    pub fn rasterize(font: &fontdue::Font, text: &str, px: f32, pitch: f32) -> Self {
        let pitch = pitch.max(1.0);
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let mut dots = Vec::new();
        let mut max = Vec2::new(0.0, px);
        let step = pitch.round().max(1.0) as usize;

        for g in layout.glyphs() {
            let m = font.metrics_indexed(g.key.glyph_index, px);
            max.x = max.x.max(g.x - m.xmin as f32 + m.advance_width);
            max.y = max.y.max(g.y + g.height as f32);

            if g.width == 0 || g.height == 0 {
                continue;
            }
            let (_, bitmap) = font.rasterize_config(g.key);

            for row in (0..g.height).step_by(step) {
                for col in (0..g.width).step_by(step) {
                    let a = bitmap[row * g.width + col];
                    if a < COVERAGE_THRESHOLD {
                        continue;
                    }
                    dots.push(Dot {
                        pos: Vec2::new(g.x + col as f32, g.y + row as f32),
                        coverage: a as f32 / 255.0,
                    });
                }
            }
        }

        let half = Vec2::new(max.x / 2.0, max.y / 2.0);
        for d in &mut dots {
            d.pos = d.pos - half;
        }

        Self { dots, size: max, pitch }
    }

    #[inline]
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Laid-out extent in pixels.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Paints flat (untransformed) text with its top-left corner at `origin`.
    pub fn paint_flat(&self, list: &mut DrawList, z: ZIndex, origin: Vec2, color: Color) {
        let center = origin + Vec2::new(self.size.x / 2.0, self.size.y / 2.0);
        let r = self.pitch * 0.6;
        for d in &self.dots {
            list.push_solid_circle(z, center + d.pos, r, color.with_alpha(d.coverage));
        }
    }

    /// Paints the dots projected through `transform` around `anchor`, glow
    /// layers first.
    pub fn paint_transformed(
        &self,
        list: &mut DrawList,
        anchor: Vec2,
        transform: &ElementTransform,
        style: &ElementStyle,
        fill: Color,
    ) {
        let base_r = self.pitch * 0.6 * transform.scale;
        paint_glow(list, anchor, transform, style, self.dots.iter().map(|d| d.pos), self.pitch * 3.0);

        for d in &self.dots {
            let p = transform.project(d.pos, PERSPECTIVE);
            list.push_solid_circle(
                ZIndex::ELEMENT,
                anchor + p.offset,
                base_r * p.depth_scale,
                fill.with_alpha(d.coverage),
            );
        }
    }
}

/// Soft halo behind an element: sparse, large, faint circles per glow layer.
///
/// `spacing` thins the source points so overlapping halos do not saturate.
pub fn paint_glow(
    list: &mut DrawList,
    anchor: Vec2,
    transform: &ElementTransform,
    style: &ElementStyle,
    points: impl Iterator<Item = Vec2> + Clone,
    spacing: f32,
) {
    for (i, layer) in style.glow.iter().enumerate() {
        let color = layer.color.to_color().with_alpha(0.05 / (i as f32 + 1.0));
        let radius = layer.blur * 0.5 * transform.scale;
        let mut last: Option<Vec2> = None;

        for local in points.clone() {
            if let Some(prev) = last {
                let d = local - prev;
                if d.x * d.x + d.y * d.y < spacing * spacing {
                    continue;
                }
            }
            last = Some(local);

            let p = transform.project(local, PERSPECTIVE);
            list.push_solid_circle(ZIndex::GLOW, anchor + p.offset, radius * p.depth_scale, color);
        }
    }
}
