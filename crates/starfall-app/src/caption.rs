use starfall_engine::coords::Vec2;
use starfall_engine::paint::Color;
use starfall_engine::scene::DrawList;
use starfall_fx::{ElementStyle, ElementTransform, VisualElement};

use crate::glyphs::GlyphDots;

const CAPTION_PX: f32 = 44.0;
const CAPTION_PITCH: f32 = 2.0;

/// Glowing headline text. Takes its fill from the pushed style.
pub struct CaptionElement {
    dots: GlyphDots,
    transform: ElementTransform,
    style: Option<ElementStyle>,
}

impl CaptionElement {
    pub fn new(font: &fontdue::Font, text: &str) -> Self {
        let dots = GlyphDots::rasterize(font, text, CAPTION_PX, CAPTION_PITCH);
        log::debug!("caption `{text}` rasterized into {} dots", dots.dots().len());
        Self {
            dots,
            transform: ElementTransform::IDENTITY,
            style: None,
        }
    }

    pub fn height(&self) -> f32 {
        self.dots.size().y
    }

    /// Nothing is painted until the first style arrives.
    pub fn paint(&self, list: &mut DrawList, anchor: Vec2) {
        let Some(style) = &self.style else { return };
        let fill = style
            .text_color
            .map(|c| c.to_color())
            .unwrap_or(Color::from_hex(0xffffff));
        self.dots.paint_transformed(list, anchor, &self.transform, style, fill);
    }
}

impl VisualElement for CaptionElement {
    fn apply(&mut self, transform: &ElementTransform, style: &ElementStyle) {
        log::trace!("caption transform: {transform}");
        self.transform = *transform;
        self.style = Some(style.clone());
    }
}
