//! Seams between the loop and whatever it paints on.

use starfall_engine::coords::{Rect, Vec2};
use starfall_engine::paint::Color;
use starfall_engine::scene::{DrawList, ZIndex};

use crate::effects::{ElementStyle, ElementTransform};

/// A 2-D drawing target that can be cleared and filled with primitive shapes.
pub trait DrawSurface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Stars and the background land on the lowest layer so bound elements and
/// overlays recorded later in the frame paint above them.
impl DrawSurface for DrawList {
    #[inline]
    fn clear(&mut self) {
        DrawList::clear(self);
    }

    #[inline]
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push_solid_rect(ZIndex::BACKGROUND, rect, color);
    }

    #[inline]
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push_solid_circle(ZIndex::BACKGROUND, center, radius, color);
    }
}

/// An on-screen element that accepts a transform and style every frame.
pub trait VisualElement {
    fn apply(&mut self, transform: &ElementTransform, style: &ElementStyle);
}

/// The optional elements a frame pushes descriptors to. Absent elements are
/// skipped without error.
#[derive(Default)]
pub struct BoundElements<'a> {
    pub logo: Option<&'a mut dyn VisualElement>,
    pub caption: Option<&'a mut dyn VisualElement>,
}

impl<'a> BoundElements<'a> {
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_logo(mut self, logo: &'a mut dyn VisualElement) -> Self {
        self.logo = Some(logo);
        self
    }

    #[inline]
    pub fn with_caption(mut self, caption: &'a mut dyn VisualElement) -> Self {
        self.caption = Some(caption);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_engine::scene::DrawCmd;

    #[test]
    fn draw_list_records_on_background_layer() {
        let mut list = DrawList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::black());
        list.fill_circle(Vec2::new(5.0, 5.0), 2.0, Color::from_hex(0x00eaff));

        assert_eq!(list.len(), 2);
        assert!(list.items().iter().all(|i| i.key.z == ZIndex::BACKGROUND));
        assert!(matches!(list.items()[1].cmd, DrawCmd::Circle(_)));

        DrawSurface::clear(&mut list);
        assert!(list.is_empty());
    }
}
