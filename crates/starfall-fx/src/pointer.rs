use starfall_engine::coords::Viewport;

/// Pointer position normalized to `[-1, 1]` around the viewport center.
///
/// `(0, 0)` is the center; `(-1, -1)` the top-left corner.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Normalizes a viewport-relative pixel position.
    ///
    /// Positions outside the window (drag captures) are not clamped. A
    /// degenerate viewport yields the centered pointer.
    pub fn from_viewport_position(px: f32, py: f32, viewport: Viewport) -> Self {
        if !viewport.is_valid() {
            return Self::default();
        }
        let half_w = viewport.width / 2.0;
        let half_h = viewport.height / 2.0;
        Self {
            x: (px - half_w) / half_w,
            y: (py - half_h) / half_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(PointerState::from_viewport_position(400.0, 300.0, vp), PointerState { x: 0.0, y: 0.0 });
        assert_eq!(PointerState::from_viewport_position(0.0, 0.0, vp), PointerState { x: -1.0, y: -1.0 });
        assert_eq!(PointerState::from_viewport_position(800.0, 600.0, vp), PointerState { x: 1.0, y: 1.0 });
        assert_eq!(PointerState::from_viewport_position(600.0, 150.0, vp), PointerState { x: 0.5, y: -0.5 });
    }

    #[test]
    fn degenerate_viewport_centers_pointer() {
        let p = PointerState::from_viewport_position(10.0, 10.0, Viewport::new(0.0, 0.0));
        assert_eq!(p, PointerState::default());
    }
}
