use super::frame::InputFrame;
use super::types::{InputEvent, PointerMoveEvent};

/// Current input state for the window.
///
/// Holds the last known pointer position. Events are forwarded to the
/// `InputFrame` in arrival order.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Applies an input event to the current state and records it in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }
            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }
            _ => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, ResizeEvent, TextEvent};

    #[test]
    fn events_are_kept_in_arrival_order() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let events = [
            InputEvent::Text(TextEvent { text: "a".into() }),
            InputEvent::Key { key: Key::Tab, state: KeyState::Pressed, repeat: false },
            InputEvent::Resized(ResizeEvent { width: 640.0, height: 480.0 }),
            InputEvent::Text(TextEvent { text: "b".into() }),
        ];
        for ev in events.clone() {
            st.apply_event(&mut fr, ev);
        }
        assert_eq!(fr.events, events);

        fr.clear();
        assert!(fr.events.is_empty());
    }

    #[test]
    fn pointer_tracked_until_it_leaves() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved(PointerMoveEvent { x: 3.0, y: 4.0 }));
        assert_eq!(st.pointer_pos, Some((3.0, 4.0)));

        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
        assert_eq!(fr.events.len(), 2);
    }
}
