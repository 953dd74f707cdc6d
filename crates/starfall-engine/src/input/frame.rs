use super::types::InputEvent;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (pointer position).
/// `InputFrame` carries the raw events collected since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
