use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{InputEvent, Key, KeyState, PointerMoveEvent, ResizeEvent, TextEvent};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::Resized(size) => Some(InputEvent::Resized(logical_size(window, *size))),

        // Size is re-read from the window; the event's inner_size_writer is not needed.
        WindowEvent::ScaleFactorChanged { .. } => {
            Some(InputEvent::Resized(logical_size(window, window.inner_size())))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            // Printable characters are delivered as text on press; named keys
            // (Enter, Tab, ...) carry control characters we do not want in fields.
            let text = match (&event.text, state) {
                (Some(t), KeyState::Pressed) if t.chars().all(|c| !c.is_control()) => {
                    Some(t.to_string())
                }
                _ => None,
            };

            let key = map_key(event.physical_key);

            match text {
                Some(text) if matches!(key, Key::Unknown(_)) => {
                    Some(InputEvent::Text(TextEvent { text }))
                }
                _ => Some(InputEvent::Key {
                    key,
                    state,
                    repeat: event.repeat,
                }),
            }
        }

        WindowEvent::Ime(winit::event::Ime::Commit(text)) if !text.is_empty() => {
            Some(InputEvent::Text(TextEvent { text: text.clone() }))
        }

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

pub(crate) fn logical_size(window: &Window, size: PhysicalSize<u32>) -> ResizeEvent {
    let logical = size.to_logical::<f64>(window.scale_factor());
    ResizeEvent {
        width: logical.width as f32,
        height: logical.height as f32,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
