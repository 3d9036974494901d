use ::winit::event::{ElementState, TouchPhase, WindowEvent};
use ::winit::keyboard::PhysicalKey;

use crate::input::{InputEvent, KeyEvent, KeyState, MotionAction, MotionEvent, Pointer};

/// Last known cursor position, needed because winit button events carry none.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerTracker {
    position: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }
}

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Coordinates stay in physical pixels, the space of the bound surface.
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(
    pointer: &mut PointerTracker,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = (position.x as f32, position.y as f32);
            pointer.position = Some((x, y));
            Some(InputEvent::Motion(MotionEvent::single(MotionAction::Hover, x, y)))
        }

        WindowEvent::CursorLeft { .. } => {
            pointer.position = None;
            None
        }

        WindowEvent::MouseInput { state, .. } => {
            // Without a known position there is no pointer to report.
            let (x, y) = pointer.position?;
            let action = match state {
                ElementState::Pressed => MotionAction::Down,
                ElementState::Released => MotionAction::Up,
            };
            Some(InputEvent::Motion(MotionEvent::single(action, x, y)))
        }

        WindowEvent::Touch(touch) => {
            let action = match touch.phase {
                TouchPhase::Started => MotionAction::Down,
                TouchPhase::Moved => MotionAction::Move,
                TouchPhase::Ended => MotionAction::Up,
                TouchPhase::Cancelled => MotionAction::Cancel,
            };
            Some(InputEvent::Motion(MotionEvent {
                action,
                pointers: vec![Pointer {
                    id: touch.id,
                    x: touch.location.x as f32,
                    y: touch.location.y as f32,
                }],
            }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            Some(InputEvent::Key(KeyEvent {
                code: key_code(event.physical_key),
                state,
                repeat: event.repeat,
            }))
        }

        _ => None,
    }
}

// NativeKeyCode is not a u32 in winit 0.30; unidentified keys map to 0.
fn key_code(key: PhysicalKey) -> u32 {
    match key {
        PhysicalKey::Code(code) => code as u32,
        PhysicalKey::Unidentified(_) => 0,
    }
}
