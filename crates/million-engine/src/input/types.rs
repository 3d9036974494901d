/// Phase of a motion event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MotionAction {
    Down,
    Move,
    Up,
    Cancel,
    /// Pointer moved without contact (mouse cursor).
    Hover,
}

/// One pointer of a motion event, in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pointer {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

/// Pointer/touch movement. The first pointer is the primary one.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub pointers: Vec<Pointer>,
}

impl MotionEvent {
    /// Single-pointer event with id 0.
    pub fn single(action: MotionAction, x: f32, y: f32) -> Self {
        Self {
            action,
            pointers: vec![Pointer { id: 0, x, y }],
        }
    }

    pub fn primary(&self) -> Option<&Pointer> {
        self.pointers.first()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Keyboard event carrying the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub code: u32,
    pub state: KeyState,
    pub repeat: bool,
}

/// Platform-agnostic input events delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Motion(MotionEvent),
    Key(KeyEvent),
}

/// Whether the engine consumed an input event.
///
/// Unhandled events go back to the host's default handling.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputDisposition {
    Handled,
    Unhandled,
}
