//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform` translates window-system events into `InputEvent`s.

pub mod platform;
mod router;
mod types;

pub use router::InputRouter;
pub use types::{
    InputDisposition,
    InputEvent,
    KeyEvent,
    KeyState,
    MotionAction,
    MotionEvent,
    Pointer,
};
