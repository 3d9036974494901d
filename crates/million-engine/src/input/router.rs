use crate::core::EngineState;
use crate::device::GraphicsBackend;

use super::{InputDisposition, InputEvent};

/// Turns raw input into interaction state.
#[derive(Debug, Default)]
pub struct InputRouter;

impl InputRouter {
    pub fn new() -> Self {
        Self
    }

    /// Motion events start animation and record the primary pointer.
    /// Every other class is left to the host.
    pub fn route<B: GraphicsBackend>(
        &mut self,
        event: &InputEvent,
        state: &mut EngineState<B>,
    ) -> InputDisposition {
        match event {
            InputEvent::Motion(motion) => {
                state.animating = true;
                if let Some(p) = motion.primary() {
                    // Truncates toward zero, saturating at the i32 range.
                    state.saved.last_x = p.x as i32;
                    state.saved.last_y = p.y as i32;
                }
                InputDisposition::Handled
            }
            InputEvent::Key(_) => InputDisposition::Unhandled,
        }
    }
}
