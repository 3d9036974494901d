use crate::input::{InputDisposition, InputEvent};
use crate::lifecycle::{CommandOutcome, LifecycleCommand};

/// Typed callbacks the dispatcher invokes synchronously from its poll loop.
pub trait EventHandler<W> {
    fn on_command(&mut self, command: LifecycleCommand<W>) -> CommandOutcome;

    fn on_input(&mut self, event: &InputEvent) -> InputDisposition;

    /// Drains queued sensor samples; returns how many were read.
    fn on_sensor_ready(&mut self) -> usize;

    fn is_animating(&self) -> bool;

    fn destroy_requested(&self) -> bool;

    /// Advances the animation by one tick and renders.
    fn animate_frame(&mut self);

    /// Releases every resource. Must be idempotent.
    fn shutdown(&mut self);
}
