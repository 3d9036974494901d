use crate::core::SavedState;
use crate::input::{InputDisposition, InputEvent};
use crate::lifecycle::LifecycleCommand;

/// How long a poll may wait for the next event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PollTimeout {
    /// Block until an event arrives.
    Infinite,
    /// Return immediately when nothing is ready.
    Zero,
}

impl PollTimeout {
    /// Blocking while idle, non-blocking while animating.
    pub fn for_animation(animating: bool) -> Self {
        if animating { Self::Zero } else { Self::Infinite }
    }
}

/// One ready event source.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent<W> {
    Command(LifecycleCommand<W>),
    Input(InputEvent),
    /// The sensor queue has samples.
    SensorReady,
}

/// Host-side effects of dispatching.
pub trait HostSink {
    /// Stores a snapshot in the host-provided buffer, replacing any earlier one.
    fn store_snapshot(&mut self, state: &SavedState);

    /// Reports whether the engine consumed an input event.
    fn input_finished(&mut self, event: &InputEvent, disposition: InputDisposition) {
        let _ = (event, disposition);
    }
}

/// Pull-style host exposing a looper.
pub trait Host: HostSink {
    type Window;

    /// Waits up to `timeout` for the next ready event.
    ///
    /// `None` with [`PollTimeout::Zero`] means nothing is ready; `None` with
    /// [`PollTimeout::Infinite`] means the host has shut down.
    fn poll(&mut self, timeout: PollTimeout) -> Option<HostEvent<Self::Window>>;
}
