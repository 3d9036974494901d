use crate::core::SavedState;
use crate::device::SurfaceSize;

/// Lifecycle notifications delivered by the host, in arbitrary but
/// serialized order.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleCommand<W> {
    /// A native window is ready. `None` when the host has no window to give.
    WindowInit(Option<W>),
    /// The window is being hidden or closed.
    WindowTerm,
    GainedFocus,
    LostFocus,
    /// The host wants a snapshot of the persistable state.
    SaveState,
    /// The host is destroying the application.
    DestroyRequested,
    WindowResized(SurfaceSize),
    RedrawNeeded,
    Start,
    Resume,
    Pause,
    Stop,
    LowMemory,
    ConfigChanged,
}

/// What the host must do after a command was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Continue,
    /// Store this snapshot in the host-provided buffer.
    Snapshot(SavedState),
    /// Resources are released; stop dispatching.
    Exit,
}
