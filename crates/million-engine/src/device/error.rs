use std::fmt;

/// Failure while acquiring presentation resources.
///
/// None of these are fatal: the engine stays uninitialized and retries on the
/// next window-init command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The display connection could not be opened.
    Display(String),
    /// No configuration satisfies the requested channel precision.
    Config(String),
    /// The presentation surface could not be created.
    Surface(String),
    /// The rendering context could not be created.
    Context(String),
    /// Display, surface and context could not be bound as current.
    Bind,
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(msg) => write!(f, "failed to open display: {msg}"),
            Self::Config(msg) => write!(f, "no matching surface configuration: {msg}"),
            Self::Surface(msg) => write!(f, "failed to create presentation surface: {msg}"),
            Self::Context(msg) => write!(f, "failed to create rendering context: {msg}"),
            Self::Bind => f.write_str("unable to bind context to surface"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable for this surface (commonly OOM); the frame is dropped.
    Fatal,
}
