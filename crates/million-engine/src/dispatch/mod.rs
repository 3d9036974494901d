//! Single-threaded event dispatch.
//!
//! One tick polls every ready event source, dispatches each event before the
//! next poll, then advances the animation and renders once. The poll blocks
//! while idle and returns immediately while animating.

mod dispatcher;
mod handler;
mod host;

pub use dispatcher::{EventDispatcher, Flow};
pub use handler::EventHandler;
pub use host::{Host, HostEvent, HostSink, PollTimeout};
