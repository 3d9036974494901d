//! Desktop host.
//!
//! Owns the `winit` event loop and window and feeds their events to the
//! dispatcher in push mode.

mod persist;
mod runtime;

pub use persist::SnapshotFile;
pub use runtime::{Runtime, RuntimeConfig};
