//! Million engine crate.
//!
//! Event-driven rendering core: lifecycle handling, presentation resources,
//! lazy asset install, motion-driven animation and state snapshots, plus a
//! winit/wgpu host to run it on a desktop window.

pub mod assets;
pub mod core;
pub mod device;
pub mod dispatch;
pub mod input;
pub mod lifecycle;
pub mod logging;
pub mod render;
pub mod sensor;
pub mod window;

#[cfg(test)]
mod testing;
