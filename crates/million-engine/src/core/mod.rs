//! Engine state and the handler the dispatcher drives.
//!
//! `Engine` owns the state aggregate and every component, and exposes them to
//! the event dispatcher through the typed `EventHandler` interface.

mod config;
mod engine;
mod snapshot;
mod state;

pub use config::EngineConfig;
pub use engine::Engine;
pub use snapshot::{SavedState, SNAPSHOT_SIZE};
pub use state::{EngineState, Phase};
