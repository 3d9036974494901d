//! OS lifecycle handling.

mod command;
mod controller;

pub use command::{CommandOutcome, LifecycleCommand};
pub use controller::LifecycleController;
