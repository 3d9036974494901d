//! Motion-sensor monitoring.
//!
//! The OS sensor service is reached through [`SensorService`]; every failure
//! there is non-fatal and only logged.

mod monitor;
mod service;

pub use monitor::{SensorMonitor, SENSOR_EVENT_INTERVAL};
pub use service::{NoSensor, SensorError, SensorSample, SensorService};
