use std::fmt;
use std::time::Duration;

/// One accelerometer reading, in m/s².
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SensorSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// No motion sensor on this device.
    Unavailable,
    /// The service refused the request.
    Rejected(String),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("motion sensor unavailable"),
            Self::Rejected(msg) => write!(f, "sensor request rejected: {msg}"),
        }
    }
}

impl std::error::Error for SensorError {}

/// OS sensor service for the default motion sensor.
pub trait SensorService {
    fn has_sensor(&self) -> bool;

    fn enable(&mut self) -> Result<(), SensorError>;

    fn set_event_interval(&mut self, interval: Duration) -> Result<(), SensorError>;

    fn disable(&mut self);

    /// Next queued sample, if any.
    fn poll_sample(&mut self) -> Option<SensorSample>;
}

/// Service for devices without a motion sensor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSensor;

impl SensorService for NoSensor {
    fn has_sensor(&self) -> bool {
        false
    }

    fn enable(&mut self) -> Result<(), SensorError> {
        Err(SensorError::Unavailable)
    }

    fn set_event_interval(&mut self, _interval: Duration) -> Result<(), SensorError> {
        Err(SensorError::Unavailable)
    }

    fn disable(&mut self) {}

    fn poll_sample(&mut self) -> Option<SensorSample> {
        None
    }
}
