use std::time::Duration;

use crate::render::{ClearColor, Position};
use crate::sensor::SENSOR_EVENT_INTERVAL;

/// Engine behavior knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Logical name of the image installed on the first frame.
    pub asset_name: String,

    /// Where the installed image is drawn (top-left, surface pixels).
    pub asset_position: Position,

    pub clear_color: ClearColor,

    /// Angle increment per animated tick.
    pub animation_step: f32,

    /// The angle wraps to zero once it exceeds this value.
    pub angle_wrap: f32,

    /// Motion-sensor sampling interval while focused.
    pub sensor_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            asset_name: "test.png".to_string(),
            asset_position: Position::new(0.0, 0.0),
            clear_color: ClearColor::BLACK,
            animation_step: 0.01,
            angle_wrap: 1.0,
            sensor_interval: SENSOR_EVENT_INTERVAL,
        }
    }
}
