use std::time::Duration;

use super::SensorService;

/// Target sampling interval: 60 events per second.
pub const SENSOR_EVENT_INTERVAL: Duration = Duration::from_micros(1_000_000 / 60);

/// Enables, disables and drains the motion sensor.
#[derive(Debug)]
pub struct SensorMonitor<S> {
    service: S,
    enabled: bool,
}

impl<S: SensorService> SensorMonitor<S> {
    pub fn new(service: S) -> Self {
        Self { service, enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Starts sampling at `interval`. Returns whether the sensor is now enabled.
    pub fn enable(&mut self, interval: Duration) -> bool {
        if !self.service.has_sensor() {
            log::debug!("no motion sensor; skipping enable");
            return false;
        }

        if let Err(e) = self.service.enable() {
            log::warn!("{e}");
            return false;
        }
        self.enabled = true;

        // A rejected rate still leaves the sensor running at its default rate.
        if let Err(e) = self.service.set_event_interval(interval) {
            log::warn!("{e}");
        }

        log::debug!("motion sensor enabled at {interval:?}");
        true
    }

    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.service.disable();
        self.enabled = false;
        log::debug!("motion sensor disabled");
    }

    /// Reads every queued sample and returns how many were consumed.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Some(s) = self.service.poll_sample() {
            log::trace!("accelerometer: x={} y={} z={}", s.x, s.y, s.z);
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{NoSensor, SensorSample};
    use crate::testing::FakeSensor;

    #[test]
    fn interval_targets_sixty_hz() {
        assert_eq!(SENSOR_EVENT_INTERVAL.as_micros(), 16_666);
    }

    #[test]
    fn enable_without_sensor_is_silently_skipped() {
        let mut m = SensorMonitor::new(NoSensor);
        assert!(!m.enable(SENSOR_EVENT_INTERVAL));
        assert!(!m.is_enabled());
        m.disable();
        assert_eq!(m.drain(), 0);
    }

    #[test]
    fn enable_sets_interval_and_disable_stops() {
        let sensor = FakeSensor::present();
        let mut m = SensorMonitor::new(sensor.clone());

        assert!(m.enable(SENSOR_EVENT_INTERVAL));
        assert!(sensor.is_enabled());
        assert_eq!(sensor.interval(), Some(SENSOR_EVENT_INTERVAL));

        m.disable();
        assert!(!sensor.is_enabled());
        assert!(!m.is_enabled());
    }

    #[test]
    fn rejected_enable_is_non_fatal() {
        let sensor = FakeSensor::present().rejecting();
        let mut m = SensorMonitor::new(sensor.clone());
        assert!(!m.enable(SENSOR_EVENT_INTERVAL));
        assert!(!m.is_enabled());
    }

    #[test]
    fn drain_consumes_all_queued_samples() {
        let sensor = FakeSensor::present();
        for i in 0..5 {
            sensor.push(SensorSample { x: i as f32, y: 0.0, z: 9.8 });
        }
        let mut m = SensorMonitor::new(sensor.clone());
        assert_eq!(m.drain(), 5);
        assert_eq!(sensor.queued(), 0);
    }
}
