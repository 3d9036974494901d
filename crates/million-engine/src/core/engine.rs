use crate::device::{GraphicsBackend, ResourceManager};
use crate::dispatch::EventHandler;
use crate::input::{InputDisposition, InputEvent, InputRouter};
use crate::lifecycle::{CommandOutcome, LifecycleCommand, LifecycleController};
use crate::render::{Collaborators, RenderDriver};
use crate::sensor::{SensorMonitor, SensorService};

use super::{EngineConfig, EngineState, SavedState};

/// Owns the engine state and every component acting on it.
pub struct Engine<B: GraphicsBackend, S: SensorService> {
    config: EngineConfig,
    state: EngineState<B>,
    resources: ResourceManager<B>,
    sensor: SensorMonitor<S>,
    renderer: RenderDriver<B>,
    lifecycle: LifecycleController,
    input: InputRouter,
}

impl<B: GraphicsBackend, S: SensorService> Engine<B, S> {
    /// Builds the engine, restoring persisted state from `restored` when it
    /// holds a well-formed snapshot.
    pub fn new(
        config: EngineConfig,
        backend: B,
        sensor: S,
        collaborators: Collaborators<B>,
        restored: Option<&[u8]>,
    ) -> Self {
        let saved = match restored.map(|bytes| (bytes.len(), SavedState::from_bytes(bytes))) {
            Some((_, Some(saved))) => {
                log::info!("restored state: {saved:?}");
                saved
            }
            Some((len, None)) => {
                log::warn!("ignoring saved state of {len} bytes");
                SavedState::default()
            }
            None => SavedState::default(),
        };

        Self {
            state: EngineState::new(saved),
            resources: ResourceManager::new(backend),
            sensor: SensorMonitor::new(sensor),
            renderer: RenderDriver::new(collaborators, &config),
            lifecycle: LifecycleController::new(config.sensor_interval),
            input: InputRouter::new(),
            config,
        }
    }

    pub fn state(&self) -> &EngineState<B> {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sensor(&self) -> &SensorMonitor<S> {
        &self.sensor
    }

    /// Snapshot of the persistable state; valid at any time.
    pub fn snapshot(&self) -> SavedState {
        self.state.saved
    }
}

impl<B: GraphicsBackend, S: SensorService> EventHandler<B::Window> for Engine<B, S> {
    fn on_command(&mut self, command: LifecycleCommand<B::Window>) -> CommandOutcome {
        self.lifecycle.handle(
            command,
            &mut self.state,
            &mut self.resources,
            &mut self.sensor,
            &mut self.renderer,
        )
    }

    fn on_input(&mut self, event: &InputEvent) -> InputDisposition {
        self.input.route(event, &mut self.state)
    }

    fn on_sensor_ready(&mut self) -> usize {
        self.sensor.drain()
    }

    fn is_animating(&self) -> bool {
        self.state.animating
    }

    fn destroy_requested(&self) -> bool {
        self.state.destroy_requested
    }

    fn animate_frame(&mut self) {
        self.state
            .saved
            .advance_angle(self.config.animation_step, self.config.angle_wrap);
        // Pacing comes from the surface's present cadence.
        self.renderer.render(&mut self.state, &mut self.resources);
    }

    fn shutdown(&mut self) {
        LifecycleController::teardown(&mut self.state, &mut self.resources, &mut self.renderer);
        self.sensor.disable();
    }
}
