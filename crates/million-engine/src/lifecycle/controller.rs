use std::time::Duration;

use crate::core::{EngineState, Phase};
use crate::device::{GraphicsBackend, ResourceManager};
use crate::render::RenderDriver;
use crate::sensor::{SensorMonitor, SensorService};

use super::{CommandOutcome, LifecycleCommand};

/// Interprets lifecycle commands against the engine state.
#[derive(Debug, Clone)]
pub struct LifecycleController {
    sensor_interval: Duration,
}

impl LifecycleController {
    pub fn new(sensor_interval: Duration) -> Self {
        Self { sensor_interval }
    }

    pub fn handle<B, S>(
        &mut self,
        command: LifecycleCommand<B::Window>,
        state: &mut EngineState<B>,
        resources: &mut ResourceManager<B>,
        sensor: &mut SensorMonitor<S>,
        renderer: &mut RenderDriver<B>,
    ) -> CommandOutcome
    where
        B: GraphicsBackend,
        S: SensorService,
    {
        match command {
            LifecycleCommand::WindowInit(window) => {
                let Some(window) = window else {
                    log::debug!("window init without a window; ignored");
                    return CommandOutcome::Continue;
                };

                if state.phase() == Phase::Ready {
                    log::warn!("window init while already bound; releasing previous surface");
                    Self::teardown(state, resources, renderer);
                }

                match resources.acquire(&window) {
                    Ok(bundle) => {
                        state.presentation = Some(bundle);
                        renderer.render(state, resources);
                    }
                    Err(e) => log::warn!("{e}; staying uninitialized"),
                }
                CommandOutcome::Continue
            }

            LifecycleCommand::WindowTerm => {
                log::info!("window terminated");
                Self::teardown(state, resources, renderer);
                CommandOutcome::Continue
            }

            LifecycleCommand::GainedFocus => {
                if state.focused {
                    log::debug!("gained focus while already focused; ignored");
                    return CommandOutcome::Continue;
                }
                log::info!("gained focus");
                state.focused = true;
                sensor.enable(self.sensor_interval);
                CommandOutcome::Continue
            }

            LifecycleCommand::LostFocus => {
                log::info!("lost focus");
                state.focused = false;
                sensor.disable();
                renderer.discard_assets(state);
                state.animating = false;
                renderer.render(state, resources);
                CommandOutcome::Continue
            }

            LifecycleCommand::SaveState => {
                log::debug!("saving state: {:?}", state.saved);
                CommandOutcome::Snapshot(state.saved)
            }

            LifecycleCommand::DestroyRequested => {
                log::info!("destroy requested");
                Self::teardown(state, resources, renderer);
                sensor.disable();
                state.destroy_requested = true;
                CommandOutcome::Exit
            }

            LifecycleCommand::WindowResized(size) => {
                if let Some(bundle) = state.presentation.as_mut() {
                    resources.resize(bundle, size);
                }
                CommandOutcome::Continue
            }

            LifecycleCommand::RedrawNeeded => {
                renderer.render(state, resources);
                CommandOutcome::Continue
            }

            cmd @ (LifecycleCommand::Start
            | LifecycleCommand::Resume
            | LifecycleCommand::Pause
            | LifecycleCommand::Stop
            | LifecycleCommand::LowMemory
            | LifecycleCommand::ConfigChanged) => {
                log::debug!("lifecycle: {}", command_name(&cmd));
                CommandOutcome::Continue
            }
        }
    }

    /// Releases textures and presentation resources and resets interaction
    /// state. Safe to call when nothing is bound.
    pub fn teardown<B: GraphicsBackend>(
        state: &mut EngineState<B>,
        resources: &mut ResourceManager<B>,
        renderer: &mut RenderDriver<B>,
    ) {
        renderer.discard_assets(state);
        resources.release(&mut state.presentation);
        state.animating = false;
    }
}

fn command_name<W>(cmd: &LifecycleCommand<W>) -> &'static str {
    match cmd {
        LifecycleCommand::WindowInit(_) => "window-init",
        LifecycleCommand::WindowTerm => "window-term",
        LifecycleCommand::GainedFocus => "gained-focus",
        LifecycleCommand::LostFocus => "lost-focus",
        LifecycleCommand::SaveState => "save-state",
        LifecycleCommand::DestroyRequested => "destroy",
        LifecycleCommand::WindowResized(_) => "window-resized",
        LifecycleCommand::RedrawNeeded => "redraw-needed",
        LifecycleCommand::Start => "start",
        LifecycleCommand::Resume => "resume",
        LifecycleCommand::Pause => "pause",
        LifecycleCommand::Stop => "stop",
        LifecycleCommand::LowMemory => "low-memory",
        LifecycleCommand::ConfigChanged => "config-changed",
    }
}
