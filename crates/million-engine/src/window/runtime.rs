use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::{DirAssetSource, ImageCrateDecoder};
use crate::core::{Engine, EngineConfig};
use crate::device::{GpuInit, SurfaceSize, WgpuBackend};
use crate::dispatch::{EventDispatcher, EventHandler, Flow, HostEvent, PollTimeout};
use crate::input::platform::winit::{translate_window_event, PointerTracker};
use crate::lifecycle::LifecycleCommand;
use crate::render::{Collaborators, SpriteRenderer};
use crate::sensor::NoSensor;

use super::SnapshotFile;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Directory logical asset names resolve against.
    pub asset_dir: PathBuf,
    /// Where snapshots are written on save and read at startup.
    pub state_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "million".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            asset_dir: PathBuf::from("assets"),
            state_path: None,
        }
    }
}

/// Entry point for the windowed runtime.
pub struct Runtime;

impl Runtime {
    /// Builds the engine over wgpu and runs it until the window closes.
    pub fn run(config: RuntimeConfig, engine_config: EngineConfig, gpu_init: GpuInit) -> Result<()> {
        let snapshots = SnapshotFile::new(config.state_path.clone());
        let restored = snapshots.load().unwrap_or_else(|e| {
            log::warn!("failed to read saved state: {e}");
            None
        });

        let collaborators = Collaborators {
            assets: Box::new(DirAssetSource::new(config.asset_dir.clone())),
            decoder: Box::new(ImageCrateDecoder),
            textures: Box::new(SpriteRenderer::new()),
        };

        let engine = Engine::new(
            engine_config,
            WgpuBackend::new(gpu_init),
            NoSensor,
            collaborators,
            restored.as_deref(),
        );

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, EventDispatcher::new(engine), snapshots);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

/// Adapts winit callbacks to host events.
struct AppState<E>
where
    E: EventHandler<Arc<Window>>,
{
    config: RuntimeConfig,
    window: Option<Arc<Window>>,
    dispatcher: EventDispatcher<Arc<Window>, E>,
    snapshots: SnapshotFile,
    pointer: PointerTracker,
}

impl<E> AppState<E>
where
    E: EventHandler<Arc<Window>>,
{
    fn new(
        config: RuntimeConfig,
        dispatcher: EventDispatcher<Arc<Window>, E>,
        snapshots: SnapshotFile,
    ) -> Self {
        Self {
            config,
            window: None,
            dispatcher,
            snapshots,
            pointer: PointerTracker::default(),
        }
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        if let Some(window) = &self.window {
            return Ok(Arc::clone(window));
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        self.window = Some(Arc::clone(&window));
        Ok(window)
    }

    fn send(&mut self, event_loop: &ActiveEventLoop, event: HostEvent<Arc<Window>>) {
        if self.dispatcher.dispatch(event, &mut self.snapshots) == Flow::Exit {
            event_loop.exit();
        }
    }

    fn command(&mut self, event_loop: &ActiveEventLoop, command: LifecycleCommand<Arc<Window>>) {
        self.send(event_loop, HostEvent::Command(command));
    }
}

impl<E> ApplicationHandler for AppState<E>
where
    E: EventHandler<Arc<Window>>,
{
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::Init) {
            self.command(event_loop, LifecycleCommand::Start);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = match self.ensure_window(event_loop) {
            Ok(w) => w,
            Err(e) => {
                log::error!("{e:#}");
                self.dispatcher.shutdown();
                event_loop.exit();
                return;
            }
        };

        self.command(event_loop, LifecycleCommand::Resume);
        self.command(event_loop, LifecycleCommand::WindowInit(Some(window)));
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        self.command(event_loop, LifecycleCommand::SaveState);
        self.command(event_loop, LifecycleCommand::WindowTerm);
        self.command(event_loop, LifecycleCommand::Pause);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let command = match &event {
            WindowEvent::CloseRequested => {
                self.command(event_loop, LifecycleCommand::SaveState);
                self.command(event_loop, LifecycleCommand::DestroyRequested);
                event_loop.exit();
                return;
            }
            WindowEvent::Focused(true) => LifecycleCommand::GainedFocus,
            WindowEvent::Focused(false) => LifecycleCommand::LostFocus,
            WindowEvent::Resized(size) => {
                LifecycleCommand::WindowResized(SurfaceSize::new(size.width, size.height))
            }
            WindowEvent::ScaleFactorChanged { .. } => LifecycleCommand::ConfigChanged,
            WindowEvent::RedrawRequested => LifecycleCommand::RedrawNeeded,
            other => {
                if let Some(input) = translate_window_event(&mut self.pointer, other) {
                    self.send(event_loop, HostEvent::Input(input));
                }
                return;
            }
        };
        self.command(event_loop, command);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatcher.end_of_events();

        if self.dispatcher.is_finished() {
            event_loop.exit();
            return;
        }

        let flow = match self.dispatcher.poll_timeout() {
            PollTimeout::Infinite => ControlFlow::Wait,
            PollTimeout::Zero => ControlFlow::Poll,
        };
        event_loop.set_control_flow(flow);
    }

    fn memory_warning(&mut self, event_loop: &ActiveEventLoop) {
        self.command(event_loop, LifecycleCommand::LowMemory);
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.command(event_loop, LifecycleCommand::Stop);
        self.dispatcher.shutdown();
        self.window = None;
        log::info!("event loop exiting");
    }
}
