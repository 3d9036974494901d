use std::marker::PhantomData;

use crate::lifecycle::CommandOutcome;

use super::{EventHandler, Host, HostEvent, HostSink, PollTimeout};

/// Whether the loop keeps running after an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Drives an [`EventHandler`] from a host's event sources.
///
/// Usable in two styles:
/// - pull: [`run`](Self::run)/[`tick`](Self::tick) own the poll loop over a [`Host`]
/// - push: the host calls [`dispatch`](Self::dispatch) per event, then
///   [`end_of_events`](Self::end_of_events) once its queue is empty, and waits
///   according to [`poll_timeout`](Self::poll_timeout)
pub struct EventDispatcher<W, E> {
    handler: E,
    finished: bool,
    _window: PhantomData<fn(W)>,
}

impl<W, E: EventHandler<W>> EventDispatcher<W, E> {
    pub fn new(handler: E) -> Self {
        Self {
            handler,
            finished: false,
            _window: PhantomData,
        }
    }

    pub fn handler(&self) -> &E {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut E {
        &mut self.handler
    }

    /// True once the handler has been shut down.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Timeout for the next poll, recomputed from the current animation flag.
    pub fn poll_timeout(&self) -> PollTimeout {
        PollTimeout::for_animation(self.handler.is_animating())
    }

    /// Handles one event. Destroy is checked after every event.
    pub fn dispatch(&mut self, event: HostEvent<W>, sink: &mut dyn HostSink) -> Flow {
        if self.finished {
            return Flow::Exit;
        }

        match event {
            HostEvent::Command(command) => match self.handler.on_command(command) {
                CommandOutcome::Snapshot(saved) => sink.store_snapshot(&saved),
                CommandOutcome::Continue | CommandOutcome::Exit => {}
            },
            HostEvent::Input(input) => {
                let disposition = self.handler.on_input(&input);
                sink.input_finished(&input, disposition);
            }
            HostEvent::SensorReady => {
                self.handler.on_sensor_ready();
            }
        }

        if self.handler.destroy_requested() {
            self.shutdown();
            return Flow::Exit;
        }
        Flow::Continue
    }

    /// Runs the animation step once the host has nothing more to deliver.
    pub fn end_of_events(&mut self) {
        if !self.finished && self.handler.is_animating() {
            self.handler.animate_frame();
        }
    }

    /// Drains every ready event, then animates once.
    ///
    /// While idle the host blocks inside `poll`, so a tick only returns
    /// after animation has started or the loop is exiting.
    pub fn tick<H>(&mut self, host: &mut H) -> Flow
    where
        H: Host<Window = W>,
    {
        if self.finished {
            return Flow::Exit;
        }

        loop {
            let timeout = self.poll_timeout();
            match host.poll(timeout) {
                Some(event) => {
                    if self.dispatch(event, host) == Flow::Exit {
                        return Flow::Exit;
                    }
                }
                None if timeout == PollTimeout::Infinite => {
                    log::info!("host closed its event sources");
                    self.shutdown();
                    return Flow::Exit;
                }
                None => break,
            }
        }

        self.end_of_events();
        Flow::Continue
    }

    /// Runs until destroy is requested or the host closes.
    pub fn run<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W>,
    {
        while self.tick(host) == Flow::Continue {}
    }

    /// Releases everything the handler holds. Idempotent.
    pub fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.handler.shutdown();
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Engine, EngineConfig, Phase, SavedState};
    use crate::input::{InputDisposition, InputEvent, MotionAction, MotionEvent};
    use crate::lifecycle::LifecycleCommand;
    use crate::testing::{
        fake_collaborators, FakeBackend, FakeSensor, FakeWindow, Probes, ScriptedHost,
    };

    type TestDispatcher = EventDispatcher<FakeWindow, Engine<FakeBackend, FakeSensor>>;

    fn dispatcher(sensor: FakeSensor) -> (TestDispatcher, FakeBackend, Probes) {
        let backend = FakeBackend::new();
        let (collab, probes) = fake_collaborators(true);
        let engine = Engine::new(EngineConfig::default(), backend.clone(), sensor, collab, None);
        (EventDispatcher::new(engine), backend, probes)
    }

    fn init() -> HostEvent<FakeWindow> {
        HostEvent::Command(LifecycleCommand::WindowInit(Some(FakeWindow::new(320, 240))))
    }

    fn motion(x: f32, y: f32) -> HostEvent<FakeWindow> {
        HostEvent::Input(InputEvent::Motion(MotionEvent::single(MotionAction::Move, x, y)))
    }

    // ── poll mode ─────────────────────────────────────────────────────────

    #[test]
    fn idle_polls_block_and_animating_polls_do_not() {
        let (mut d, _backend, _probes) = dispatcher(FakeSensor::absent());
        let mut host = ScriptedHost::new();
        host.push(init());
        host.push(motion(1.0, 1.0));
        host.push_idle();

        assert_eq!(d.tick(&mut host), Flow::Continue);
        assert_eq!(
            host.timeouts(),
            &[PollTimeout::Infinite, PollTimeout::Infinite, PollTimeout::Zero]
        );
    }

    #[test]
    fn motion_scenario_renders_without_blocking() {
        let (mut d, backend, _probes) = dispatcher(FakeSensor::absent());
        let mut host = ScriptedHost::new();
        host.push(init());
        host.push(motion(120.0, 340.0));
        host.push_idle();

        d.tick(&mut host);
        let presents = backend.counters().presents;
        assert_eq!(presents, 2, "init frame plus one animation frame");

        let saved = d.handler().snapshot();
        assert_eq!((saved.last_x, saved.last_y), (120, 340));
        assert_eq!(d.poll_timeout(), PollTimeout::Zero);

        host.push_idle();
        d.tick(&mut host);
        assert_eq!(host.timeouts().last(), Some(&PollTimeout::Zero));
        assert_eq!(backend.counters().presents, presents + 1);
    }

    #[test]
    fn lost_focus_returns_to_blocking_polls() {
        let (mut d, _backend, _probes) = dispatcher(FakeSensor::present());
        let mut host = ScriptedHost::new();
        host.push(init());
        host.push(motion(1.0, 1.0));
        host.push_idle();
        d.tick(&mut host);

        host.push(HostEvent::Command(LifecycleCommand::LostFocus));
        host.push(HostEvent::Command(LifecycleCommand::DestroyRequested));
        d.tick(&mut host);

        let t = host.timeouts();
        assert_eq!(t[t.len() - 2..], [PollTimeout::Zero, PollTimeout::Infinite]);
    }

    // ── exit ──────────────────────────────────────────────────────────────

    #[test]
    fn destroy_exits_and_releases() {
        let (mut d, backend, _probes) = dispatcher(FakeSensor::present());
        let mut host = ScriptedHost::new();
        host.push(init());
        host.push(HostEvent::Command(LifecycleCommand::GainedFocus));
        host.push(HostEvent::Command(LifecycleCommand::DestroyRequested));
        host.push(motion(5.0, 5.0));

        d.run(&mut host);

        assert!(d.is_finished());
        assert_eq!(host.remaining(), 1, "events after destroy are not polled");
        let c = backend.counters();
        assert_eq!((c.live_displays, c.live_surfaces, c.live_contexts), (0, 0, 0));
        assert_eq!(d.handler().state().phase(), Phase::Uninitialized);
    }

    #[test]
    fn closed_host_shuts_down() {
        let (mut d, backend, _probes) = dispatcher(FakeSensor::absent());
        let mut host = ScriptedHost::new();
        host.push(init());

        d.run(&mut host);

        assert!(d.is_finished());
        assert_eq!(backend.counters().live_displays, 0);
        assert_eq!(d.tick(&mut host), Flow::Exit);
    }

    #[test]
    fn dispatch_after_shutdown_is_ignored() {
        let (mut d, backend, _probes) = dispatcher(FakeSensor::absent());
        let mut host = ScriptedHost::new();
        d.shutdown();
        d.shutdown();

        assert_eq!(d.dispatch(init(), &mut host), Flow::Exit);
        assert_eq!(backend.counters().live_displays, 0);
    }

    // ── sinks ─────────────────────────────────────────────────────────────

    #[test]
    fn save_state_reaches_the_host() {
        let (mut d, _backend, _probes) = dispatcher(FakeSensor::absent());
        let mut host = ScriptedHost::new();
        host.push(motion(7.0, 8.0));
        host.push(HostEvent::Command(LifecycleCommand::SaveState));
        host.push_idle();
        d.tick(&mut host);

        let stored = host.snapshots();
        assert_eq!(stored.len(), 1);
        assert_eq!((stored[0].last_x, stored[0].last_y), (7, 8));
        // Taken before the animation step of this tick.
        assert_eq!(stored[0].angle, SavedState::default().angle);
    }

    #[test]
    fn input_dispositions_are_reported() {
        let (mut d, _backend, _probes) = dispatcher(FakeSensor::absent());
        let mut host = ScriptedHost::new();
        host.push(motion(0.0, 0.0));
        host.push_idle();
        d.tick(&mut host);
        assert_eq!(host.dispositions(), &[InputDisposition::Handled]);
    }

    #[test]
    fn sensor_ready_drains_queue() {
        let sensor = FakeSensor::present();
        let (mut d, _backend, _probes) = dispatcher(sensor.clone());
        sensor.push(Default::default());
        sensor.push(Default::default());

        let mut host = ScriptedHost::new();
        assert_eq!(d.dispatch(HostEvent::SensorReady, &mut host), Flow::Continue);
        assert_eq!(sensor.queued(), 0);
    }

    // ── resource symmetry ─────────────────────────────────────────────────

    #[test]
    fn init_term_sequences_stay_balanced() {
        let (mut d, backend, _probes) = dispatcher(FakeSensor::absent());
        let mut host = ScriptedHost::new();
        let pattern = [true, true, false, false, true, false, true, true, true, false];

        for is_init in pattern {
            let event = if is_init {
                init()
            } else {
                HostEvent::Command(LifecycleCommand::WindowTerm)
            };
            d.dispatch(event, &mut host);

            let live = backend.counters().live_contexts;
            assert!(live == 0 || live == 1, "live contexts: {live}");
            assert_eq!(live == 1, d.handler().state().phase() == Phase::Ready);
        }
        d.shutdown();
        assert_eq!(backend.counters().live_contexts, 0);
    }
}
