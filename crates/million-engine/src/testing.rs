//! In-memory stand-ins for the platform: a graphics backend that counts live
//! handles, a scriptable sensor, recording asset collaborators and a
//! scripted host.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::assets::{AssetError, AssetSource, DecodedImage, ImageDecoder, PixelFormat};
use crate::core::SavedState;
use crate::device::{Bundle, ConfigRequest, GraphicsBackend, ResourceError, SurfaceSize};
use crate::dispatch::{Host, HostEvent, HostSink, PollTimeout};
use crate::input::{InputDisposition, InputEvent};
use crate::render::{
    ClearColor, Collaborators, Orientation, Position, Projection, TextureHandle, TextureStore,
};
use crate::sensor::{SensorError, SensorSample, SensorService};

// ── graphics backend ──────────────────────────────────────────────────────

/// Acquire step to fail at.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FailStep {
    Display,
    Config,
    Surface,
    Context,
    Bind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeWindow {
    pub width: u32,
    pub height: u32,
}

impl FakeWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub live_displays: i32,
    pub live_surfaces: i32,
    pub live_contexts: i32,
    pub bound: bool,
    pub frames_begun: u32,
    pub clears: u32,
    pub presents: u32,
}

#[derive(Default)]
struct BackendInner {
    fail: Option<FailStep>,
    skip_frames: bool,
    counters: Counters,
    log: Vec<&'static str>,
}

/// Clones share state, so a test keeps one as a probe.
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Rc<RefCell<BackendInner>>,
}

pub struct FakeSurface {
    size: SurfaceSize,
}

pub struct FakeContext;

pub struct FakeFrame;

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(self, step: Option<FailStep>) -> Self {
        self.set_fail(step);
        self
    }

    pub fn set_fail(&self, step: Option<FailStep>) {
        self.inner.borrow_mut().fail = step;
    }

    /// Makes `begin_frame` report an unavailable frame.
    pub fn skip_frames(&self, skip: bool) {
        self.inner.borrow_mut().skip_frames = skip;
    }

    pub fn counters(&self) -> Counters {
        self.inner.borrow().counters
    }

    pub fn log(&self) -> Vec<&'static str> {
        self.inner.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.inner.borrow_mut().log.clear();
    }

    fn step(&self, name: &'static str, step: FailStep) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.log.push(name);
        inner.fail != Some(step)
    }
}

/// Mimics a platform that only hands out even surface widths.
fn platform_size(size: SurfaceSize) -> SurfaceSize {
    SurfaceSize::new(size.width & !1, size.height)
}

impl GraphicsBackend for FakeBackend {
    type Window = FakeWindow;
    type Display = ();
    type Config = ();
    type Surface = FakeSurface;
    type Context = FakeContext;
    type Frame = FakeFrame;

    fn open_display(&mut self) -> Result<(), ResourceError> {
        if !self.step("open_display", FailStep::Display) {
            return Err(ResourceError::Display("no display".into()));
        }
        self.inner.borrow_mut().counters.live_displays += 1;
        Ok(())
    }

    fn choose_config(&mut self, _: &(), _: &ConfigRequest) -> Result<(), ResourceError> {
        if !self.step("choose_config", FailStep::Config) {
            return Err(ResourceError::Config("no matching config".into()));
        }
        Ok(())
    }

    fn create_surface(
        &mut self,
        _: &(),
        _: &(),
        window: &FakeWindow,
    ) -> Result<FakeSurface, ResourceError> {
        if !self.step("create_surface", FailStep::Surface) {
            return Err(ResourceError::Surface("window gone".into()));
        }
        self.inner.borrow_mut().counters.live_surfaces += 1;
        Ok(FakeSurface { size: SurfaceSize::new(window.width, window.height) })
    }

    fn create_context(&mut self, _: &(), _: &()) -> Result<FakeContext, ResourceError> {
        if !self.step("create_context", FailStep::Context) {
            return Err(ResourceError::Context("out of memory".into()));
        }
        self.inner.borrow_mut().counters.live_contexts += 1;
        Ok(FakeContext)
    }

    fn make_current(&mut self, _: &(), surface: &mut FakeSurface, _: &FakeContext) -> bool {
        if !self.step("make_current", FailStep::Bind) {
            return false;
        }
        surface.size = platform_size(surface.size);
        self.inner.borrow_mut().counters.bound = true;
        true
    }

    fn query_size(&self, _: &(), surface: &FakeSurface) -> SurfaceSize {
        surface.size
    }

    fn resize_surface(
        &mut self,
        surface: &mut FakeSurface,
        _: &FakeContext,
        size: SurfaceSize,
    ) -> SurfaceSize {
        surface.size = size;
        size
    }

    fn unbind(&mut self, _: &(), _: &mut FakeSurface) {
        let mut inner = self.inner.borrow_mut();
        inner.log.push("unbind");
        inner.counters.bound = false;
    }

    fn destroy_context(&mut self, _: &(), _: FakeContext) {
        let mut inner = self.inner.borrow_mut();
        inner.log.push("destroy_context");
        inner.counters.live_contexts -= 1;
    }

    fn destroy_surface(&mut self, _: &(), _: FakeSurface) {
        let mut inner = self.inner.borrow_mut();
        inner.log.push("destroy_surface");
        inner.counters.live_surfaces -= 1;
    }

    fn close_display(&mut self, _: ()) {
        let mut inner = self.inner.borrow_mut();
        inner.log.push("close_display");
        inner.counters.live_displays -= 1;
    }

    fn begin_frame(&mut self, _: &mut Bundle<Self>) -> Option<FakeFrame> {
        let mut inner = self.inner.borrow_mut();
        if inner.skip_frames {
            return None;
        }
        inner.counters.frames_begun += 1;
        Some(FakeFrame)
    }

    fn clear(&mut self, _: &Bundle<Self>, _: &mut FakeFrame, _: ClearColor) {
        self.inner.borrow_mut().counters.clears += 1;
    }

    fn present(&mut self, _: &Bundle<Self>, _: FakeFrame) {
        self.inner.borrow_mut().counters.presents += 1;
    }
}

// ── sensor ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct SensorInner {
    present: bool,
    rejecting: bool,
    enabled: bool,
    enables: usize,
    interval: Option<Duration>,
    queue: VecDeque<SensorSample>,
}

#[derive(Clone, Default)]
pub struct FakeSensor {
    inner: Rc<RefCell<SensorInner>>,
}

impl FakeSensor {
    pub fn present() -> Self {
        let s = Self::default();
        s.inner.borrow_mut().present = true;
        s
    }

    pub fn absent() -> Self {
        Self::default()
    }

    /// Refuses every enable request.
    pub fn rejecting(self) -> Self {
        self.inner.borrow_mut().rejecting = true;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().enabled
    }

    /// How many times the sensor was switched on.
    pub fn enables(&self) -> usize {
        self.inner.borrow().enables
    }

    pub fn interval(&self) -> Option<Duration> {
        self.inner.borrow().interval
    }

    pub fn push(&self, sample: SensorSample) {
        self.inner.borrow_mut().queue.push_back(sample);
    }

    pub fn queued(&self) -> usize {
        self.inner.borrow().queue.len()
    }
}

impl SensorService for FakeSensor {
    fn has_sensor(&self) -> bool {
        self.inner.borrow().present
    }

    fn enable(&mut self) -> Result<(), SensorError> {
        let mut inner = self.inner.borrow_mut();
        if inner.rejecting {
            return Err(SensorError::Rejected("busy".into()));
        }
        inner.enabled = true;
        inner.enables += 1;
        Ok(())
    }

    fn set_event_interval(&mut self, interval: Duration) -> Result<(), SensorError> {
        self.inner.borrow_mut().interval = Some(interval);
        Ok(())
    }

    fn disable(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.enabled = false;
        inner.interval = None;
    }

    fn poll_sample(&mut self) -> Option<SensorSample> {
        self.inner.borrow_mut().queue.pop_front()
    }
}

// ── asset collaborators ───────────────────────────────────────────────────

#[derive(Default)]
struct ProbeInner {
    opens: usize,
    installs: usize,
    draws: usize,
    destroys: usize,
    last_projection: Option<Projection>,
}

/// Counts calls made into the fake asset collaborators.
#[derive(Clone, Default)]
pub struct Probes {
    inner: Rc<RefCell<ProbeInner>>,
}

impl Probes {
    pub fn opens(&self) -> usize {
        self.inner.borrow().opens
    }

    pub fn installs(&self) -> usize {
        self.inner.borrow().installs
    }

    pub fn draws(&self) -> usize {
        self.inner.borrow().draws
    }

    pub fn destroys(&self) -> usize {
        self.inner.borrow().destroys
    }

    pub fn last_projection(&self) -> Option<Projection> {
        self.inner.borrow().last_projection
    }
}

/// Where the fake asset pipeline breaks down.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AssetFault {
    /// The asset source has no such name.
    Missing,
    /// The bytes do not decode.
    Undecodable,
    /// The texture store refuses the image.
    InstallRejected,
}

struct FakeAssets {
    probes: Probes,
    fault: Option<AssetFault>,
}

impl AssetSource for FakeAssets {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.probes.inner.borrow_mut().opens += 1;
        if self.fault == Some(AssetFault::Missing) {
            Err(AssetError::NotFound(name.to_string()))
        } else {
            Ok(vec![0; 16])
        }
    }
}

struct FakeDecoder {
    fail: bool,
}

impl ImageDecoder for FakeDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<DecodedImage, AssetError> {
        if self.fail {
            return Err(AssetError::Decode("truncated stream".into()));
        }
        Ok(DecodedImage {
            format: PixelFormat::Rgba8,
            width: 2,
            height: 2,
            pixels: vec![255; 16],
        })
    }
}

struct FakeTextures {
    probes: Probes,
    reject: bool,
}

impl TextureStore<FakeBackend> for FakeTextures {
    fn install(&mut self, _: &FakeContext, _: &DecodedImage) -> Option<TextureHandle> {
        let mut p = self.probes.inner.borrow_mut();
        p.installs += 1;
        if self.reject {
            return None;
        }
        Some(TextureHandle(p.installs as u32))
    }

    fn draw(
        &mut self,
        _: &FakeContext,
        _: &mut FakeFrame,
        projection: &Projection,
        _: TextureHandle,
        _: Orientation,
        _: Position,
    ) {
        let mut p = self.probes.inner.borrow_mut();
        p.draws += 1;
        p.last_projection = Some(*projection);
    }

    fn destroy(&mut self) {
        self.probes.inner.borrow_mut().destroys += 1;
    }
}

/// Collaborators whose asset source has `test.png` only when `with_asset`.
pub fn fake_collaborators(with_asset: bool) -> (Collaborators<FakeBackend>, Probes) {
    faulty_collaborators((!with_asset).then_some(AssetFault::Missing))
}

/// Collaborators that break at `fault`, or succeed throughout with `None`.
pub fn faulty_collaborators(fault: Option<AssetFault>) -> (Collaborators<FakeBackend>, Probes) {
    let probes = Probes::default();
    let collab = Collaborators {
        assets: Box::new(FakeAssets { probes: probes.clone(), fault }),
        decoder: Box::new(FakeDecoder { fail: fault == Some(AssetFault::Undecodable) }),
        textures: Box::new(FakeTextures {
            probes: probes.clone(),
            reject: fault == Some(AssetFault::InstallRejected),
        }),
    };
    (collab, probes)
}

// ── host ──────────────────────────────────────────────────────────────────

/// Plays back a fixed script of polls.
///
/// `None` entries are polls with nothing ready. Once the script runs out
/// every poll returns `None`.
#[derive(Default)]
pub struct ScriptedHost {
    script: VecDeque<Option<HostEvent<FakeWindow>>>,
    timeouts: Vec<PollTimeout>,
    snapshots: Vec<SavedState>,
    dispositions: Vec<InputDisposition>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HostEvent<FakeWindow>) {
        self.script.push_back(Some(event));
    }

    pub fn push_idle(&mut self) {
        self.script.push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn timeouts(&self) -> &[PollTimeout] {
        &self.timeouts
    }

    pub fn snapshots(&self) -> &[SavedState] {
        &self.snapshots
    }

    pub fn dispositions(&self) -> &[InputDisposition] {
        &self.dispositions
    }
}

impl HostSink for ScriptedHost {
    fn store_snapshot(&mut self, state: &SavedState) {
        self.snapshots.push(*state);
    }

    fn input_finished(&mut self, _event: &InputEvent, disposition: InputDisposition) {
        self.dispositions.push(disposition);
    }
}

impl Host for ScriptedHost {
    type Window = FakeWindow;

    fn poll(&mut self, timeout: PollTimeout) -> Option<HostEvent<FakeWindow>> {
        self.timeouts.push(timeout);
        self.script.pop_front().flatten()
    }
}
