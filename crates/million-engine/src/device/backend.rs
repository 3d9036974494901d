use crate::render::ClearColor;

use super::ResourceError;

/// Drawable size of a bound surface, in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Requirements for the surface configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ConfigRequest {
    /// Minimum bits per red/green/blue channel.
    pub min_channel_bits: u8,
}

impl Default for ConfigRequest {
    fn default() -> Self {
        Self { min_channel_bits: 8 }
    }
}

/// Platform graphics API seen through the handful of operations the
/// resource manager and render driver need.
///
/// Creation order is display, config, surface, context, bind. Destruction
/// runs in reverse. Implementations must not retain handles they hand out:
/// ownership moves into the [`Bundle`] and comes back through the
/// `destroy_*`/`close_display` calls.
pub trait GraphicsBackend: Sized {
    /// Native window the surface is created for.
    type Window;
    type Display;
    type Config;
    type Surface;
    type Context;
    /// One acquired frame, alive between `begin_frame` and `present`.
    type Frame;

    fn open_display(&mut self) -> Result<Self::Display, ResourceError>;

    fn choose_config(
        &mut self,
        display: &Self::Display,
        request: &ConfigRequest,
    ) -> Result<Self::Config, ResourceError>;

    fn create_surface(
        &mut self,
        display: &Self::Display,
        config: &Self::Config,
        window: &Self::Window,
    ) -> Result<Self::Surface, ResourceError>;

    fn create_context(
        &mut self,
        display: &Self::Display,
        config: &Self::Config,
    ) -> Result<Self::Context, ResourceError>;

    /// Binds surface and context as current. Returns `false` on failure.
    fn make_current(
        &mut self,
        display: &Self::Display,
        surface: &mut Self::Surface,
        context: &Self::Context,
    ) -> bool;

    /// Actual size of a bound surface; the platform may differ from the window.
    fn query_size(&self, display: &Self::Display, surface: &Self::Surface) -> SurfaceSize;

    /// Reconfigures a bound surface for a new window size and returns the
    /// size actually applied.
    fn resize_surface(
        &mut self,
        surface: &mut Self::Surface,
        context: &Self::Context,
        size: SurfaceSize,
    ) -> SurfaceSize;

    /// Unbinds whatever is current on `display`. No-op when nothing is bound.
    fn unbind(&mut self, display: &Self::Display, surface: &mut Self::Surface);

    fn destroy_context(&mut self, display: &Self::Display, context: Self::Context);

    fn destroy_surface(&mut self, display: &Self::Display, surface: Self::Surface);

    fn close_display(&mut self, display: Self::Display);

    /// Acquires the next frame. `None` means skip this frame.
    fn begin_frame(&mut self, bundle: &mut Bundle<Self>) -> Option<Self::Frame>;

    fn clear(&mut self, bundle: &Bundle<Self>, frame: &mut Self::Frame, color: ClearColor);

    fn present(&mut self, bundle: &Bundle<Self>, frame: Self::Frame);
}

/// Display connection, surface and context acquired together.
///
/// A bundle only exists fully bound; partial states never escape
/// [`ResourceManager::acquire`](super::ResourceManager::acquire).
pub struct Bundle<B: GraphicsBackend> {
    pub(crate) display: B::Display,
    pub(crate) surface: B::Surface,
    pub(crate) context: B::Context,
    pub(crate) size: SurfaceSize,
}

impl<B: GraphicsBackend> Bundle<B> {
    pub fn display(&self) -> &B::Display {
        &self.display
    }

    pub fn surface(&self) -> &B::Surface {
        &self.surface
    }

    pub fn context(&self) -> &B::Context {
        &self.context
    }

    /// Size queried after the last bind or resize.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}
