use super::{Bundle, ConfigRequest, GraphicsBackend, ResourceError, SurfaceSize};

/// Creates and destroys presentation resources as one bundle.
pub struct ResourceManager<B: GraphicsBackend> {
    backend: B,
    request: ConfigRequest,
}

impl<B: GraphicsBackend> ResourceManager<B> {
    pub fn new(backend: B) -> Self {
        Self::with_request(backend, ConfigRequest::default())
    }

    pub fn with_request(backend: B, request: ConfigRequest) -> Self {
        Self { backend, request }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Acquires display, surface and context for `window` and binds them.
    ///
    /// On failure every handle created during this attempt has already been
    /// released when the error is returned.
    pub fn acquire(&mut self, window: &B::Window) -> Result<Bundle<B>, ResourceError> {
        let b = &mut self.backend;

        let display = b.open_display()?;

        let config = match b.choose_config(&display, &self.request) {
            Ok(c) => c,
            Err(e) => {
                b.close_display(display);
                return Err(e);
            }
        };

        let mut surface = match b.create_surface(&display, &config, window) {
            Ok(s) => s,
            Err(e) => {
                b.close_display(display);
                return Err(e);
            }
        };

        let context = match b.create_context(&display, &config) {
            Ok(c) => c,
            Err(e) => {
                b.destroy_surface(&display, surface);
                b.close_display(display);
                return Err(e);
            }
        };

        if !b.make_current(&display, &mut surface, &context) {
            b.unbind(&display, &mut surface);
            b.destroy_context(&display, context);
            b.destroy_surface(&display, surface);
            b.close_display(display);
            return Err(ResourceError::Bind);
        }

        let size = b.query_size(&display, &surface);
        log::info!("presentation bound: {}x{}", size.width, size.height);

        Ok(Bundle { display, surface, context, size })
    }

    /// Releases the bundle in `slot`, leaving it empty.
    ///
    /// Returns `false` when the slot was already empty.
    pub fn release(&mut self, slot: &mut Option<Bundle<B>>) -> bool {
        let Some(bundle) = slot.take() else {
            return false;
        };

        let Bundle { display, mut surface, context, .. } = bundle;
        let b = &mut self.backend;

        b.unbind(&display, &mut surface);
        b.destroy_context(&display, context);
        b.destroy_surface(&display, surface);
        b.close_display(display);

        log::info!("presentation released");
        true
    }

    /// Reconfigures the bound surface for a new window size.
    pub fn resize(&mut self, bundle: &mut Bundle<B>, size: SurfaceSize) {
        let applied = self
            .backend
            .resize_surface(&mut bundle.surface, &bundle.context, size);
        if applied != bundle.size {
            log::debug!("surface resized to {}x{}", applied.width, applied.height);
        }
        bundle.size = applied;
    }
}
