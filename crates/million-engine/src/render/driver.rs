use crate::assets::{AssetSource, ImageDecoder};
use crate::core::{EngineConfig, EngineState};
use crate::device::{GraphicsBackend, ResourceManager};

use super::{ClearColor, Orientation, Position, Projection, TextureHandle, TextureStore};

/// External collaborators used by the render driver.
pub struct Collaborators<B: GraphicsBackend> {
    pub assets: Box<dyn AssetSource>,
    pub decoder: Box<dyn ImageDecoder>,
    pub textures: Box<dyn TextureStore<B>>,
}

/// Issues the per-frame draw sequence.
pub struct RenderDriver<B: GraphicsBackend> {
    assets: Box<dyn AssetSource>,
    decoder: Box<dyn ImageDecoder>,
    textures: Box<dyn TextureStore<B>>,

    asset_name: String,
    asset_position: Position,
    clear_color: ClearColor,
}

impl<B: GraphicsBackend> RenderDriver<B> {
    pub fn new(collaborators: Collaborators<B>, config: &EngineConfig) -> Self {
        let Collaborators { assets, decoder, textures } = collaborators;
        Self {
            assets,
            decoder,
            textures,
            asset_name: config.asset_name.clone(),
            asset_position: config.asset_position,
            clear_color: config.clear_color,
        }
    }

    /// Renders and presents one frame.
    ///
    /// Returns `false` without touching anything when no presentation is bound,
    /// and when the backend skips the frame.
    pub fn render(&mut self, state: &mut EngineState<B>, resources: &mut ResourceManager<B>) -> bool {
        let Some(bundle) = state.presentation.as_mut() else {
            return false;
        };

        let backend = resources.backend_mut();
        let Some(mut frame) = backend.begin_frame(bundle) else {
            return false;
        };

        backend.clear(bundle, &mut frame, self.clear_color);
        let projection = Projection::ortho_top_left(bundle.size());

        if !state.asset_installed {
            state.installed_asset = self.install_asset(bundle.context());
            state.asset_installed = true;
        }

        if let Some(handle) = state.installed_asset {
            self.textures.draw(
                bundle.context(),
                &mut frame,
                &projection,
                handle,
                Orientation::Normal,
                self.asset_position,
            );
        }

        backend.present(bundle, frame);
        state.frames_rendered += 1;
        log::trace!("frame {} presented", state.frames_rendered);
        true
    }

    /// Drops installed textures and marks the asset for reinstallation.
    pub fn discard_assets(&mut self, state: &mut EngineState<B>) {
        if state.installed_asset.take().is_some() {
            log::debug!("discarding installed asset {}", self.asset_name);
        }
        self.textures.destroy();
        state.asset_installed = false;
    }

    fn install_asset(&mut self, context: &B::Context) -> Option<TextureHandle> {
        let bytes = match self.assets.open(&self.asset_name) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("{e}; rendering without it");
                return None;
            }
        };

        let image = match self.decoder.decode(&bytes) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("{}: {e}; rendering without it", self.asset_name);
                return None;
            }
        };

        log::info!("image: {}x{} ({:?})", image.width, image.height, image.format);

        let handle = self.textures.install(context, &image);
        if handle.is_none() {
            log::warn!("texture install failed for {}", self.asset_name);
        }
        handle
    }
}
