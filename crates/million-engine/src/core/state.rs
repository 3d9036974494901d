use crate::device::{Bundle, GraphicsBackend, SurfaceSize};
use crate::render::TextureHandle;

use super::SavedState;

/// Presentation phase, derived from whether resources are bound.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// No presentation resources.
    Uninitialized,
    /// Resources bound; frames may render.
    Ready,
}

/// The engine's single mutable aggregate.
///
/// Owned by the dispatcher's thread and passed explicitly into each
/// component. The surface size lives inside the bundle, so it cannot outlive
/// the presentation it describes.
pub struct EngineState<B: GraphicsBackend> {
    pub presentation: Option<Bundle<B>>,
    pub animating: bool,
    /// Set between GainedFocus and LostFocus; the sensor is enabled at most
    /// once per focused span.
    pub focused: bool,
    pub asset_installed: bool,
    pub installed_asset: Option<TextureHandle>,
    pub saved: SavedState,
    pub destroy_requested: bool,
    pub frames_rendered: u64,
}

impl<B: GraphicsBackend> EngineState<B> {
    pub fn new(saved: SavedState) -> Self {
        Self {
            presentation: None,
            animating: false,
            focused: false,
            asset_installed: false,
            installed_asset: None,
            saved,
            destroy_requested: false,
            frames_rendered: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.presentation.is_some() {
            Phase::Ready
        } else {
            Phase::Uninitialized
        }
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.presentation.as_ref().map(Bundle::size)
    }
}
