use crate::assets::DecodedImage;
use crate::device::GraphicsBackend;

use super::Projection;

/// Opaque handle to an installed texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u32);

/// How an installed texture is mapped onto its quad.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    FlipVertical,
}

/// Top-left screen position, in surface pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Texture/geometry collaborator: uploads pixel data and issues draw calls.
pub trait TextureStore<B: GraphicsBackend> {
    /// Uploads `image`. Returns `None` when the image cannot be installed.
    fn install(&mut self, context: &B::Context, image: &DecodedImage) -> Option<TextureHandle>;

    /// Records a draw of `handle` at its native size into `frame`.
    fn draw(
        &mut self,
        context: &B::Context,
        frame: &mut B::Frame,
        projection: &Projection,
        handle: TextureHandle,
        orientation: Orientation,
        position: Position,
    );

    /// Drops every installed texture. Handles become invalid.
    fn destroy(&mut self);
}
