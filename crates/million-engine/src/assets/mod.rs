//! Asset collaborators.
//!
//! Opening named resources and decoding them into pixel data are kept behind
//! traits so the render driver never touches files or codecs directly.

mod decode;
mod error;
mod source;

pub use decode::{DecodedImage, ImageCrateDecoder, ImageDecoder, PixelFormat};
pub use error::AssetError;
pub use source::{AssetSource, DirAssetSource};
