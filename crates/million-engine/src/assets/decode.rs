use image::DynamicImage;

use super::AssetError;

/// Pixel layout of a decoded image, 8 bits per channel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    Rgba8,
    Rgb8,
    Gray8,
    GrayAlpha8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::Rgb8 => 3,
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
        }
    }
}

/// Tightly packed, row-major pixel buffer tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Expands the buffer to RGBA8, the layout textures are uploaded in.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let px = &self.pixels;
        match self.format {
            PixelFormat::Rgba8 => px.clone(),
            PixelFormat::Rgb8 => px
                .chunks_exact(3)
                .flat_map(|c| [c[0], c[1], c[2], 255])
                .collect(),
            PixelFormat::Gray8 => px.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            PixelFormat::GrayAlpha8 => px
                .chunks_exact(2)
                .flat_map(|c| [c[0], c[0], c[0], c[1]])
                .collect(),
        }
    }

    /// Whether the buffer length matches the declared size and format.
    pub fn is_consistent(&self) -> bool {
        let expected = self.width as usize * self.height as usize * self.format.bytes_per_pixel();
        self.width > 0 && self.height > 0 && self.pixels.len() == expected
    }
}

/// Turns an encoded byte buffer into pixels.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, AssetError>;
}

/// Decoder backed by the `image` crate (PNG, JPEG, BMP).
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
        let (width, height) = (img.width(), img.height());

        let (format, pixels) = match img {
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb8, buf.into_raw()),
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Gray8, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelFormat::GrayAlpha8, buf.into_raw()),
            other => (PixelFormat::Rgba8, other.to_rgba8().into_raw()),
        };

        Ok(DecodedImage { format, width, height, pixels })
    }
}
