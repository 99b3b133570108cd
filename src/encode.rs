//! Encoding images into the text payload handed to the display surface.
//!
//! The rendering surface consumes text, so every image leaves the core as
//! standard base64 over a compressed raster:
//!
//! | Caller | Codec | Why |
//! |---|---|---|
//! | Navigation (`first`/`next`/`previous`) | PNG | lossless view of the slot |
//! | Transforms | JPEG at [`Quality`] | lossy, fast to re-encode on every nudge |
//!
//! When there is nothing to show, callers return [`Payload::Nothing`], which
//! renders as the sentinel `"-"`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::DynamicImage;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Encode failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Quality setting for lossy encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// What a core call hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Base64 text of an encoded image.
    Image(String),
    /// Intentional non-result; the host treats it as a no-op.
    Nothing,
}

impl Payload {
    pub const SENTINEL: &'static str = "-";

    pub fn as_str(&self) -> &str {
        match self {
            Payload::Image(text) => text,
            Payload::Nothing => Self::SENTINEL,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Payload::Nothing)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PNG-encode the image and wrap it as a payload.
pub fn encode_lossless(img: &DynamicImage) -> Result<Payload, EncodeError> {
    let mut buf = Vec::new();
    img.write_with_encoder(PngEncoder::new(&mut buf))?;
    Ok(Payload::Image(STANDARD.encode(&buf)))
}

/// JPEG-encode the image at `quality` and wrap it as a payload.
///
/// JPEG has no alpha, so anything other than 8-bit gray or RGB is flattened
/// to RGB first.
pub fn encode_lossy(img: &DynamicImage, quality: Quality) -> Result<Payload, EncodeError> {
    let flattened;
    let img = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        other => {
            flattened = DynamicImage::ImageRgb8(other.to_rgb8());
            &flattened
        }
    };

    let mut buf = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.value()))?;
    Ok(Payload::Image(STANDARD.encode(&buf)))
}
