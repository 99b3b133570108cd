//! Shared test utilities for the image-viewer test suite.
//!
//! Provides in-memory image builders, byte encoders, and temp-directory
//! fixtures so tests never depend on image files checked into the repo.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = fixture_dir(&[
//!     ("a.png", Fixture::Png(4, 3)),
//!     ("b.jpg", Fixture::Jpeg(6, 5)),
//!     ("c.txt", Fixture::Text("not an image")),
//! ]);
//! let collection = load_all(tmp.path()).unwrap();
//! assert_eq!(loaded_names(&collection), vec!["a.png", "b.jpg"]);
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageBuffer, ImageEncoder, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use tempfile::TempDir;

use crate::collection::ImageCollection;
use crate::encode::Payload;

// =========================================================================
// Image builders
// =========================================================================

/// A single-colour RGB image.
pub fn solid_rgb(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// An RGB image with distinct values per pixel, useful for spotting changes.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 16 % 256) as u8, (y * 16 % 256) as u8, 128])
    }))
}

/// A single-colour RGB image with 16-bit channels.
pub fn solid_rgb16(width: u32, height: u32, rgb: [u16; 3]) -> DynamicImage {
    DynamicImage::ImageRgb16(ImageBuffer::from_pixel(width, height, Rgb(rgb)))
}

// =========================================================================
// Encoders
// =========================================================================

pub fn encode_png(img: &DynamicImage) -> Vec<u8> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
    buf
}

pub fn encode_jpeg(img: &DynamicImage) -> Vec<u8> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut buf)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
    buf
}

/// PNG bytes that keep the image's own sample depth.
pub fn encode_png_native(img: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
    buf
}

/// Decode a payload back into pixels. Panics on the sentinel.
pub fn decode_payload(payload: &Payload) -> DynamicImage {
    assert!(!payload.is_sentinel(), "expected an image payload, got the sentinel");
    let bytes = STANDARD.decode(payload.as_str()).unwrap();
    image::load_from_memory(&bytes).unwrap()
}

// =========================================================================
// Directory fixtures
// =========================================================================

/// File contents for [`fixture_dir`].
pub enum Fixture {
    Png(u32, u32),
    Jpeg(u32, u32),
    /// A solid 16-bit PNG at the given channel value.
    Png16(u32, u32, u16),
    Text(&'static str),
}

/// Create a temp directory holding the given files.
///
/// Image fixtures are gradients of the requested size, so tests can tell
/// images apart by their dimensions.
pub fn fixture_dir(files: &[(&str, Fixture)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, fixture) in files {
        let bytes = match fixture {
            Fixture::Png(w, h) => encode_png(&gradient_rgb(*w, *h)),
            Fixture::Jpeg(w, h) => encode_jpeg(&gradient_rgb(*w, *h)),
            Fixture::Png16(w, h, v) => encode_png_native(&solid_rgb16(*w, *h, [*v; 3])),
            Fixture::Text(text) => text.as_bytes().to_vec(),
        };
        std::fs::write(tmp.path().join(name), bytes).unwrap();
    }
    tmp
}

/// All loaded file names in collection order.
pub fn loaded_names(collection: &ImageCollection) -> Vec<&str> {
    collection.files().map(|f| f.name.as_str()).collect()
}
