//! Decoding source files into in-memory pixel buffers.
//!
//! Two concerns live here:
//!
//! - **Eligibility**: whether a directory entry is worth opening at all,
//!   decided purely from its name.
//! - **Decoding**: turning a byte stream into a [`DynamicImage`], with the
//!   format sniffed from the content rather than trusted from the name.
//!
//! ## Eligibility is a substring match
//!
//! A name is eligible when it *contains* `.jpg` or `.png` anywhere, not only
//! as a suffix:
//!
//! | Name | Eligible |
//! |---|---|
//! | `a.png` | yes |
//! | `holiday.jpg.bak` | yes (then fails to decode and is skipped) |
//! | `notajpgimage.txt` | no (`jpg` without the dot) |
//! | `photo.JPG` | no (case-sensitive) |
//!
//! Directories that browse fine today rely on this behavior, so tightening it
//! to a suffix check would change which files show up.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;
use thiserror::Error;

/// Name fragments that mark a directory entry as a decode candidate.
pub const ELIGIBLE_EXTENSIONS: &[&str] = &[".jpg", ".png"];

/// Formats the viewer will decode once sniffed from the content.
const DECODABLE_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png];

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Decode failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Whether a file name passes the extension filter.
pub fn is_eligible(name: &str) -> bool {
    ELIGIBLE_EXTENSIONS.iter().any(|ext| name.contains(ext))
}

/// Decode an image from a stream positioned at the start of the file.
///
/// Never returns a partial buffer: any malformed or unsupported input is an
/// error and the caller decides whether to skip it.
pub fn decode<R: BufRead + Seek>(reader: R) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(reader).with_guessed_format()?;
    match reader.format() {
        Some(format) if DECODABLE_FORMATS.contains(&format) => Ok(reader.decode()?),
        Some(format) => Err(DecodeError::UnsupportedFormat(format!("{format:?}"))),
        None => Err(DecodeError::UnsupportedFormat("unrecognized content".into())),
    }
}

/// Open and decode a file from disk.
pub fn decode_file(path: &Path) -> Result<DynamicImage, DecodeError> {
    let file = File::open(path)?;
    decode(BufReader::new(file))
}
