//! Adjustments applied to the image under the cursor.
//!
//! Both operations take a caller magnitude and shift it by
//! [`NORMAL_BRIGHTNESS_OFFSET`] before use, so the slider's neutral position
//! (`50`) maps to a net-zero adjustment:
//!
//! | Operation | Host name | Effective parameter | Pixel work |
//! |---|---|---|---|
//! | [`Operation::Brighten`] | `bright` | percentage, clamped to ±100 | `image::DynamicImage::brighten` |
//! | [`Operation::Sharpen`] | `sharpen` | Gaussian sigma, capped at [`MAX_SHARPEN_SIGMA`], no-op when ≤ 0 | `image::DynamicImage::unsharpen` |
//!
//! Non-finite effective parameters leave the image unchanged.
//!
//! Results are written back over the slot they were computed from, so
//! repeated calls compound: two `bright 60` calls brighten by 20%, not 10%.

use image::DynamicImage;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Calibration shift applied to every magnitude.
pub const NORMAL_BRIGHTNESS_OFFSET: f64 = -50.0;

/// Largest Gaussian sigma `sharpen` will blur with. The blur kernel grows
/// linearly with sigma.
pub const MAX_SHARPEN_SIGMA: f64 = 100.0;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Brighten,
    Sharpen,
}

impl Operation {
    /// The parameter the operation actually runs with.
    pub fn effective(magnitude: f64) -> f64 {
        magnitude + NORMAL_BRIGHTNESS_OFFSET
    }

    /// Compute the adjusted image. The source is left untouched.
    pub fn apply(self, img: &DynamicImage, magnitude: f64) -> DynamicImage {
        let effective = Self::effective(magnitude);
        match self {
            Operation::Brighten => adjust_brightness(img, effective),
            Operation::Sharpen => sharpen(img, effective),
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bright" => Ok(Operation::Brighten),
            "sharpen" => Ok(Operation::Sharpen),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Brighten => f.write_str("bright"),
            Operation::Sharpen => f.write_str("sharpen"),
        }
    }
}

/// Shift every colour channel by `percentage` of full scale.
///
/// Full scale is the channel maximum of the image's own sample type, so a
/// 16-bit image moves as far as an 8-bit one. Float images are converted to
/// RGBA8 first. Alpha is left alone; channels saturate at the ends of their
/// range.
pub fn adjust_brightness(img: &DynamicImage, percentage: f64) -> DynamicImage {
    if !percentage.is_finite() {
        return img.clone();
    }
    let percentage = percentage.clamp(-100.0, 100.0);
    let delta = |full_scale: f64| (full_scale * percentage / 100.0).round() as i32;
    match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => brighten_by(img.clone(), delta(f64::from(u8::MAX))),
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => brighten_by(img.clone(), delta(f64::from(u16::MAX))),
        other => brighten_by(
            DynamicImage::ImageRgba8(other.to_rgba8()),
            delta(f64::from(u8::MAX)),
        ),
    }
}

fn brighten_by(img: DynamicImage, delta: i32) -> DynamicImage {
    if delta == 0 { img } else { img.brighten(delta) }
}

/// The sigma `sharpen` blurs with, or `None` when it should do nothing.
pub fn sharpen_sigma(sigma: f64) -> Option<f32> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    Some(sigma.min(MAX_SHARPEN_SIGMA) as f32)
}

/// Unsharp mask with threshold 0: `src + (src - blur(src, sigma))`.
pub fn sharpen(img: &DynamicImage, sigma: f64) -> DynamicImage {
    match sharpen_sigma(sigma) {
        Some(sigma) => img.unsharpen(sigma, 0),
        None => img.clone(),
    }
}
