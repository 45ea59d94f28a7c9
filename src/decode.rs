//! Decoding photos into RGBA8 buffers ready for texture upload.

use std::path::Path;

use image::{Rgba, RgbaImage, imageops};

use crate::error::Error;

/// Size of the stand-in image used when a photo cannot be decoded.
pub const PLACEHOLDER_SIZE: (u32, u32) = (160, 120);
const PLACEHOLDER_RGBA: [u8; 4] = [64, 64, 64, 255];

/// Decode the file at `path` into an RGBA8 image.
///
/// # Errors
/// Returns [`Error::Decode`] if the file is unreadable, corrupt, or in a
/// format the decoder does not support.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, Error> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Scale both dimensions by `scale`, truncating, never below 1.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let w = (width as f32 * scale) as u32;
    let h = (height as f32 * scale) as u32;
    (w.max(1), h.max(1))
}

/// Resize `img` by `scale` on both axes.
#[must_use]
pub fn downscale(img: &RgbaImage, scale: f32) -> RgbaImage {
    let (w, h) = scaled_dimensions(img.width(), img.height(), scale);
    if (w, h) == img.dimensions() {
        return img.clone();
    }
    imageops::resize(img, w, h, imageops::FilterType::Triangle)
}

/// Largest size with the same aspect ratio that fits in `max_dim` on both axes.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn fit_within(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width <= max_dim && height <= max_dim {
        return (width, height);
    }
    let scale = (max_dim as f32 / width.max(1) as f32).min(max_dim as f32 / height.max(1) as f32);
    let w = (width as f32 * scale).floor().clamp(1.0, max_dim as f32);
    let h = (height as f32 * scale).floor().clamp(1.0, max_dim as f32);
    (w as u32, h as u32)
}

/// Neutral grey stand-in for an undecodable photo.
#[must_use]
pub fn placeholder() -> RgbaImage {
    RgbaImage::from_pixel(
        PLACEHOLDER_SIZE.0,
        PLACEHOLDER_SIZE.1,
        Rgba(PLACEHOLDER_RGBA),
    )
}
