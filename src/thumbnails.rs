//! Eager thumbnail generation for a whole [`PhotoList`].

use tracing::{debug, info, warn};

use crate::decode::{downscale, load_rgba, placeholder};
use crate::photos::PhotoList;
use crate::render::backend::TextureBackend;

/// Default thumbnail downsample factor.
pub const THUMBNAIL_SCALE: f32 = 0.25;

/// Outcome of a [`load_thumbnails`] batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThumbnailReport {
    /// Thumbnails decoded from their source file.
    pub loaded: usize,
    /// Photos that failed to decode and received a placeholder.
    pub placeholders: usize,
}

impl ThumbnailReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.loaded + self.placeholders
    }
}

/// Decode, downscale and upload a thumbnail for every photo in `photos`.
///
/// Each CPU-side image is dropped right after upload. A photo that fails to
/// decode gets a downscaled placeholder, so afterwards every entry holds a
/// thumbnail. An existing thumbnail is released before being replaced.
pub fn load_thumbnails<B: TextureBackend>(
    photos: &mut PhotoList<B::Texture>,
    backend: &mut B,
    scale: f32,
) -> ThumbnailReport {
    let mut report = ThumbnailReport::default();
    for photo in photos.iter_mut() {
        let source = match load_rgba(photo.path()) {
            Ok(img) => {
                report.loaded += 1;
                img
            }
            Err(err) => {
                warn!(error = %err, "thumbnail decode failed; using placeholder");
                report.placeholders += 1;
                placeholder()
            }
        };
        let small = downscale(&source, scale);
        drop(source);
        let texture = backend.upload(&small);
        if let Some(old) = photo.set_thumbnail(texture) {
            backend.release(old);
        }
        debug!(path = %photo.path().display(), w = small.width(), h = small.height(), "thumbnail ready");
    }
    info!(
        total = report.total(),
        loaded = report.loaded,
        placeholders = report.placeholders,
        "thumbnails loaded"
    );
    report
}

/// Release every thumbnail held by `photos`. Returns how many were released.
pub fn free_thumbnails<B: TextureBackend>(
    photos: &mut PhotoList<B::Texture>,
    backend: &mut B,
) -> usize {
    let mut released = 0;
    for photo in photos.iter_mut() {
        if let Some(texture) = photo.take_thumbnail() {
            backend.release(texture);
            released += 1;
        }
    }
    debug!(released, "thumbnails freed");
    released
}
