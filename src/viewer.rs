//! Viewer state: the selection index, the single current-photo texture, and
//! the per-frame draw list. Nothing here depends on a concrete graphics
//! library; textures come and go through a [`TextureBackend`].

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::config::Layout;
use crate::decode::{load_rgba, placeholder};
use crate::photos::PhotoList;
use crate::render::backend::{Extent, TextureBackend};
use crate::thumbnails::{free_thumbnails, load_thumbnails};

/// A navigation request from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Advance,
    Retreat,
}

/// Whether the selection changed during the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    #[default]
    Idle,
    Navigating,
}

/// RGBA8 colour multiplied into a textured quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint(pub [u8; 4]);

impl Tint {
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const YELLOW: Self = Self([253, 249, 0, 255]);

    #[must_use]
    pub fn to_f32(self) -> [f32; 4] {
        self.0.map(|c| f32::from(c) / 255.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub layout: Layout,
    pub display_scale: f32,
    pub thumbnail_scale: f32,
    pub thumbnail_spacing: f32,
    pub thumbnail_origin: (f32, f32),
    pub highlight: Tint,
    pub neutral: Tint,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        crate::config::Configuration::default().viewer_settings()
    }
}

/// One textured quad to draw, positioned by its top-left corner in pixels.
#[derive(Debug)]
pub struct DrawQuad<'a, T> {
    pub texture: &'a T,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub tint: Tint,
}

impl<T: Extent> DrawQuad<'_, T> {
    /// On-screen width and height after scaling.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size(&self) -> (f32, f32) {
        let (w, h) = self.texture.extent();
        (w as f32 * self.scale, h as f32 * self.scale)
    }
}

/// Top-left corner that anchors a scaled texture to the bottom-left of the viewport.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn main_photo_origin(viewport_h: u32, tex_h: u32, scale: f32) -> (f32, f32) {
    (0.0, viewport_h as f32 - tex_h as f32 * scale)
}

/// Left-to-right positions for thumbnails of the given widths.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn thumbnail_positions<I>(widths: I, origin: (f32, f32), spacing: f32) -> Vec<(f32, f32)>
where
    I: IntoIterator<Item = u32>,
{
    let (mut x, y) = origin;
    widths
        .into_iter()
        .map(|w| {
            let pos = (x, y);
            x += w as f32 + spacing;
            pos
        })
        .collect()
}

/// Position and scale that fit a texture inside the viewport, centered,
/// without upscaling.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centered_placement(viewport: (u32, u32), tex: (u32, u32)) -> (f32, f32, f32) {
    let (vw, vh) = (viewport.0 as f32, viewport.1 as f32);
    let (tw, th) = (tex.0.max(1) as f32, tex.1.max(1) as f32);
    let scale = (vw / tw).min(vh / th).min(1.0);
    let x = (vw - tw * scale) / 2.0;
    let y = (vh - th * scale) / 2.0;
    (x, y, scale)
}

/// Selection state plus the one full-size texture for the selected photo.
#[derive(Debug)]
pub struct Viewer<T> {
    photos: PhotoList<T>,
    index: usize,
    current: Option<T>,
    state: FrameState,
    settings: ViewerSettings,
}

impl<T: Extent> Viewer<T> {
    /// Load the first photo as the current texture, then warm the thumbnail
    /// cache (strip layout only). Returns `None` for an empty list.
    pub fn open<B>(photos: PhotoList<T>, settings: ViewerSettings, backend: &mut B) -> Option<Self>
    where
        B: TextureBackend<Texture = T>,
    {
        if photos.is_empty() {
            return None;
        }
        let mut viewer = Self {
            photos,
            index: 0,
            current: None,
            state: FrameState::Idle,
            settings,
        };
        let image = viewer.decode(0);
        viewer.current = Some(backend.upload(&image));
        drop(image);

        if settings.layout == Layout::Strip {
            load_thumbnails(&mut viewer.photos, backend, settings.thumbnail_scale);
        }
        Some(viewer)
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    #[must_use]
    pub const fn photos(&self) -> &PhotoList<T> {
        &self.photos
    }

    #[must_use]
    pub const fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.photos.get(self.index).map(|p| p.path())
    }

    #[must_use]
    pub const fn state(&self) -> FrameState {
        self.state
    }

    #[must_use]
    pub const fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Move the selection one step, swapping the current texture.
    ///
    /// At either end of the list this is a no-op and returns `false`; no
    /// texture is released or uploaded.
    pub fn navigate<B>(&mut self, nav: Navigation, backend: &mut B) -> bool
    where
        B: TextureBackend<Texture = T>,
    {
        let target = match nav {
            Navigation::Advance if self.index + 1 < self.photos.len() => self.index + 1,
            Navigation::Retreat if self.index > 0 => self.index - 1,
            _ => return false,
        };

        let image = self.decode(target);
        if let Some(old) = self.current.take() {
            backend.release(old);
        }
        self.index = target;
        self.current = Some(backend.upload(&image));
        self.state = FrameState::Navigating;
        debug!(?nav, index = self.index, "selection changed");
        true
    }

    /// Finish the frame: report what happened during it and return to idle.
    pub fn end_frame(&mut self) -> FrameState {
        std::mem::take(&mut self.state)
    }

    /// Quads for this frame, in draw order.
    ///
    /// `viewport` is in physical pixels. Strip offsets, gaps and scales are
    /// logical and get multiplied by `ui_scale` (the window scale factor).
    /// The centered layout fits the photo to physical pixels.
    #[must_use]
    pub fn frame(&self, viewport: (u32, u32), ui_scale: f32) -> Vec<DrawQuad<'_, T>> {
        let mut quads = Vec::with_capacity(self.photos.len() + 1);
        let Some(current) = self.current.as_ref() else {
            return quads;
        };

        match self.settings.layout {
            Layout::Strip => {
                let scale = self.settings.display_scale * ui_scale;
                let (x, y) = main_photo_origin(viewport.1, current.height(), scale);
                quads.push(DrawQuad {
                    texture: current,
                    x,
                    y,
                    scale,
                    tint: self.settings.neutral,
                });

                let thumbs: Vec<(usize, &T)> = self
                    .photos
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| p.thumbnail().map(|t| (i, t)))
                    .collect();
                let positions = thumbnail_positions(
                    thumbs.iter().map(|(_, t)| t.width()),
                    self.settings.thumbnail_origin,
                    self.settings.thumbnail_spacing,
                );
                for ((i, texture), (x, y)) in thumbs.into_iter().zip(positions) {
                    let tint = if i == self.index {
                        self.settings.highlight
                    } else {
                        self.settings.neutral
                    };
                    quads.push(DrawQuad {
                        texture,
                        x: x * ui_scale,
                        y: y * ui_scale,
                        scale: ui_scale,
                        tint,
                    });
                }
            }
            Layout::Centered => {
                let (x, y, scale) = centered_placement(viewport, current.extent());
                quads.push(DrawQuad {
                    texture: current,
                    x,
                    y,
                    scale,
                    tint: self.settings.neutral,
                });
            }
        }
        quads
    }

    /// Release the current texture, then the thumbnails, then the photo list.
    pub fn close<B>(mut self, backend: &mut B)
    where
        B: TextureBackend<Texture = T>,
    {
        if let Some(current) = self.current.take() {
            backend.release(current);
        }
        let thumbs = free_thumbnails(&mut self.photos, backend);
        let photos = self.photos.free(|t| backend.release(t));
        debug!(thumbs, photos, "viewer closed");
    }

    fn decode(&self, index: usize) -> RgbaImage {
        let Some(photo) = self.photos.get(index) else {
            return placeholder();
        };
        match load_rgba(photo.path()) {
            Ok(img) => img,
            Err(err) => {
                warn!(error = %err, "photo decode failed; showing placeholder");
                placeholder()
            }
        }
    }
}
