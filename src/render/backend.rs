//! The seam between photo bookkeeping and the graphics library.

use image::RgbaImage;

/// Source dimensions of a drawable texture, in pixels.
pub trait Extent {
    fn extent(&self) -> (u32, u32);

    fn width(&self) -> u32 {
        self.extent().0
    }

    fn height(&self) -> u32 {
        self.extent().1
    }
}

/// Uploads decoded images as textures and releases them again.
///
/// Upload is synchronous: the CPU-side image may be dropped as soon as
/// `upload` returns. Every texture handed out must come back through
/// `release` exactly once.
pub trait TextureBackend {
    type Texture: Extent;

    fn upload(&mut self, image: &RgbaImage) -> Self::Texture;

    fn release(&mut self, texture: Self::Texture);
}
