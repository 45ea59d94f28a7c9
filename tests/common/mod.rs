//! Shared fixtures: an in-memory texture backend and tiny on-disk photos.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use picpickr::render::backend::{Extent, TextureBackend};

#[derive(Debug, PartialEq, Eq)]
pub struct FakeTexture {
    pub id: u32,
    pub w: u32,
    pub h: u32,
}

impl Extent for FakeTexture {
    fn extent(&self) -> (u32, u32) {
        (self.w, self.h)
    }
}

/// Records every upload and release in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    pub uploads: Vec<(u32, u32, u32)>,
    pub released: Vec<u32>,
}

impl RecordingBackend {
    pub fn live(&self) -> usize {
        self.uploads.len() - self.released.len()
    }
}

impl TextureBackend for RecordingBackend {
    type Texture = FakeTexture;

    fn upload(&mut self, image: &RgbaImage) -> FakeTexture {
        let id = self.next_id;
        self.next_id += 1;
        self.uploads.push((id, image.width(), image.height()));
        FakeTexture {
            id,
            w: image.width(),
            h: image.height(),
        }
    }

    fn release(&mut self, texture: FakeTexture) {
        assert!(
            !self.released.contains(&texture.id),
            "texture {} released twice",
            texture.id
        );
        self.released.push(texture.id);
    }
}

/// Write a solid-colour PNG of the given size.
pub fn write_png(path: &Path, w: u32, h: u32) {
    RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]))
        .save(path)
        .expect("write png");
}

/// Create `names` as valid PNGs of size `w`x`h` under `dir`, in order.
pub fn photo_dir(dir: &Path, names: &[&str], w: u32, h: u32) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            write_png(&path, w, h);
            path
        })
        .collect()
}

pub fn write_garbage(path: &Path) {
    fs::write(path, b"definitely not an image").expect("write garbage");
}
