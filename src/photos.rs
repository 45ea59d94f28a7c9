//! Owned, ordered list of scanned photos.
//!
//! Each [`Photo`] bundles its path with an optional thumbnail handle, so a
//! thumbnail can never drift out of alignment with the file it depicts.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::Error;
use crate::scan::{ScanOptions, scan_dir};

/// One scanned photo file plus its thumbnail, once loaded.
#[derive(Debug)]
pub struct Photo<T> {
    path: PathBuf,
    thumbnail: Option<T>,
}

impl<T> Photo<T> {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            thumbnail: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn thumbnail(&self) -> Option<&T> {
        self.thumbnail.as_ref()
    }

    /// Attach a thumbnail, returning the one it replaces.
    pub fn set_thumbnail(&mut self, thumbnail: T) -> Option<T> {
        self.thumbnail.replace(thumbnail)
    }

    pub fn take_thumbnail(&mut self) -> Option<T> {
        self.thumbnail.take()
    }
}

/// Ordered photo collection for one viewing session.
///
/// Order is the scanner's output order. The list is append-only; it is
/// destroyed once through [`PhotoList::free`], which consumes it.
#[derive(Debug)]
pub struct PhotoList<T = ()> {
    photos: Vec<Photo<T>>,
}

impl<T> Default for PhotoList<T> {
    fn default() -> Self {
        Self { photos: Vec::new() }
    }
}

impl<T> PhotoList<T> {
    /// Construct a list from already-scanned paths, keeping their order.
    #[must_use]
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        paths.into_iter().collect()
    }

    /// Scan `dir` and wrap the result.
    ///
    /// # Errors
    /// Returns [`Error::BadDir`] if the directory cannot be opened.
    pub fn scan(dir: &Path, opts: &ScanOptions) -> Result<Self, Error> {
        scan_dir(dir, opts).map(Self::from_paths)
    }

    /// Scan `dir`, reporting an unreadable directory and yielding an empty
    /// list instead of failing. Callers treat an empty list as "nothing to show".
    #[must_use]
    pub fn load(dir: &Path, opts: &ScanOptions) -> Self {
        Self::scan(dir, opts).unwrap_or_else(|err| {
            error!(error = %err, "photo scan failed");
            Self::default()
        })
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
    pub fn get(&self, index: usize) -> Option<&Photo<T>> {
        self.photos.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Photo<T>> {
        self.photos.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Photo<T>> {
        self.photos.iter_mut()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.photos.iter().map(Photo::path)
    }

    /// Number of photos that currently hold a thumbnail.
    #[must_use]
    pub fn thumbnail_count(&self) -> usize {
        self.photos.iter().filter(|p| p.thumbnail.is_some()).count()
    }

    /// Destroy the list: hand every remaining thumbnail to `release`, then
    /// drop the paths. Returns the number of photos freed.
    pub fn free(self, mut release: impl FnMut(T)) -> usize {
        let count = self.photos.len();
        let mut released = 0usize;
        for photo in self.photos {
            if let Some(thumb) = photo.thumbnail {
                release(thumb);
                released += 1;
            }
        }
        debug!(count, released, "photo list freed");
        count
    }
}

impl<T> Extend<PathBuf> for PhotoList<T> {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        self.photos.extend(paths.into_iter().map(Photo::new));
    }
}

impl<T> FromIterator<PathBuf> for PhotoList<T> {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(paths: I) -> Self {
        let mut list = Self::default();
        list.extend(paths);
        list
    }
}

impl<'a, T> IntoIterator for &'a PhotoList<T> {
    type Item = &'a Photo<T>;
    type IntoIter = std::slice::Iter<'a, Photo<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.photos.iter()
    }
}
