//! Single-level directory scanning for photo files.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Error;

/// Extensions recognised when no override is configured (lowercase, without dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "raw", "bmp", "tiff"];

/// Options controlling directory scanning.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Allowed extensions, compared case-insensitively.
    pub exts: Vec<String>,
    /// Sort results by file name instead of keeping directory iteration order.
    pub sort_by_name: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exts: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            sort_by_name: false,
        }
    }
}

/// Return `true` if `name` ends in one of `exts` after its last `.`.
///
/// Names without a dot, or whose only dot is the first character (`.png`,
/// `.hidden`), are rejected.
#[must_use]
pub fn is_photo_file<S: AsRef<str>>(name: &OsStr, exts: &[S]) -> bool {
    // Byte-level so non-UTF-8 names with a photo extension still match.
    let bytes = name.as_encoded_bytes();
    match bytes.iter().rposition(|&b| b == b'.') {
        None | Some(0) => false,
        Some(dot) => {
            let ext = &bytes[dot + 1..];
            exts.iter()
                .any(|e| e.as_ref().as_bytes().eq_ignore_ascii_case(ext))
        }
    }
}

/// Scan `dir` (not recursively) for photo files.
///
/// Paths are `dir` joined with the entry name, in directory iteration order
/// unless [`ScanOptions::sort_by_name`] is set.
///
/// # Errors
/// Returns [`Error::BadDir`] if `dir` cannot be opened as a directory.
pub fn scan_dir(dir: &Path, opts: &ScanOptions) -> Result<Vec<PathBuf>, Error> {
    // Probe first so a missing or unreadable root surfaces as one error.
    fs::read_dir(dir).map_err(|source| Error::BadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(Error::BadDir {
                    path: dir.to_path_buf(),
                    source: err.into(),
                });
            }
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        if !is_photo_file(entry.file_name(), &opts.exts) {
            debug!(path = %path.display(), "not a photo; skipping");
            continue;
        }
        if !path.is_file() {
            debug!(path = %path.display(), "not a regular file; skipping");
            continue;
        }
        out.push(path.to_path_buf());
    }

    if opts.sort_by_name {
        out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    info!(dir = %dir.display(), count = out.len(), "scanned photos");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str) -> bool {
        is_photo_file(OsStr::new(name), DEFAULT_EXTENSIONS)
    }

    #[test]
    fn matches_suffix_after_last_dot() {
        assert!(photo("a.jpg"));
        assert!(photo("c.PNG"));
        assert!(photo("archive.tar.JPEG"));
        assert!(photo("scan.Tiff"));
        assert!(!photo("b.txt"));
        assert!(!photo("photo.jpg.bak"));
        assert!(!photo("tif.tif"));
    }

    #[test]
    fn rejects_dotless_and_leading_dot_names() {
        assert!(!photo("notes"));
        assert!(!photo(".png"));
        assert!(!photo("."));
        assert!(!photo(".."));
        assert!(!photo("trailing."));
    }

    #[test]
    fn honours_extension_override() {
        let exts = ["webp"];
        assert!(is_photo_file(OsStr::new("x.WEBP"), &exts));
        assert!(!is_photo_file(OsStr::new("x.jpg"), &exts));
    }
}
