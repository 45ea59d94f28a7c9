use std::path::PathBuf;

use thiserror::Error;

/// Library error type for picpickr operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The photo directory is missing, not a directory, or unreadable.
    #[error("cannot open photo directory {}: {source}", path.display())]
    BadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan completed but found no recognised photos.
    #[error("no photos found in folder: {}", path.display())]
    EmptyScan { path: PathBuf },

    /// A photo file exists but could not be decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Window or GPU initialisation failure.
    #[error("render error: {0}")]
    Render(anyhow::Error),
}
