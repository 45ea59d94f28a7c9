//! YAML configuration: window, layout, thumbnail strip and scan settings.

use std::path::Path;

use anyhow::{Result, ensure};
use serde::Deserialize;

use crate::error::Error;
use crate::scan::{DEFAULT_EXTENSIONS, ScanOptions};
use crate::thumbnails::THUMBNAIL_SCALE;
use crate::viewer::{Tint, ViewerSettings};

/// How the viewer arranges the current photo on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Scaled photo anchored bottom-left with a thumbnail strip on top.
    #[default]
    Strip,
    /// Single photo fitted and centered; no thumbnails.
    Centered,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "PicPickr".to_string(),
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    pub window: WindowConfig,
    pub layout: Layout,
    /// Draw scale of the current photo in the strip layout.
    pub display_scale: f32,
    /// Downsample factor applied to thumbnails before upload.
    pub thumbnail_scale: f32,
    /// Horizontal gap between thumbnails.
    pub thumbnail_spacing: f32,
    /// Top-left corner of the thumbnail strip.
    pub thumbnail_origin: [f32; 2],
    pub highlight_tint: [u8; 4],
    pub neutral_tint: [u8; 4],
    pub background: [u8; 3],
    /// Frame cap used when the monitor does not report a refresh rate.
    pub fallback_refresh_rate: u32,
    /// Recognised photo extensions, without the dot.
    pub extensions: Vec<String>,
    pub sort_by_name: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            layout: Layout::default(),
            display_scale: 0.75,
            thumbnail_scale: THUMBNAIL_SCALE,
            thumbnail_spacing: 10.0,
            thumbnail_origin: [20.0, 40.0],
            highlight_tint: Tint::YELLOW.0,
            neutral_tint: Tint::WHITE.0,
            background: [0, 0, 0],
            fallback_refresh_rate: 60,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            sort_by_name: false,
        }
    }
}

impl Configuration {
    /// Read a YAML configuration; absent keys take their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not a valid configuration document.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate invariants serde defaults cannot express.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window width and height must be greater than zero"
        );
        ensure!(
            self.display_scale > 0.0 && self.display_scale.is_finite(),
            "display-scale must be positive"
        );
        ensure!(
            self.thumbnail_scale > 0.0 && self.thumbnail_scale <= 1.0,
            "thumbnail-scale must be in (0, 1]"
        );
        ensure!(
            self.thumbnail_spacing >= 0.0,
            "thumbnail-spacing must not be negative"
        );
        ensure!(
            !self.extensions.is_empty(),
            "extensions must list at least one suffix"
        );
        for ext in &self.extensions {
            ensure!(
                !ext.is_empty() && !ext.contains('.'),
                "extension {ext:?} must be a bare suffix without a dot"
            );
        }
        Ok(self)
    }

    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            exts: self.extensions.clone(),
            sort_by_name: self.sort_by_name,
        }
    }

    #[must_use]
    pub const fn viewer_settings(&self) -> ViewerSettings {
        ViewerSettings {
            layout: self.layout,
            display_scale: self.display_scale,
            thumbnail_scale: self.thumbnail_scale,
            thumbnail_spacing: self.thumbnail_spacing,
            thumbnail_origin: (self.thumbnail_origin[0], self.thumbnail_origin[1]),
            highlight: Tint(self.highlight_tint),
            neutral: Tint(self.neutral_tint),
        }
    }
}
