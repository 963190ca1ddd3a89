use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("Input folder not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Input path is not a folder: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Discovery error: {0}")]
    Discovery(#[from] walkdir::Error),
    #[error("Image error in {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("No images found in {}", .0.display())]
    NoImages(PathBuf),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Post-processing failed ({reason}); uncompressed PDF left at {}", fallback.display())]
    PostProcess { fallback: PathBuf, reason: String },
}

impl BookletError {
    pub(crate) fn image(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        BookletError::Image {
            path: path.as_ref().to_owned(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions (width, height) in millimetres
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

/// Margins subtracted from a half page to obtain the content box.
///
/// The horizontal value is the total taken from the page width, the
/// vertical value the total taken from half the page height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentMargins {
    pub horizontal_mm: f32,
    pub vertical_mm: f32,
}

impl Default for ContentMargins {
    fn default() -> Self {
        Self {
            horizontal_mm: 8.0,
            vertical_mm: 4.0,
        }
    }
}

/// Largest pixel size a cached image may have (landscape orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetResolution {
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for TargetResolution {
    /// ~300 DPI across an A4 page
    fn default() -> Self {
        Self {
            width_px: 2480,
            height_px: 1748,
        }
    }
}

/// Dashed separator drawn between the two halves of a page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuideLine {
    pub enabled: bool,
    pub dash_mm: f32,
    pub gap_mm: f32,
    pub width_mm: f32,
}

impl Default for GuideLine {
    fn default() -> Self {
        Self {
            enabled: true,
            dash_mm: 1.0,
            gap_mm: 1.0,
            width_mm: 0.2,
        }
    }
}

/// An input image found during discovery. Never modified on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Canonical absolute path; its string form is the cache identity
    pub path: PathBuf,
    /// Path relative to the input folder, used for ordering and messages
    pub relative_path: PathBuf,
    /// Extension as found on disk, without the dot
    pub extension: String,
}

impl SourceImage {
    pub fn identity(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn display_name(&self) -> String {
        self.relative_path.to_string_lossy().into_owned()
    }
}

/// A normalized (landscape, downscaled) copy of a source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub width_px: u32,
    pub height_px: u32,
}

impl CacheEntry {
    pub fn aspect_ratio(&self) -> f32 {
        self.width_px as f32 / self.height_px as f32
    }
}

/// Summary of a finished booklet run
#[derive(Debug, Clone, PartialEq)]
pub struct BookletStatistics {
    pub images: usize,
    pub pages: usize,
    /// Bottom slots left empty (0 or 1)
    pub empty_slots: usize,
}
