//! On-disk cache of normalized images
//!
//! Each source image is decoded, turned landscape, downscaled to the
//! target resolution and written once. A cache entry is valid as long as
//! its file exists; source modification times are not checked, so
//! replacing a source file under the same path yields a stale entry.

use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use log::Level;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CACHE_FOLDER_NAME;
use crate::diagnostics::Diagnostics;
use crate::types::*;

/// Something that turns a source image into a cached, normalized copy
pub trait ResolveImage {
    fn resolve(&mut self, image: &SourceImage) -> Result<CacheEntry>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

pub struct ImageCache<'a> {
    dir: PathBuf,
    target: TargetResolution,
    diagnostics: &'a dyn Diagnostics,
    stats: CacheStats,
}

/// `.CACHE` next to the running executable, or in the working directory
/// when the executable path is unknown.
pub fn default_cache_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_FOLDER_NAME)
}

/// Lowercase hex SHA-256 of the identity string
pub fn identity_hash(identity: &str) -> String {
    hex::encode(Sha256::digest(identity.as_bytes()))
}

/// Largest size within `max` that keeps the aspect ratio, never larger
/// than the input.
pub fn fit_within(width: u32, height: u32, max: TargetResolution) -> (u32, u32) {
    if width <= max.width_px && height <= max.height_px {
        return (width, height);
    }

    let scale = f64::min(
        max.width_px as f64 / width as f64,
        max.height_px as f64 / height as f64,
    );
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max.width_px);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max.height_px);
    (new_width, new_height)
}

/// Rotate portrait images a quarter turn counter-clockwise and downscale.
pub fn normalize(image: DynamicImage, max: TargetResolution) -> DynamicImage {
    let image = if image.height() > image.width() {
        image.rotate270()
    } else {
        image
    };

    let (width, height) = fit_within(image.width(), image.height(), max);
    if (width, height) == (image.width(), image.height()) {
        image
    } else {
        image.resize_exact(width, height, FilterType::Lanczos3)
    }
}

/// Decode by content rather than extension, so a PNG named `.jpg` still opens.
fn decode(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(|e| BookletError::image(path, e))
}

impl<'a> ImageCache<'a> {
    /// Open (and create if needed) a cache directory
    pub fn open(
        dir: impl Into<PathBuf>,
        target: TargetResolution,
        diagnostics: &'a dyn Diagnostics,
    ) -> Result<Self> {
        if target.width_px == 0 || target.height_px == 0 {
            return Err(BookletError::Config(
                "Target resolution must be non-zero".to_string(),
            ));
        }

        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            target,
            diagnostics,
            stats: CacheStats::default(),
        })
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Path the cached copy of `image` lives at
    pub fn entry_path(&self, image: &SourceImage) -> PathBuf {
        let hash = identity_hash(&image.identity());
        if image.extension.is_empty() {
            self.dir.join(hash)
        } else {
            self.dir.join(format!("{}.{}", hash, image.extension))
        }
    }

    fn populate(&self, image: &SourceImage, cached_path: &Path) -> Result<(u32, u32)> {
        let format = ImageFormat::from_extension(&image.extension).ok_or_else(|| {
            BookletError::Config(format!(
                "Unsupported image extension '{}' for {}",
                image.extension,
                image.display_name()
            ))
        })?;

        let decoded = decode(&image.path)?;
        let normalized = normalize(decoded, self.target);
        let normalized = match format {
            // JPEG has no alpha channel
            ImageFormat::Jpeg if normalized.color().has_alpha() => {
                DynamicImage::ImageRgb8(normalized.to_rgb8())
            }
            _ => normalized,
        };

        // Written under a temporary name first so an interrupted run
        // never leaves a truncated entry behind.
        let partial = cached_path.with_extension(format!("{}.partial", image.extension));
        normalized
            .save_with_format(&partial, format)
            .map_err(|e| BookletError::image(&image.path, e))?;
        fs::rename(&partial, cached_path)?;

        Ok((normalized.width(), normalized.height()))
    }
}

impl ResolveImage for ImageCache<'_> {
    fn resolve(&mut self, image: &SourceImage) -> Result<CacheEntry> {
        let cached_path = self.entry_path(image);

        let (width_px, height_px) = if cached_path.exists() {
            self.stats.hits += 1;
            image::image_dimensions(&cached_path)
                .map_err(|e| BookletError::image(&cached_path, e))?
        } else {
            self.stats.misses += 1;
            self.diagnostics.report(
                Level::Info,
                &format!("Resizing and caching {}.", image.display_name()),
            );
            self.populate(image, &cached_path)?
        };

        Ok(CacheEntry {
            path: cached_path,
            width_px,
            height_px,
        })
    }
}
