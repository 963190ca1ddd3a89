//! Booklet assembly
//!
//! This module orchestrates a run:
//! 1. Discover and sort the input images
//! 2. Resolve each image through the cache and lay out the pages
//! 3. Render the PDF
//! 4. Write it out, optionally through an external optimizer
//!
//! The work is strictly sequential. The async entry point only moves the
//! whole pipeline onto one blocking task.

mod io;

pub use io::{ExportOutcome, export, large_artifact_path};

use log::Level;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{CacheStats, ImageCache, ResolveImage};
use crate::diagnostics::Diagnostics;
use crate::discover::discover_images;
use crate::layout::layout_images;
use crate::options::BookletOptions;
use crate::postprocess::PostProcessor;
use crate::render::{render_document, save_to_bytes};
use crate::types::*;

/// Build the booklet PDF for `input_folder` and return its bytes.
pub fn build<R: ResolveImage + ?Sized>(
    input_folder: &Path,
    options: &BookletOptions,
    resolver: &mut R,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<u8>> {
    options.validate()?;
    let images = discover(input_folder, options, diagnostics)?;
    build_images(&images, options, resolver, diagnostics)
}

/// Build the booklet PDF for an already sorted image sequence.
pub fn build_images<R: ResolveImage + ?Sized>(
    images: &[SourceImage],
    options: &BookletOptions,
    resolver: &mut R,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<u8>> {
    let layout = layout_images(images, resolver, options, diagnostics)?;
    let document = render_document(&layout, options)?;
    save_to_bytes(document)
}

fn discover(
    input_folder: &Path,
    options: &BookletOptions,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<SourceImage>> {
    diagnostics.report(
        Level::Info,
        &format!("Loading from folder: {}.", input_folder.display()),
    );

    let images = discover_images(input_folder, &options.extensions)?;
    diagnostics.report(Level::Info, &format!("Found {} images.", images.len()));
    if images.is_empty() {
        return Err(BookletError::NoImages(input_folder.to_owned()));
    }
    Ok(images)
}

/// Everything needed for one run
pub struct AssembleRequest {
    pub input_folder: PathBuf,
    pub output: PathBuf,
    pub cache_dir: PathBuf,
    pub options: BookletOptions,
    pub post_processor: Option<Arc<dyn PostProcessor>>,
    pub diagnostics: Arc<dyn Diagnostics>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssembleReport {
    pub statistics: BookletStatistics,
    pub cache: CacheStats,
    pub output: PathBuf,
    pub optimized: bool,
}

/// Run the whole pipeline: discover, cache, lay out, render and export.
pub async fn assemble(request: AssembleRequest) -> Result<AssembleReport> {
    tokio::task::spawn_blocking(move || assemble_sync(&request)).await?
}

fn assemble_sync(request: &AssembleRequest) -> Result<AssembleReport> {
    let diagnostics = request.diagnostics.as_ref();
    request.options.validate()?;

    // Discovery runs first so a bad input folder fails before the
    // cache directory is created.
    let images = discover(&request.input_folder, &request.options, diagnostics)?;

    let mut cache = ImageCache::open(
        &request.cache_dir,
        request.options.target_resolution,
        diagnostics,
    )?;
    let bytes = build_images(&images, &request.options, &mut cache, diagnostics)?;

    let outcome = export(
        &bytes,
        &request.output,
        request.post_processor.as_deref(),
        diagnostics,
    )?;

    Ok(AssembleReport {
        statistics: crate::stats::calculate_statistics(images.len()),
        cache: cache.stats(),
        output: outcome.path,
        optimized: outcome.optimized,
    })
}
