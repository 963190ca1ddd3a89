//! Input image discovery

use std::path::Path;
use walkdir::WalkDir;

use crate::types::*;

/// Whether `path` has one of `extensions`, ignoring ASCII case
pub fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Collect matching images under `folder`, recursively, sorted by their
/// path relative to `folder`.
///
/// Fails before touching anything else if `folder` is missing or not a
/// directory.
pub fn discover_images(folder: impl AsRef<Path>, extensions: &[String]) -> Result<Vec<SourceImage>> {
    let folder = folder.as_ref();
    if !folder.exists() {
        return Err(BookletError::InputNotFound(folder.to_owned()));
    }
    if !folder.is_dir() {
        return Err(BookletError::NotADirectory(folder.to_owned()));
    }

    let root = folder.canonicalize()?;
    let mut images = Vec::new();

    // Symlinked images and folders are followed like regular ones.
    for entry in WalkDir::new(&root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_image_extension(entry.path(), extensions) {
            continue;
        }

        let path = entry.path().to_path_buf();
        let relative_path = path
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        images.push(SourceImage {
            path,
            relative_path,
            extension,
        });
    }

    images.sort_by(|a, b| {
        a.relative_path
            .to_string_lossy()
            .cmp(&b.relative_path.to_string_lossy())
    });

    Ok(images)
}
