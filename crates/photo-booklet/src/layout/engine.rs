//! Page layout
//!
//! Walks the sorted image sequence and assigns two images per page: even
//! indices open a new page in the top slot, odd indices fill the bottom
//! slot of the current page.

use log::Level;

use crate::cache::ResolveImage;
use crate::diagnostics::Diagnostics;
use crate::options::BookletOptions;
use crate::types::{Result, SourceImage};

use super::{BookletLayout, LayoutPage, PageSlot, PlacedImage, compute_placement};

/// Progress through the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// No open page; the next image starts one
    NoPage,
    /// The top slot of the last page is filled
    TopFilled,
}

/// Lay out `images` in order, resolving each through the cache.
///
/// A trailing page holding only a top image is kept as-is. The first
/// failing resolution aborts the layout.
pub fn layout_images<R: ResolveImage + ?Sized>(
    images: &[SourceImage],
    resolver: &mut R,
    options: &BookletOptions,
    diagnostics: &dyn Diagnostics,
) -> Result<BookletLayout> {
    let mut layout = BookletLayout::default();
    let mut state = LayoutState::NoPage;
    let count = images.len();
    let content_width = options.content_width_mm();
    let content_height = options.content_height_mm();

    for (index, image) in images.iter().enumerate() {
        let slot = PageSlot::for_index(index);

        if slot == PageSlot::Top {
            debug_assert_eq!(state, LayoutState::NoPage);
            layout.pages.push(LayoutPage {
                guide_line_y_mm: options.guide_line.enabled.then_some(options.half_page_mm),
                images: Vec::with_capacity(2),
            });
        }

        let cached = resolver.resolve(image)?;
        let name = image.display_name();

        diagnostics.report(
            Level::Info,
            &format!(
                "{}/{} name={} width={} height={} ratio={:.4}",
                index + 1,
                count,
                name,
                cached.width_px,
                cached.height_px,
                cached.aspect_ratio()
            ),
        );

        let placement = compute_placement(
            content_width,
            content_height,
            options.slot_center(slot),
            cached.width_px,
            cached.height_px,
        );

        // The page pushed above is always present here.
        if let Some(page) = layout.pages.last_mut() {
            page.images.push(PlacedImage {
                index,
                name,
                slot,
                cached,
                placement,
            });
        }

        state = match state {
            LayoutState::NoPage => LayoutState::TopFilled,
            LayoutState::TopFilled => LayoutState::NoPage,
        };
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryDiagnostics;
    use crate::types::CacheEntry;
    use std::path::PathBuf;

    struct FixedSize {
        calls: usize,
    }

    impl ResolveImage for FixedSize {
        fn resolve(&mut self, image: &SourceImage) -> Result<CacheEntry> {
            self.calls += 1;
            Ok(CacheEntry {
                path: image.path.clone(),
                width_px: 400,
                height_px: 300,
            })
        }
    }

    fn sources(n: usize) -> Vec<SourceImage> {
        (0..n)
            .map(|i| SourceImage {
                path: PathBuf::from(format!("/photos/{:03}.jpg", i)),
                relative_path: PathBuf::from(format!("{:03}.jpg", i)),
                extension: "jpg".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_page_count_is_half_rounded_up() {
        let options = BookletOptions::default();
        let diagnostics = MemoryDiagnostics::new();

        for n in 0..7 {
            let mut resolver = FixedSize { calls: 0 };
            let layout = layout_images(&sources(n), &mut resolver, &options, &diagnostics).unwrap();
            assert_eq!(layout.page_count(), n.div_ceil(2));
            assert_eq!(layout.image_count(), n);
            assert_eq!(resolver.calls, n);
        }
    }

    #[test]
    fn test_even_indices_open_pages() {
        let options = BookletOptions::default();
        let mut resolver = FixedSize { calls: 0 };
        let layout = layout_images(
            &sources(5),
            &mut resolver,
            &options,
            &MemoryDiagnostics::new(),
        )
        .unwrap();

        for (page_idx, page) in layout.pages.iter().enumerate() {
            assert_eq!(page.images[0].index, page_idx * 2);
            assert_eq!(page.images[0].slot, PageSlot::Top);
            if let Some(bottom) = page.images.get(1) {
                assert_eq!(bottom.index, page_idx * 2 + 1);
                assert_eq!(bottom.slot, PageSlot::Bottom);
            }
            assert_eq!(page.guide_line_y_mm, Some(148.0));
        }
        assert_eq!(layout.pages[2].images.len(), 1);
    }

    #[test]
    fn test_guide_line_can_be_disabled() {
        let mut options = BookletOptions::default();
        options.guide_line.enabled = false;
        let mut resolver = FixedSize { calls: 0 };
        let layout = layout_images(
            &sources(2),
            &mut resolver,
            &options,
            &MemoryDiagnostics::new(),
        )
        .unwrap();

        assert_eq!(layout.pages[0].guide_line_y_mm, None);
    }
}
