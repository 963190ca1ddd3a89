//! Layout data types
//!
//! These sit between the cache and PDF rendering: a [`BookletLayout`] is
//! everything the renderer needs, with no image decoding left to do.

use crate::types::CacheEntry;

/// Which half of the page an image occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// Upper half; even image indices start a new page here
    Top,
    /// Lower half; odd image indices complete the page
    Bottom,
}

impl PageSlot {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            PageSlot::Top
        } else {
            PageSlot::Bottom
        }
    }
}

/// Which content box dimension an image is scaled to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Width,
    Height,
}

/// Draw rectangle for one image, in mm from the top-left page corner
///
/// Only one dimension is stored; the other follows from the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub fit: Fit,
    /// Width when fitted to width, height when fitted to height
    pub target_mm: f32,
    /// Image width / height
    pub aspect_ratio: f32,
}

impl Placement {
    pub fn width_mm(&self) -> f32 {
        match self.fit {
            Fit::Width => self.target_mm,
            Fit::Height => self.target_mm * self.aspect_ratio,
        }
    }

    pub fn height_mm(&self) -> f32 {
        match self.fit {
            Fit::Width => self.target_mm / self.aspect_ratio,
            Fit::Height => self.target_mm,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    /// Position of the image in the sorted input sequence
    pub index: usize,
    pub name: String,
    pub slot: PageSlot,
    pub cached: CacheEntry,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutPage {
    /// y of the dashed guide line in mm, if drawn
    pub guide_line_y_mm: Option<f32>,
    pub images: Vec<PlacedImage>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookletLayout {
    pub pages: Vec<LayoutPage>,
}

impl BookletLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }
}
