//! Shared constants for booklet assembly
//!
//! This module centralizes magic numbers used by the cache, layout and
//! rendering stages.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Page Layout
// =============================================================================

/// Images placed on one output page (top and bottom half)
pub const IMAGES_PER_PAGE: usize = 2;

/// Distance from the top of the page to the guide line on A4 (one A5 short side)
pub const A4_HALF_PAGE_MM: f32 = 148.0;

// =============================================================================
// Discovery and Cache
// =============================================================================

/// Image extensions picked up from the input folder (compared case-insensitively)
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Cache folder name, created next to the executable by default
pub const CACHE_FOLDER_NAME: &str = ".CACHE";

/// Suffix appended to the output path for the full-size artifact
pub const LARGE_SUFFIX: &str = ".large";

// =============================================================================
// PDF Output
// =============================================================================

/// PDF version written by the renderer
pub const PDF_VERSION: &str = "1.4";
