//! Image placement within a slot
//!
//! Fits an image into the content box of a half page while keeping its
//! aspect ratio, centered on the slot center. Everything here is pure
//! geometry in millimetres with the origin at the top-left of the page.

use super::{Fit, Placement};

/// Calculate where and how large an image is drawn.
///
/// Images relatively wider than the content box (ratio >= content ratio)
/// are fitted to the content width, all others to the content height.
/// An exact ratio match takes the fit-to-width branch.
///
/// # Arguments
/// * `content_width` - Content box width in mm
/// * `content_height` - Content box height in mm
/// * `slot_center` - Center of the slot (x, y) in mm
/// * `image_width` - Image width in pixels
/// * `image_height` - Image height in pixels
pub fn compute_placement(
    content_width: f32,
    content_height: f32,
    slot_center: (f32, f32),
    image_width: u32,
    image_height: u32,
) -> Placement {
    let ratio = image_width as f32 / image_height as f32;
    let content_ratio = content_width / content_height;
    let (center_x, center_y) = slot_center;

    if ratio >= content_ratio {
        Placement {
            x_mm: center_x - content_width / 2.0,
            y_mm: center_y - (content_width / ratio) / 2.0,
            fit: Fit::Width,
            target_mm: content_width,
            aspect_ratio: ratio,
        }
    } else {
        Placement {
            x_mm: center_x - (content_height * ratio) / 2.0,
            y_mm: center_y - content_height / 2.0,
            fit: Fit::Height,
            target_mm: content_height,
            aspect_ratio: ratio,
        }
    }
}
