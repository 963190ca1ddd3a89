use crate::constants::IMAGES_PER_PAGE;
use crate::types::*;

/// Calculate page statistics for a number of discovered images
pub fn calculate_statistics(image_count: usize) -> BookletStatistics {
    let pages = image_count.div_ceil(IMAGES_PER_PAGE);
    let empty_slots = pages * IMAGES_PER_PAGE - image_count;

    BookletStatistics {
        images: image_count,
        pages,
        empty_slots,
    }
}
