//! Output page rendering
//!
//! Turns one [`LayoutPage`] into a PDF page object. Layout coordinates are
//! millimetres from the top-left corner; PDF user space is points from the
//! bottom-left corner, so every y is flipped against the page height.

use crate::constants::mm_to_pt;
use crate::layout::{LayoutPage, Placement};
use crate::types::{GuideLine, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::create_image_xobject;

/// Render a laid-out page and return the page object id.
///
/// # Arguments
/// * `output` - The output document
/// * `page` - The page to render
/// * `page_width_mm` - Page width in mm
/// * `page_height_mm` - Page height in mm
/// * `guide_line` - Stroke settings for the dashed separator
/// * `parent_pages_id` - The parent Pages object ID
pub fn render_layout_page(
    output: &mut Document,
    page: &LayoutPage,
    page_width_mm: f32,
    page_height_mm: f32,
    guide_line: &GuideLine,
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let width_pt = mm_to_pt(page_width_mm);
    let height_pt = mm_to_pt(page_height_mm);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    if let Some(y_mm) = page.guide_line_y_mm {
        content_ops.push(generate_guide_line(
            guide_line,
            width_pt,
            height_pt - mm_to_pt(y_mm),
        ));
    }

    for placed in &page.images {
        let xobject_name = format!("Im{}", placed.index);
        let xobject_id = create_image_xobject(output, &placed.cached)?;
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        content_ops.push(generate_image_command(
            &xobject_name,
            &placed.placement,
            page_height_mm,
        ));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Content stream command drawing an image XObject into its placement.
///
/// Image XObjects occupy the unit square, so the matrix scales by the
/// drawn size in points and translates to the bottom-left corner.
pub(crate) fn generate_image_command(
    xobject_name: &str,
    placement: &Placement,
    page_height_mm: f32,
) -> String {
    let width = mm_to_pt(placement.width_mm());
    let height = mm_to_pt(placement.height_mm());
    let x = mm_to_pt(placement.x_mm);
    let y = mm_to_pt(page_height_mm - placement.y_mm - placement.height_mm());

    format!(
        "q {:.4} 0 0 {:.4} {:.4} {:.4} cm /{} Do Q\n",
        width, height, x, y, xobject_name
    )
}

/// Full-width dashed horizontal line at `y_pt` (PDF coordinates).
pub(crate) fn generate_guide_line(guide_line: &GuideLine, width_pt: f32, y_pt: f32) -> String {
    format!(
        "q 0 0 0 RG {:.4} w [{:.4} {:.4}] 0 d 0 {:.4} m {:.4} {:.4} l S Q\n",
        mm_to_pt(guide_line.width_mm),
        mm_to_pt(guide_line.dash_mm),
        mm_to_pt(guide_line.gap_mm),
        y_pt,
        width_pt,
        y_pt
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Fit;

    #[test]
    fn test_image_command_flips_y() {
        // 100 x 50 mm image whose top edge is 10 mm below the page top
        let placement = Placement {
            x_mm: 5.0,
            y_mm: 10.0,
            fit: Fit::Width,
            target_mm: 100.0,
            aspect_ratio: 2.0,
        };
        let cmd = generate_image_command("Im0", &placement, 297.0);

        let expected_y = mm_to_pt(297.0 - 10.0 - 50.0);
        assert!(cmd.starts_with("q "));
        assert!(cmd.contains(&format!("{:.4} cm", expected_y)));
        assert!(cmd.contains("/Im0 Do Q"));
    }

    #[test]
    fn test_guide_line_is_dashed() {
        let cmd = generate_guide_line(&GuideLine::default(), 595.0, 422.0);
        assert!(cmd.contains("] 0 d"));
        assert!(cmd.contains(" m "));
        assert!(cmd.contains(" l S"));
    }
}
