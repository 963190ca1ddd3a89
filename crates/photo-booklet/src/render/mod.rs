//! PDF rendering modules
//!
//! This module handles all PDF-specific operations:
//! - Embedding cached images as Image XObjects
//! - Building one output page per layout page
//! - Assembling the page tree and serialising the document

mod page;
mod xobject;

pub use page::render_layout_page;
pub use xobject::create_image_xobject;

use crate::constants::PDF_VERSION;
use crate::layout::BookletLayout;
use crate::options::BookletOptions;
use crate::types::*;
use lopdf::{Dictionary, Document, Object};

/// Build the complete PDF document for a layout
pub fn render_document(layout: &BookletLayout, options: &BookletOptions) -> Result<Document> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();
    let (page_width_mm, page_height_mm) = options.page_dimensions_mm();

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let page_id = render_layout_page(
            &mut doc,
            page,
            page_width_mm,
            page_height_mm,
            &options.guide_line,
            pages_id,
        )?;
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

/// Serialise a document into PDF bytes
pub fn save_to_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}
