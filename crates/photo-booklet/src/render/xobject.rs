//! Image XObject creation
//!
//! Cached JPEG files are embedded byte-for-byte with `DCTDecode`. Every
//! other format is decoded to 8-bit RGB and Flate-compressed, with the
//! alpha channel (if any) split into a soft mask.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::{ColorType, DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use std::path::Path;

use crate::types::{BookletError, CacheEntry, Result};

// =============================================================================
// XObject Creation
// =============================================================================

/// Add the cached image file as an Image XObject and return its id.
pub fn create_image_xobject(output: &mut Document, cached: &CacheEntry) -> Result<ObjectId> {
    let format = ImageFormat::from_path(&cached.path)
        .map_err(|e| BookletError::image(&cached.path, e))?;

    match format {
        ImageFormat::Jpeg => embed_jpeg(output, &cached.path),
        _ => embed_decoded(output, &cached.path),
    }
}

fn embed_jpeg(output: &mut Document, path: &Path) -> Result<ObjectId> {
    let decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| BookletError::image(path, e))?;
    let (width, height) = decoder.dimensions();
    let color_space = match decoder.color_type() {
        ColorType::L8 | ColorType::L16 => "DeviceGray",
        _ => "DeviceRGB",
    };

    let data = std::fs::read(path)?;
    let dict = image_dictionary(width, height, color_space, "DCTDecode");
    Ok(output.add_object(Stream::new(dict, data)))
}

fn embed_decoded(output: &mut Document, path: &Path) -> Result<ObjectId> {
    let decoded = image::open(path).map_err(|e| BookletError::image(path, e))?;
    let (width, height) = (decoded.width(), decoded.height());

    let mut dict = image_dictionary(width, height, "DeviceRGB", "FlateDecode");
    if decoded.color().has_alpha() {
        let mask_id = add_soft_mask(output, &decoded)?;
        dict.set("SMask", Object::Reference(mask_id));
    }

    let rgb = decoded.to_rgb8();
    let data = deflate(rgb.as_raw())?;
    Ok(output.add_object(Stream::new(dict, data)))
}

fn add_soft_mask(output: &mut Document, decoded: &DynamicImage) -> Result<ObjectId> {
    let rgba = decoded.to_rgba8();
    let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();

    let dict = image_dictionary(rgba.width(), rgba.height(), "DeviceGray", "FlateDecode");
    Ok(output.add_object(Stream::new(dict, deflate(&alpha)?)))
}

fn image_dictionary(width: u32, height: u32, color_space: &str, filter: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
    dict
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
