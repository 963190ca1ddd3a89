#![allow(dead_code)]

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Write a solid-colour RGB image; the format follows the extension.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, Rgb([200, 120, 40]))
        .save(&path)
        .unwrap();
    path
}

/// Write a half-transparent PNG
pub fn write_rgba_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128]))
        .save(&path)
        .unwrap();
    path
}

/// The three-image folder: portrait jpg, landscape png, square jpeg
pub fn write_scenario(dir: &Path) {
    write_image(dir, "a.jpg", 300, 400);
    write_image(dir, "b.png", 400, 300);
    write_image(dir, "c.jpeg", 100, 100);
}
