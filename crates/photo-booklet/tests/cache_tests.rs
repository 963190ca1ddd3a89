mod common;

use common::write_image;
use photo_booklet::*;
use tempfile::TempDir;

fn source(dir: &std::path::Path, name: &str) -> SourceImage {
    discover_images(dir, &BookletOptions::default().extensions)
        .unwrap()
        .into_iter()
        .find(|img| img.display_name() == name)
        .expect("image not discovered")
}

#[test]
fn test_portrait_is_cached_landscape() {
    let input = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_image(input.path(), "portrait.jpg", 300, 400);

    let diagnostics = MemoryDiagnostics::new();
    let mut cache =
        ImageCache::open(cache_dir.path(), TargetResolution::default(), &diagnostics).unwrap();
    let entry = cache.resolve(&source(input.path(), "portrait.jpg")).unwrap();

    assert_eq!((entry.width_px, entry.height_px), (400, 300));
    assert_eq!(image::image_dimensions(&entry.path).unwrap(), (400, 300));
    assert_eq!(entry.path.extension().unwrap(), "jpg");
    assert!(entry.path.starts_with(cache_dir.path()));
}

#[test]
fn test_downscales_to_target_without_upscaling() {
    let input = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_image(input.path(), "big.png", 400, 300);
    write_image(input.path(), "small.png", 40, 30);
    write_image(input.path(), "tall.png", 100, 400);

    let target = TargetResolution {
        width_px: 100,
        height_px: 70,
    };
    let diagnostics = MemoryDiagnostics::new();
    let mut cache = ImageCache::open(cache_dir.path(), target, &diagnostics).unwrap();

    let big = cache.resolve(&source(input.path(), "big.png")).unwrap();
    assert_eq!((big.width_px, big.height_px), (93, 70));

    let small = cache.resolve(&source(input.path(), "small.png")).unwrap();
    assert_eq!((small.width_px, small.height_px), (40, 30));

    // Rotated to 400x100 first, then width-limited
    let tall = cache.resolve(&source(input.path(), "tall.png")).unwrap();
    assert_eq!((tall.width_px, tall.height_px), (100, 25));
}

#[test]
fn test_second_resolve_is_a_hit() {
    let input = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_image(input.path(), "photo.jpg", 64, 48);
    let image = source(input.path(), "photo.jpg");

    let diagnostics = MemoryDiagnostics::new();
    let mut cache =
        ImageCache::open(cache_dir.path(), TargetResolution::default(), &diagnostics).unwrap();

    let first = cache.resolve(&image).unwrap();
    let modified = std::fs::metadata(&first.path).unwrap().modified().unwrap();
    let second = cache.resolve(&image).unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    assert_eq!(
        std::fs::metadata(&second.path).unwrap().modified().unwrap(),
        modified
    );

    let caching_messages = diagnostics
        .messages()
        .iter()
        .filter(|m| m.starts_with("Resizing and caching"))
        .count();
    assert_eq!(caching_messages, 1);
}

#[test]
fn test_cache_survives_across_runs() {
    let input = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_image(input.path(), "photo.png", 64, 48);
    let image = source(input.path(), "photo.png");
    let diagnostics = MemoryDiagnostics::new();

    let first = {
        let mut cache =
            ImageCache::open(cache_dir.path(), TargetResolution::default(), &diagnostics)
                .unwrap();
        cache.resolve(&image).unwrap()
    };

    // Even with the source gone, the existing entry is served.
    std::fs::remove_file(&image.path).unwrap();

    let mut cache =
        ImageCache::open(cache_dir.path(), TargetResolution::default(), &diagnostics).unwrap();
    let second = cache.resolve(&image).unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 0 });
    assert_eq!(std::fs::read_dir(cache_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_corrupt_image_names_the_file() {
    let input = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    std::fs::write(input.path().join("broken.jpg"), b"not really a jpeg").unwrap();
    let image = source(input.path(), "broken.jpg");

    let diagnostics = MemoryDiagnostics::new();
    let mut cache =
        ImageCache::open(cache_dir.path(), TargetResolution::default(), &diagnostics).unwrap();

    match cache.resolve(&image) {
        Err(BookletError::Image { path, .. }) => assert_eq!(path, image.path),
        other => panic!("Expected Image error, got {:?}", other),
    }
    // Nothing is left behind for the failed image.
    assert_eq!(std::fs::read_dir(cache_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_uppercase_extension_is_preserved() {
    let input = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_image(input.path(), "lower.jpg", 20, 10);
    std::fs::rename(input.path().join("lower.jpg"), input.path().join("UPPER.JPG")).unwrap();

    let diagnostics = MemoryDiagnostics::new();
    let mut cache =
        ImageCache::open(cache_dir.path(), TargetResolution::default(), &diagnostics).unwrap();
    let entry = cache.resolve(&source(input.path(), "UPPER.JPG")).unwrap();

    assert_eq!(entry.path.extension().unwrap(), "JPG");
    assert_eq!((entry.width_px, entry.height_px), (20, 10));
}

#[test]
fn test_mislabelled_png_is_decoded_by_content() {
    let input = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_image(input.path(), "real.png", 40, 30);
    std::fs::rename(input.path().join("real.png"), input.path().join("x.jpg")).unwrap();

    let diagnostics = MemoryDiagnostics::new();
    let mut cache =
        ImageCache::open(cache_dir.path(), TargetResolution::default(), &diagnostics).unwrap();
    let entry = cache.resolve(&source(input.path(), "x.jpg")).unwrap();

    assert_eq!((entry.width_px, entry.height_px), (40, 30));
    assert_eq!(entry.path.extension().unwrap(), "jpg");
    // The cached copy is encoded in the format its extension names.
    assert_eq!(
        image::ImageReader::open(&entry.path)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format(),
        Some(image::ImageFormat::Jpeg)
    );
}
