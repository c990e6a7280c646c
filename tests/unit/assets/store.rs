use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn second_lookup_hits_the_cache() {
    let mut cache = ImageCache::new();
    let id = SlideId(7);
    let first = cache.get_or_decode(id, &png(3, 2)).unwrap();
    // Bytes are ignored once the slide is cached.
    let second = cache.get_or_decode(id, b"junk").unwrap();
    assert!(Arc::ptr_eq(&first.rgba8_premul, &second.rgba8_premul));
    assert_eq!(cache.len(), 1);
}

#[test]
fn release_is_idempotent() {
    let mut cache = ImageCache::new();
    let id = SlideId(1);
    cache.get_or_decode(id, &png(1, 1)).unwrap();
    assert!(cache.release(id));
    assert!(!cache.release(id));
    assert!(cache.is_empty());
    assert!(cache.get(id).is_none());
}

#[test]
fn failed_decode_is_not_cached() {
    let mut cache = ImageCache::new();
    assert!(cache.get_or_decode(SlideId(2), b"nope").is_err());
    assert!(cache.is_empty());
}
