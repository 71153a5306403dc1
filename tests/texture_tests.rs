// Host-side tests for image decoding and per-body texture slots.

#![allow(dead_code)]
mod core {
    pub mod texture {
        include!("../src/core/texture.rs");
    }
}

use crate::core::texture::*;
use std::io::Cursor;

fn encode(format: image::ImageFormat, w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(w, h, |x, y| image::Rgb([(x * 40) as u8, (y * 40) as u8, 128]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode test image");
    bytes
}

#[test]
fn decodes_png_to_rgba() {
    let img = decode_image(&encode(image::ImageFormat::Png, 4, 3)).expect("png decodes");
    assert_eq!((img.width, img.height), (4, 3));
    assert_eq!(img.rgba.len(), 4 * 3 * 4);
    // pixel (1, 2): r = 40, g = 80, b = 128, opaque
    let i = (2 * 4 + 1) * 4;
    assert_eq!(&img.rgba[i..i + 4], &[40, 80, 128, 255]);
}

#[test]
fn decodes_jpeg() {
    let img = decode_image(&encode(image::ImageFormat::Jpeg, 8, 8)).expect("jpeg decodes");
    assert_eq!((img.width, img.height), (8, 8));
    assert!(img.rgba.chunks(4).all(|px| px[3] == 255));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, TextureError::Decode(_)));
}

#[test]
fn slot_resolves_once() {
    let mut slot: TextureSlot<u32> = TextureSlot::default();
    assert!(!slot.is_settled());
    assert!(slot.texture().is_none());
    assert!(slot.resolve::<TextureError>(Ok(7)));
    assert_eq!(slot.texture(), Some(&7));
    assert!(!slot.resolve::<TextureError>(Ok(9)));
    assert!(!slot.resolve(Err(TextureError::Cancelled)));
    assert_eq!(slot.texture(), Some(&7));
}

#[test]
fn failure_is_permanent() {
    let mut slot: TextureSlot<u32> = TextureSlot::Pending;
    assert!(slot.resolve(Err(TextureError::Status(404))));
    assert!(slot.is_settled());
    assert!(!slot.resolve::<TextureError>(Ok(1)));
    assert!(slot.texture().is_none());
    assert_eq!(surface_for(&slot, [0.5, 0.5, 0.5]), Surface::Flat([0.5, 0.5, 0.5]));
}

#[test]
fn one_failure_does_not_affect_another_body() {
    let mut slots: Vec<TextureSlot<&str>> = vec![TextureSlot::Pending, TextureSlot::Pending];
    slots[0].resolve(Err(TextureError::Fetch("network down".into())));
    slots[1].resolve::<TextureError>(Ok("mars"));
    assert_eq!(surface_for(&slots[0], [1.0, 0.0, 0.0]), Surface::Flat([1.0, 0.0, 0.0]));
    assert_eq!(surface_for(&slots[1], [0.0, 0.0, 1.0]), Surface::Textured(&"mars"));
}

#[test]
fn pending_slot_uses_flat_color() {
    let slot: TextureSlot<u8> = TextureSlot::Pending;
    assert_eq!(surface_for(&slot, [0.1, 0.2, 0.3]), Surface::Flat([0.1, 0.2, 0.3]));
}

#[test]
fn errors_describe_themselves() {
    assert_eq!(TextureError::Status(404).to_string(), "server answered HTTP 404");
    assert_eq!(TextureError::Cancelled.to_string(), "request cancelled");
}

#[test]
fn oversized_maps_are_downscaled() {
    let img = decode_image(&encode(image::ImageFormat::Png, 2100, 10)).expect("png decodes");
    assert_eq!(img.width, MAX_TEXTURE_EDGE);
    assert!(img.height <= 10 && img.height > 0);
    assert_eq!(img.rgba.len(), (img.width * img.height * 4) as usize);
}
