use crate::foundation::error::{CarouselError, CarouselResult};
use crate::render::surface::FrameRGBA;

/// Export quality used when the caller does not pick one.
pub const DEFAULT_QUALITY: f32 = 0.98;

/// Map a `[0, 1]` quality onto the encoder's `1..=100` scale. Non-finite input uses the default.
pub fn quality_percent(quality: f32) -> u8 {
    let q = if quality.is_finite() {
        quality
    } else {
        DEFAULT_QUALITY
    };
    (q * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a frame as baseline JPEG. Alpha is dropped after unpremultiplying.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode_jpeg(frame: &FrameRGBA, quality: f32) -> CarouselResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(CarouselError::encode(format!(
            "frame {}x{} does not match {} data bytes",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }

    let rgb: Vec<u8> = frame
        .to_straight_rgba8()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality_percent(quality));
    encoder
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| CarouselError::encode(format!("jpeg encode: {e}")))?;
    tracing::debug!(bytes = out.len(), "encoded jpeg");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
