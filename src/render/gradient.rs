use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CarouselError, CarouselResult};

/// One color stop of a vertical gradient, offset in `[0, 1]` from top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba8,
}

impl GradientStop {
    const fn new(offset: f32, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

const fn ink(alpha: u8) -> Rgba8 {
    Rgba8 {
        r: 4,
        g: 2,
        b: 51,
        a: alpha,
    }
}

/// Wash laid under the caption when no solid background is set.
pub const BASE_WASH: [GradientStop; 3] = [
    GradientStop::new(0.0, ink(13)),
    GradientStop::new(0.45, ink(89)),
    GradientStop::new(1.0, ink(153)),
];

/// Darkening overlay layered over the box when the overlay is enabled.
pub const OVERLAY_WASH: [GradientStop; 3] = [
    GradientStop::new(0.0, ink(0)),
    GradientStop::new(0.65, ink(115)),
    GradientStop::new(1.0, ink(191)),
];

/// Color at `t` along `stops`, interpolated linearly in straight alpha.
///
/// Stops must be sorted by offset. Outside the stop range the nearest stop's color is used.
pub fn sample(stops: &[GradientStop], t: f32) -> Rgba8 {
    let Some(first) = stops.first() else {
        return Rgba8::default();
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= 0.0 {
                1.0
            } else {
                (t - a.offset) / span
            };
            let lerp = |x: u8, y: u8| -> u8 {
                let xf = f32::from(x);
                let yf = f32::from(y);
                (xf + (yf - xf) * u).round().clamp(0.0, 255.0) as u8
            };
            return Rgba8 {
                r: lerp(a.color.r, b.color.r),
                g: lerp(a.color.g, b.color.g),
                b: lerp(a.color.b, b.color.b),
                a: lerp(a.color.a, b.color.a),
            };
        }
    }
    stops.last().map(|s| s.color).unwrap_or_default()
}

/// Rasterize a top-to-bottom gradient into a `w × h` image paint.
pub fn gradient_paint(stops: &[GradientStop], w: u32, h: u32) -> CarouselResult<vello_cpu::Image> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let h1 = (h.max(1) - 1) as f32;
    for y in 0..h {
        let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
        let c = sample(stops, t).to_premul();
        for x in 0..w {
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    let pixmap = premul_bytes_to_pixmap(&bytes, w, h)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Wrap premultiplied RGBA8 bytes into a pixmap.
pub(crate) fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CarouselResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CarouselError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CarouselError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CarouselError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
