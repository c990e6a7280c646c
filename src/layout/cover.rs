use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{CarouselError, CarouselResult};

/// Where a source image lands when it is scaled to cover the whole canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverPlacement {
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CoverPlacement {
    pub fn transform(&self) -> Affine {
        Affine::translate((self.offset_x, self.offset_y)) * Affine::scale(self.scale)
    }
}

/// Scale `image_w × image_h` uniformly so it fills `canvas`, cropping the overflow symmetrically.
///
/// A wider-than-canvas image matches the canvas height and overflows horizontally; otherwise the
/// width matches and the image overflows vertically.
pub fn cover_fit(image_w: u32, image_h: u32, canvas: Canvas) -> CarouselResult<CoverPlacement> {
    if image_w == 0 || image_h == 0 {
        return Err(CarouselError::validation("image width/height must be > 0"));
    }
    let (iw, ih) = (f64::from(image_w), f64::from(image_h));
    let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));

    let (width, height) = if iw / ih > canvas.ratio() {
        ((iw / ih) * ch, ch)
    } else {
        (cw, (ih / iw) * cw)
    };
    let scale = if width > cw { height / ih } else { width / iw };

    Ok(CoverPlacement {
        scale,
        width,
        height,
        offset_x: (cw - width) / 2.0,
        offset_y: (ch - height) / 2.0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cover.rs"]
mod tests;
