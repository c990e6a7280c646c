use crate::foundation::core::{Canvas, Rect};
use crate::style::config::TextBox;

const MIN_H_PADDING_PX: f64 = 24.0;
const MIN_V_PADDING_PX: f64 = 18.0;
const V_PADDING_FACTOR: f64 = 0.75;
const MAX_V_PADDING_DIVISOR: f64 = 2.5;

/// A caption box resolved against a concrete canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRegion {
    pub rect: Rect,
    pub h_padding: f64,
    pub v_padding: f64,
}

impl TextRegion {
    pub fn max_width(&self) -> f64 {
        self.rect.width() - self.h_padding * 2.0
    }

    pub fn max_height(&self) -> f64 {
        self.rect.height() - self.v_padding * 2.0
    }

    pub fn has_room(&self) -> bool {
        self.max_width() > 0.0 && self.max_height() > 0.0
    }
}

/// Convert a fractional caption box into pixels, clamped to the canvas, and derive its padding.
///
/// Horizontal padding is `width × ratio`, at least 24 px and at most half the width; vertical
/// padding is `height × ratio × 0.75`, at least 18 px and at most `height / 2.5`. The upper
/// bound wins when the two conflict.
pub fn resolve_text_region(bx: TextBox, canvas: Canvas, padding_ratio: f64) -> TextRegion {
    let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));

    let width = non_negative(cw * bx.width).min(cw);
    let height = non_negative(ch * bx.height).min(ch);
    let x = non_negative(cw * bx.x).min(cw - width);
    let y = non_negative(ch * bx.y).min(ch - height);

    let ratio = non_negative(padding_ratio);
    let h_padding = (width * ratio).max(MIN_H_PADDING_PX).min(width / 2.0);
    let v_padding = (height * ratio * V_PADDING_FACTOR)
        .max(MIN_V_PADDING_PX)
        .min(height / MAX_V_PADDING_DIVISOR);

    TextRegion {
        rect: Rect::new(x, y, x + width, y + height),
        h_padding,
        v_padding,
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/region.rs"]
mod tests;
