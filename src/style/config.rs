use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::style::color::HexColor;

/// Smallest text-box width, as a fraction of the canvas width.
pub const MIN_BOX_WIDTH: f64 = 0.2;
/// Smallest text-box height, as a fraction of the canvas height.
pub const MIN_BOX_HEIGHT: f64 = 0.15;

const WEIGHT_RANGE: (u16, u16) = (400, 700);
const BACKGROUND_OPACITY_RANGE: (f32, f32) = (0.10, 0.95);
const STROKE_WIDTH_RANGE: (f32, f32) = (1.0, 12.0);
const PADDING_RATIO_RANGE: (f64, f64) = (0.04, 0.20);
const LINE_HEIGHT_RANGE: (f32, f32) = (1.0, 1.6);

/// Horizontal text alignment inside the text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[serde(alias = "left")]
    Start,
    #[default]
    Center,
    #[serde(alias = "right")]
    End,
}

/// Caption placement rectangle in canvas fractions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TextBox {
    /// Clamp size to the minimums first, then position so the box stays on the canvas.
    pub fn clamped(self) -> Self {
        let width = finite_or(self.width, 1.0).clamp(MIN_BOX_WIDTH, 1.0);
        let height = finite_or(self.height, 1.0).clamp(MIN_BOX_HEIGHT, 1.0);
        let x = finite_or(self.x, 0.0).clamp(0.0, 1.0 - width);
        let y = finite_or(self.y, 0.0).clamp(0.0, 1.0 - height);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn validate(self) -> CarouselResult<()> {
        let all_finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(CarouselError::validation("text box values must be finite"));
        }
        if self.x < 0.0 || self.y < 0.0 {
            return Err(CarouselError::validation("text box origin must be >= 0"));
        }
        if self.width < MIN_BOX_WIDTH || self.height < MIN_BOX_HEIGHT {
            return Err(CarouselError::validation(format!(
                "text box must be at least {MIN_BOX_WIDTH} wide and {MIN_BOX_HEIGHT} tall"
            )));
        }
        // Tolerate float noise from slider arithmetic.
        if self.x + self.width > 1.0 + 1e-9 || self.y + self.height > 1.0 + 1e-9 {
            return Err(CarouselError::validation(
                "text box must lie inside the canvas",
            ));
        }
        Ok(())
    }
}

/// A filled rectangle painted behind the caption.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundFill {
    pub color: Rgba8,
    pub opacity: f32,
}

/// Outline painted under each caption line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStroke {
    pub color: Rgba8,
    pub width: f32,
}

/// Typography and placement of a caption, shared by every slide.
///
/// JSON uses the camelCase keys of the style controls (`fontFamily`, `textBoxX`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfiguration {
    pub font_family: String,
    pub font_weight: u16,
    pub text_color: HexColor,
    pub background_enabled: bool,
    pub background_color: HexColor,
    pub background_opacity: f32,
    pub stroke_enabled: bool,
    pub stroke_color: HexColor,
    pub stroke_width: f32,
    pub padding_ratio: f64,
    pub line_height: f32,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub text_align: TextAlign,
    pub text_box_x: f64,
    pub text_box_y: f64,
    pub text_box_width: f64,
    pub text_box_height: f64,
    pub overlay_enabled: bool,
}

impl Default for StyleConfiguration {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_owned(),
            font_weight: 500,
            text_color: HexColor::rgb(0xf8, 0xfa, 0xfc),
            background_enabled: false,
            background_color: HexColor::rgb(0x02, 0x06, 0x17),
            background_opacity: 0.5,
            stroke_enabled: false,
            stroke_color: HexColor::rgb(0x02, 0x06, 0x17),
            stroke_width: 4.0,
            padding_ratio: 0.08,
            line_height: 1.18,
            max_font_size: 96.0,
            min_font_size: 28.0,
            text_align: TextAlign::Center,
            text_box_x: 0.08,
            text_box_y: 0.62,
            text_box_width: 0.84,
            text_box_height: 0.34,
            overlay_enabled: true,
        }
    }
}

impl StyleConfiguration {
    /// Parse a style from JSON and validate it.
    pub fn from_json_str(s: &str) -> CarouselResult<Self> {
        let style: Self =
            serde_json::from_str(s).map_err(|e| CarouselError::serde(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    pub fn text_box(&self) -> TextBox {
        TextBox {
            x: self.text_box_x,
            y: self.text_box_y,
            width: self.text_box_width,
            height: self.text_box_height,
        }
    }

    pub fn background(&self) -> Option<BackgroundFill> {
        self.background_enabled.then(|| BackgroundFill {
            color: self.background_color.rgba8(),
            opacity: self.background_opacity,
        })
    }

    pub fn stroke(&self) -> Option<TextStroke> {
        self.stroke_enabled.then(|| TextStroke {
            color: self.stroke_color.rgba8(),
            width: self.stroke_width,
        })
    }

    /// Check the hard invariants of a style without repairing anything.
    pub fn validate(&self) -> CarouselResult<()> {
        if self.font_family.trim().is_empty() {
            return Err(CarouselError::validation("fontFamily must be non-empty"));
        }
        let (lo, hi) = WEIGHT_RANGE;
        if self.font_weight < lo || self.font_weight > hi || self.font_weight % 100 != 0 {
            return Err(CarouselError::validation(format!(
                "fontWeight must be a multiple of 100 in [{lo}, {hi}]"
            )));
        }
        let floats = [
            self.background_opacity,
            self.stroke_width,
            self.line_height,
            self.max_font_size,
            self.min_font_size,
        ];
        if !floats.iter().all(|v| v.is_finite()) || !self.padding_ratio.is_finite() {
            return Err(CarouselError::validation("style values must be finite"));
        }
        check_range("backgroundOpacity", self.background_opacity, BACKGROUND_OPACITY_RANGE)?;
        check_range("strokeWidth", self.stroke_width, STROKE_WIDTH_RANGE)?;
        check_range("paddingRatio", self.padding_ratio, PADDING_RATIO_RANGE)?;
        check_range("lineHeight", self.line_height, LINE_HEIGHT_RANGE)?;
        if self.min_font_size <= 0.0 {
            return Err(CarouselError::validation("minFontSize must be > 0"));
        }
        if self.min_font_size > self.max_font_size {
            return Err(CarouselError::validation(
                "minFontSize must be <= maxFontSize",
            ));
        }
        self.text_box().validate()
    }

    /// Repair a style into the control-layer domain ranges.
    ///
    /// Styles that pass [`validate`](Self::validate) come back unchanged. Otherwise non-finite
    /// values fall back to defaults and inverted font bounds are swapped.
    pub fn sanitized(&self) -> Self {
        if self.validate().is_ok() {
            return self.clone();
        }
        let d = Self::default();

        let font_family = if self.font_family.trim().is_empty() {
            d.font_family.clone()
        } else {
            self.font_family.clone()
        };

        let mut min_font_size = positive_or(self.min_font_size, d.min_font_size);
        let mut max_font_size = positive_or(self.max_font_size, d.max_font_size);
        if min_font_size > max_font_size {
            std::mem::swap(&mut min_font_size, &mut max_font_size);
        }

        let bx = match self.text_box().validate() {
            Ok(()) => self.text_box(),
            Err(_) => self.text_box().clamped(),
        };

        Self {
            font_family,
            font_weight: round_weight(self.font_weight),
            background_opacity: clamp_or(
                self.background_opacity,
                BACKGROUND_OPACITY_RANGE,
                d.background_opacity,
            ),
            stroke_width: clamp_or(self.stroke_width, STROKE_WIDTH_RANGE, d.stroke_width),
            padding_ratio: clamp_or(self.padding_ratio, PADDING_RATIO_RANGE, d.padding_ratio),
            line_height: clamp_or(self.line_height, LINE_HEIGHT_RANGE, d.line_height),
            max_font_size,
            min_font_size,
            text_box_x: bx.x,
            text_box_y: bx.y,
            text_box_width: bx.width,
            text_box_height: bx.height,
            ..self.clone()
        }
    }

    /// Return a copy with the fields present in `patch` replaced.
    ///
    /// Box fields are clamped as a group; the weight snaps to the nearest hundred.
    pub fn patched(&self, patch: &StylePatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = &patch.font_family {
            next.font_family = v.clone();
        }
        if let Some(v) = patch.font_weight {
            next.font_weight = round_weight(v);
        }
        if let Some(v) = patch.text_color {
            next.text_color = v;
        }
        if let Some(v) = patch.background_enabled {
            next.background_enabled = v;
        }
        if let Some(v) = patch.background_color {
            next.background_color = v;
        }
        if let Some(v) = patch.background_opacity {
            next.background_opacity = v;
        }
        if let Some(v) = patch.stroke_enabled {
            next.stroke_enabled = v;
        }
        if let Some(v) = patch.stroke_color {
            next.stroke_color = v;
        }
        if let Some(v) = patch.stroke_width {
            next.stroke_width = v;
        }
        if let Some(v) = patch.padding_ratio {
            next.padding_ratio = v;
        }
        if let Some(v) = patch.line_height {
            next.line_height = v;
        }
        if let Some(v) = patch.max_font_size {
            next.max_font_size = v;
        }
        if let Some(v) = patch.min_font_size {
            next.min_font_size = v;
        }
        if let Some(v) = patch.text_align {
            next.text_align = v;
        }
        if let Some(v) = patch.overlay_enabled {
            next.overlay_enabled = v;
        }

        let touches_box = patch.text_box_x.is_some()
            || patch.text_box_y.is_some()
            || patch.text_box_width.is_some()
            || patch.text_box_height.is_some();
        if touches_box {
            let bx = TextBox {
                x: patch.text_box_x.unwrap_or(next.text_box_x),
                y: patch.text_box_y.unwrap_or(next.text_box_y),
                width: patch.text_box_width.unwrap_or(next.text_box_width),
                height: patch.text_box_height.unwrap_or(next.text_box_height),
            };
            next.set_text_box(bx.clamped());
        }
        next
    }

    pub fn set_text_box(&mut self, bx: TextBox) {
        self.text_box_x = bx.x;
        self.text_box_y = bx.y;
        self.text_box_width = bx.width;
        self.text_box_height = bx.height;
    }
}

/// Field-level update to a [`StyleConfiguration`]; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    pub font_family: Option<String>,
    pub font_weight: Option<u16>,
    pub text_color: Option<HexColor>,
    pub background_enabled: Option<bool>,
    pub background_color: Option<HexColor>,
    pub background_opacity: Option<f32>,
    pub stroke_enabled: Option<bool>,
    pub stroke_color: Option<HexColor>,
    pub stroke_width: Option<f32>,
    pub padding_ratio: Option<f64>,
    pub line_height: Option<f32>,
    pub max_font_size: Option<f32>,
    pub min_font_size: Option<f32>,
    pub text_align: Option<TextAlign>,
    pub text_box_x: Option<f64>,
    pub text_box_y: Option<f64>,
    pub text_box_width: Option<f64>,
    pub text_box_height: Option<f64>,
    pub overlay_enabled: Option<bool>,
}

impl StylePatch {
    pub fn text_box(bx: TextBox) -> Self {
        Self {
            text_box_x: Some(bx.x),
            text_box_y: Some(bx.y),
            text_box_width: Some(bx.width),
            text_box_height: Some(bx.height),
            ..Self::default()
        }
    }
}

fn round_weight(w: u16) -> u16 {
    let rounded = ((u32::from(w) + 50) / 100 * 100) as u16;
    rounded.clamp(WEIGHT_RANGE.0, WEIGHT_RANGE.1)
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

fn positive_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

fn clamp_or<T: PartialOrd + Copy>(v: T, (lo, hi): (T, T), fallback: T) -> T {
    if v >= lo && v <= hi {
        v
    } else if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        fallback
    }
}

fn check_range<T: PartialOrd + Copy + std::fmt::Display>(
    name: &str,
    v: T,
    (lo, hi): (T, T),
) -> CarouselResult<()> {
    if v >= lo && v <= hi {
        Ok(())
    } else {
        Err(CarouselError::validation(format!(
            "{name} must be in [{lo}, {hi}]"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
