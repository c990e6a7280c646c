use crate::foundation::error::{CarouselError, CarouselResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> CarouselResult<Self> {
        if width == 0 || height == 0 {
            return Err(CarouselError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(CarouselError::validation(
                "canvas width/height must fit in u16",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Canvas aspect presets offered to the user.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    #[default]
    Square,
    Vertical,
}

impl Aspect {
    /// Every preset, in display order.
    pub const ALL: [Aspect; 2] = [Aspect::Square, Aspect::Vertical];

    pub fn canvas(self) -> Canvas {
        match self {
            Aspect::Square => Canvas {
                width: 1080,
                height: 1080,
            },
            Aspect::Vertical => Canvas {
                width: 1080,
                height: 1350,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Aspect::Square => "1:1",
            Aspect::Vertical => "4:5",
        }
    }
}

/// Identity of an uploaded slide; stable across reorders, never reused within a session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlideId(pub u64);

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slide#{}", self.0)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Replace alpha with `opacity` in `[0, 1]`, multiplied into the existing alpha.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: ((f32::from(self.a) * o).round()).clamp(0.0, 255.0) as u8,
            ..self
        }
    }

    /// Premultiplied channel bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { ((u16::from(c) * a + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
