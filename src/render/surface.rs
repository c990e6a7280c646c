use crate::foundation::core::{Aspect, Canvas};
use crate::foundation::error::{CarouselError, CarouselResult};

/// One rendered frame in CPU memory.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Fixed-resolution pixel surface that the composer paints into.
pub struct RenderTarget {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTarget")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl RenderTarget {
    /// Transparent surface of exactly `canvas` pixels.
    pub fn new(canvas: Canvas) -> CarouselResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CarouselError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CarouselError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(CarouselError::render("surface width/height must be > 0"));
        }
        Ok(Self {
            canvas,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn for_aspect(aspect: Aspect) -> CarouselResult<Self> {
        Self::new(aspect.canvas())
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied copy of the current pixels.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    pub(crate) fn context(&self) -> vello_cpu::RenderContext {
        vello_cpu::RenderContext::new(self.width, self.height)
    }

    pub(crate) fn present(&mut self, ctx: &mut vello_cpu::RenderContext) {
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
