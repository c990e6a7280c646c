use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::store::PreparedImage;
use crate::encode::jpeg::encode_jpeg;
use crate::foundation::core::{Affine, Aspect, Canvas, Rect, Rgba8};
use crate::foundation::error::CarouselResult;
use crate::layout::cover::cover_fit;
use crate::layout::fit::{FitParams, LayoutResult, shrink_to_fit};
use crate::layout::region::{TextRegion, resolve_text_region};
use crate::render::gradient::{BASE_WASH, GradientStop, OVERLAY_WASH, gradient_paint};
use crate::render::surface::RenderTarget;
use crate::style::config::{StyleConfiguration, TextAlign, TextStroke};
use crate::text::fonts::{FontGate, FontKey, NORMAL_WEIGHT};
use crate::text::shaper::{TextBrushRgba8, TextShaper};

pub const PLACEHOLDER_FILL: Rgba8 = Rgba8::rgb(0x0f, 0x17, 0x2a);
pub const PLACEHOLDER_INK: Rgba8 = Rgba8::rgb(0x94, 0xa3, 0xb8);
pub const PLACEHOLDER_TEXT: &str = "Upload an image";
const PLACEHOLDER_FONT_SIZE: f32 = 36.0;
const PLACEHOLDER_FAMILY: &str = "Inter";

const STROKE_MITER_LIMIT: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Wash {
    Base,
    Overlay,
}

impl Wash {
    fn stops(self) -> &'static [GradientStop] {
        match self {
            Wash::Base => &BASE_WASH,
            Wash::Overlay => &OVERLAY_WASH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct WashKey {
    wash: Wash,
    w: u32,
    h: u32,
}

/// Composition engine: paints image, caption box washes and caption text onto a surface.
pub struct Composer {
    shaper: TextShaper,
    glyph_fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    washes: HashMap<WashKey, vello_cpu::Image>,
    last_image: Option<(Arc<Vec<u8>>, vello_cpu::Image)>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(FontGate::global())
    }
}

impl Composer {
    pub fn new(gate: Arc<FontGate>) -> Self {
        Self {
            shaper: TextShaper::new(gate),
            glyph_fonts: HashMap::new(),
            washes: HashMap::new(),
            last_image: None,
        }
    }

    #[tracing::instrument(skip(self, target, image, caption, style), fields(canvas = ?target.canvas()))]
    pub fn render(
        &mut self,
        target: &mut RenderTarget,
        image: Option<&PreparedImage>,
        caption: &str,
        style: &StyleConfiguration,
    ) -> CarouselResult<()> {
        let canvas = target.canvas();
        let mut ctx = target.context();

        let Some(image) = image else {
            self.paint_placeholder(&mut ctx, canvas);
            target.present(&mut ctx);
            return Ok(());
        };

        let style = style.sanitized();
        self.paint_cover(&mut ctx, image, canvas)?;

        let region = resolve_text_region(style.text_box(), canvas, style.padding_ratio);
        if region.has_room()
            && let Some(layout) = self.fit_caption(caption, &region, &style)
        {
            self.paint_box(&mut ctx, &region, &style)?;
            self.paint_caption(&mut ctx, &region, &layout, &style);
        }

        target.present(&mut ctx);
        Ok(())
    }

    /// Render into a fresh surface of `aspect` and encode it as JPEG.
    #[tracing::instrument(skip(self, image, caption, style))]
    pub fn export(
        &mut self,
        aspect: Aspect,
        image: &PreparedImage,
        caption: &str,
        style: &StyleConfiguration,
        quality: f32,
    ) -> CarouselResult<Vec<u8>> {
        let mut target = RenderTarget::for_aspect(aspect)?;
        self.render(&mut target, Some(image), caption, style)?;
        encode_jpeg(&target.readback(), quality)
    }

    /// Wrapped caption layout for `region`, or `None` when nothing should be painted.
    pub fn fit_caption(
        &mut self,
        caption: &str,
        region: &TextRegion,
        style: &StyleConfiguration,
    ) -> Option<LayoutResult> {
        if !region.has_room() || caption.trim().is_empty() {
            return None;
        }
        let font = FontKey::new(style.font_family.as_str(), style.font_weight);
        let params = FitParams {
            max_width: region.max_width() as f32,
            max_height: region.max_height() as f32,
            min_font_size: style.min_font_size,
            max_font_size: style.max_font_size,
            line_height: style.line_height,
        };
        shrink_to_fit(caption, params, &mut self.shaper.measurer(&font))
    }

    fn paint_placeholder(&mut self, ctx: &mut vello_cpu::RenderContext, canvas: Canvas) {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(PLACEHOLDER_FILL));
        ctx.fill_rect(&rect_to_cpu(canvas.rect()));

        let font = FontKey::new(PLACEHOLDER_FAMILY, NORMAL_WEIGHT);
        let layout = self.shaper.layout_line(
            PLACEHOLDER_TEXT,
            &font,
            PLACEHOLDER_FONT_SIZE,
            brush(PLACEHOLDER_INK),
        );
        let x = f64::from(canvas.width) / 2.0 - f64::from(layout.width()) / 2.0;
        let y = f64::from(canvas.height) / 2.0 - f64::from(layout.height()) / 2.0;
        paint_layout(ctx, &mut self.glyph_fonts, &layout, x, y, None);
    }

    fn paint_cover(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        image: &PreparedImage,
        canvas: Canvas,
    ) -> CarouselResult<()> {
        let placement = cover_fit(image.width, image.height, canvas)?;
        let paint = self.image_paint(image)?;
        ctx.set_transform(affine_to_cpu(placement.transform()));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    }

    fn paint_box(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        region: &TextRegion,
        style: &StyleConfiguration,
    ) -> CarouselResult<()> {
        if let Some(bg) = style.background() {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(bg.color.with_opacity(bg.opacity)));
            ctx.fill_rect(&rect_to_cpu(region.rect));
        } else if style.overlay_enabled {
            self.paint_wash(ctx, Wash::Base, region.rect)?;
        }
        if style.overlay_enabled {
            self.paint_wash(ctx, Wash::Overlay, region.rect)?;
        }
        Ok(())
    }

    fn paint_wash(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        wash: Wash,
        rect: Rect,
    ) -> CarouselResult<()> {
        let key = WashKey {
            wash,
            w: rect.width().ceil().max(1.0) as u32,
            h: rect.height().ceil().max(1.0) as u32,
        };
        let paint = match self.washes.get(&key) {
            Some(p) => p.clone(),
            None => {
                let p = gradient_paint(wash.stops(), key.w, key.h)?;
                self.washes.insert(key, p.clone());
                p
            }
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            rect.width(),
            rect.height(),
        ));
        Ok(())
    }

    fn paint_caption(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        region: &TextRegion,
        layout: &LayoutResult,
        style: &StyleConfiguration,
    ) {
        let font = FontKey::new(style.font_family.as_str(), style.font_weight);
        let fill = brush(style.text_color.rgba8());
        let stroke = style.stroke().filter(|s| s.width > 0.0);

        let rect = region.rect;
        let advance = f64::from(layout.line_advance());
        let slack = (region.max_height() - f64::from(layout.block_height())).max(0.0);
        let start_y = rect.y0 + region.v_padding + slack / 2.0;
        let anchor_x = match style.text_align {
            TextAlign::Start => rect.x0 + region.h_padding,
            TextAlign::End => rect.x1 - region.h_padding,
            TextAlign::Center => rect.x0 + rect.width() / 2.0,
        };

        for (i, line) in layout.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let shaped = self
                .shaper
                .layout_line(line, &font, layout.font_size, fill);
            let width = f64::from(shaped.width());
            let x = match style.text_align {
                TextAlign::Start => anchor_x,
                TextAlign::End => anchor_x - width,
                TextAlign::Center => anchor_x - width / 2.0,
            };
            let y = start_y + i as f64 * advance;
            paint_layout(ctx, &mut self.glyph_fonts, &shaped, x, y, stroke);
        }
    }

    fn image_paint(&mut self, image: &PreparedImage) -> CarouselResult<vello_cpu::Image> {
        if let Some((pixels, paint)) = &self.last_image
            && Arc::ptr_eq(pixels, &image.rgba8_premul)
        {
            return Ok(paint.clone());
        }
        let pixmap = crate::render::gradient::premul_bytes_to_pixmap(
            image.rgba8_premul.as_slice(),
            image.width,
            image.height,
        )?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.last_image = Some((Arc::clone(&image.rgba8_premul), paint.clone()));
        Ok(paint)
    }
}

/// Paint every glyph run of `layout` with its top-left corner at `(x, y)`.
///
/// Positioned glyphs already carry the run offset and the line baseline. When `stroke` is set
/// the outline is painted first and the fill on top of it.
fn paint_layout(
    ctx: &mut vello_cpu::RenderContext,
    glyph_fonts: &mut HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    layout: &parley::Layout<TextBrushRgba8>,
    x: f64,
    y: f64,
    stroke: Option<TextStroke>,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let face = run.run().font();
            let font = glyph_fonts
                .entry((face.data.id(), face.index))
                .or_insert_with(|| {
                    vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(face.data.data().to_vec()),
                        face.index,
                    )
                })
                .clone();
            let font_size = run.run().font_size();
            let glyphs = || {
                run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
            };

            if let Some(s) = stroke {
                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(f64::from(s.width))
                        .with_join(vello_cpu::kurbo::Join::Round)
                        .with_miter_limit(STROKE_MITER_LIMIT),
                );
                ctx.set_paint(color_to_cpu(s.color));
                ctx.glyph_run(&font)
                    .font_size(font_size)
                    .stroke_glyphs(glyphs());
            }

            let b = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
            ctx.glyph_run(&font).font_size(font_size).fill_glyphs(glyphs());
        }
    }
}

fn brush(c: Rgba8) -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composer.rs"]
mod tests;
