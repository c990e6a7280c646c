use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use crate::layout::fit::TextMeasure;
use crate::text::fonts::{FontGate, FontKey, font_stack};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Stateful helper for measuring and shaping single caption lines with Parley.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    gate: Arc<FontGate>,
    registered: HashSet<FontKey>,
}

impl TextShaper {
    pub fn new(gate: Arc<FontGate>) -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            gate,
            registered: HashSet::new(),
        }
    }

    /// Wait for `font` to be ready and make its faces visible to layout.
    ///
    /// Subsequent calls for the same key are no-ops.
    pub fn prepare(&mut self, font: &FontKey) {
        if self.registered.contains(font) {
            return;
        }
        let faces = self.gate.ensure_ready(&font.family, font.weight);
        for blob in &faces.blobs {
            let families = self.font_ctx.collection.register_fonts(blob.clone(), None);
            if families.is_empty() {
                tracing::warn!(font = %font, "font data contained no usable faces");
            }
        }
        self.registered.insert(font.clone());
    }

    /// Shape `text` as one unwrapped line.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &FontKey,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        self.prepare(font);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font_stack(&font.family))),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(font.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Advance width of `text` on one line.
    pub fn line_width(&mut self, text: &str, font: &FontKey, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, font, size_px, TextBrushRgba8::default())
            .width()
    }

    pub fn measurer<'a>(&'a mut self, font: &'a FontKey) -> LineMeasure<'a> {
        LineMeasure { shaper: self, font }
    }
}

/// [`TextMeasure`] over a [`TextShaper`] at a fixed family/weight.
pub struct LineMeasure<'a> {
    shaper: &'a mut TextShaper,
    font: &'a FontKey,
}

impl TextMeasure for LineMeasure<'_> {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        self.shaper.line_width(text, self.font, font_size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
