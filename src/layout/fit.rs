/// Font size decrement between shrink-to-fit attempts, in pixels.
pub const FONT_SIZE_STEP: f32 = 2.0;

/// Measures the advance width of a single line of text.
///
/// Implementations are bound to one font family/weight; only the size varies per call.
pub trait TextMeasure {
    /// Width in pixels of `text` set at `font_size` pixels.
    fn measure(&mut self, text: &str, font_size: f32) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str, f32) -> f32,
{
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}

/// Bounds for [`shrink_to_fit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub max_width: f32,
    pub max_height: f32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub line_height: f32,
}

/// Wrapped caption lines and the size they were wrapped at.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
}

impl LayoutResult {
    pub fn line_advance(&self) -> f32 {
        self.font_size * self.line_height
    }

    pub fn block_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_advance()
    }
}

/// Greedy word wrap of `text` at one font size.
///
/// Explicit line breaks start new paragraphs. Within a paragraph words are appended while the
/// measured line stays within `max_width`; a word that overflows starts the next line. A word
/// wider than `max_width` on its own is placed alone, unsplit. A paragraph without words yields
/// one empty line.
pub fn wrap_lines(
    text: &str,
    max_width: f32,
    font_size: f32,
    measure: &mut impl TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut has_words = false;
        for word in paragraph.split_whitespace() {
            has_words = true;
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.measure(&candidate, font_size) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            } else {
                current = candidate;
            }
        }
        if has_words {
            lines.push(current);
        } else {
            lines.push(String::new());
        }
    }
    lines
}

/// Find the largest font size in `[min_font_size, max_font_size]` whose wrapped block fits.
///
/// Starts at `max_font_size` and steps down by [`FONT_SIZE_STEP`], never below the minimum. At
/// the minimum the layout is accepted unconditionally, even if it overflows. Returns `None` for a
/// blank caption, or when a font bound or the line height is not a positive finite number.
pub fn shrink_to_fit(
    text: &str,
    params: FitParams,
    measure: &mut impl TextMeasure,
) -> Option<LayoutResult> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(params.min_font_size) || !usable(params.max_font_size) || !usable(params.line_height)
    {
        tracing::warn!(?params, "unusable text fit bounds");
        return None;
    }

    let min = params.min_font_size.min(params.max_font_size);
    let mut font_size = params.max_font_size;
    loop {
        let lines = wrap_lines(text, params.max_width, font_size, measure);
        let block_height = lines.len() as f32 * font_size * params.line_height;
        if block_height <= params.max_height || font_size <= min {
            return Some(LayoutResult {
                lines,
                font_size,
                line_height: params.line_height,
            });
        }
        let next = (font_size - FONT_SIZE_STEP).max(min);
        // Sizes too large for the step to register in f32 fall straight to the minimum.
        font_size = if next < font_size { next } else { min };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
