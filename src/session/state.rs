use std::collections::HashMap;

use crate::assets::store::ImageCache;
use crate::encode::archive::SlideArchive;
use crate::encode::jpeg::DEFAULT_QUALITY;
use crate::foundation::core::{Aspect, SlideId};
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::render::composer::Composer;
use crate::render::preview::PreviewTarget;
use crate::render::surface::{FrameRGBA, RenderTarget};
use crate::session::gestures::move_item;
use crate::session::intake::{IntakeReport, Slide, Upload, capacity_notice, split_at_capacity};
use crate::style::config::{StyleConfiguration, StylePatch};
use crate::style::preset::{StylePreset, base_preset};

/// Caption seeded on the first slide of a fresh carousel.
pub const PLACEHOLDER_CAPTION: &str = "Tell the story of this frame: name the insight, add the benefit and finish with a call to action.";
/// File name of the batch export.
pub const ARCHIVE_NAME: &str = "carousel.zip";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Editing session: the ordered slides, their captions, the shared style and the engine.
pub struct CarouselSession {
    slides: Vec<Slide>,
    captions: HashMap<SlideId, String>,
    active: Option<SlideId>,
    aspect: Aspect,
    style: StyleConfiguration,
    images: ImageCache,
    composer: Composer,
    preview: PreviewTarget,
    next_id: u64,
    notice: Option<String>,
}

impl Default for CarouselSession {
    fn default() -> Self {
        Self::new(Composer::default())
    }
}

impl CarouselSession {
    pub fn new(composer: Composer) -> Self {
        Self {
            slides: Vec::new(),
            captions: HashMap::new(),
            active: None,
            aspect: Aspect::default(),
            style: base_preset().options,
            images: ImageCache::new(),
            composer,
            preview: PreviewTarget::new(),
            next_id: 1,
            notice: None,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id() == id)
    }

    pub fn active(&self) -> Option<SlideId> {
        self.active
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn style(&self) -> &StyleConfiguration {
        &self.style
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn caption(&self, id: SlideId) -> &str {
        self.captions.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn decoded_images(&self) -> usize {
        self.images.len()
    }

    /// Append uploads in order, up to the slide cap; the last accepted one becomes active.
    #[tracing::instrument(skip_all, fields(existing = self.slides.len()))]
    pub fn add_slides(&mut self, uploads: impl IntoIterator<Item = Upload>) -> IntakeReport {
        let uploads: Vec<Upload> = uploads.into_iter().collect();
        if uploads.is_empty() {
            return IntakeReport::default();
        }

        let fresh = self.slides.is_empty() && self.captions.is_empty();
        let (fit, overflow) = split_at_capacity(self.slides.len(), uploads);

        let mut accepted = Vec::with_capacity(fit.len());
        for (i, upload) in fit.into_iter().enumerate() {
            let id = SlideId(self.next_id);
            self.next_id += 1;
            let caption = if fresh && i == 0 {
                PLACEHOLDER_CAPTION
            } else {
                ""
            };
            self.captions.insert(id, caption.to_owned());
            self.slides.push(Slide::new(id, upload));
            accepted.push(id);
        }
        if let Some(last) = accepted.last() {
            self.active = Some(*last);
        }

        let dropped: Vec<String> = overflow.into_iter().map(|u| u.name).collect();
        let notice = capacity_notice(&dropped);
        if let Some(msg) = &notice {
            tracing::warn!(dropped = dropped.len(), "{msg}");
            self.notice = Some(msg.clone());
        }
        tracing::info!(accepted = accepted.len(), total = self.slides.len(), "slides added");

        IntakeReport {
            accepted,
            dropped,
            notice,
        }
    }

    /// Remove a slide and release its decoded image. Returns `false` for an unknown id.
    pub fn remove_slide(&mut self, id: SlideId) -> bool {
        let Some(pos) = self.slides.iter().position(|s| s.id() == id) else {
            return false;
        };
        self.slides.remove(pos);
        self.captions.remove(&id);
        self.images.release(id);
        if self.active == Some(id) {
            self.active = self.slides.first().map(Slide::id);
        }
        tracing::debug!(slide = %id, remaining = self.slides.len(), "slide removed");
        true
    }

    /// Move the slide at `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> CarouselResult<()> {
        if from == to {
            return Ok(());
        }
        move_item(&mut self.slides, from, to)
    }

    /// Make `id` the active slide.
    pub fn select(&mut self, id: SlideId) -> CarouselResult<()> {
        if self.slide(id).is_none() {
            return Err(CarouselError::validation(format!("unknown {id}")));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Set the caption of the active slide. Returns `false` when no slide is active.
    pub fn set_caption(&mut self, text: impl Into<String>) -> bool {
        match self.active {
            Some(id) => self.set_caption_for(id, text),
            None => false,
        }
    }

    pub fn set_caption_for(&mut self, id: SlideId, text: impl Into<String>) -> bool {
        if self.slide(id).is_none() {
            return false;
        }
        self.captions.insert(id, text.into());
        true
    }

    /// Replace the style; rejected styles leave the current one untouched.
    pub fn set_style(&mut self, style: StyleConfiguration) -> CarouselResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Apply a field patch; rejected results leave the current style untouched.
    pub fn patch_style(&mut self, patch: &StylePatch) -> CarouselResult<()> {
        self.set_style(self.style.patched(patch))
    }

    pub fn apply_preset(&mut self, preset: &StylePreset) -> CarouselResult<()> {
        tracing::debug!(preset = %preset.id, "applying style preset");
        self.set_style(preset.options.clone())
    }

    pub fn set_aspect(&mut self, aspect: Aspect) {
        self.aspect = aspect;
    }

    /// Render the active slide (or the placeholder) into the preview.
    ///
    /// Returns `Ok(false)` when a newer preview was requested while this one rendered.
    #[tracing::instrument(skip(self))]
    pub fn render_preview(&mut self) -> CarouselResult<bool> {
        let token = self.preview.begin();
        let mut target = RenderTarget::for_aspect(self.aspect)?;
        let active = self.active.and_then(|id| self.slide(id)).cloned();
        match active {
            Some(slide) => {
                let image = self.images.get_or_decode(slide.id(), slide.bytes())?;
                let caption = self.caption(slide.id()).to_owned();
                self.composer
                    .render(&mut target, Some(&image), &caption, &self.style)?;
            }
            None => {
                self.composer.render(&mut target, None, "", &self.style)?;
            }
        }
        Ok(self.preview.complete(token, target.readback()))
    }

    pub fn preview_frame(&self) -> Option<&FrameRGBA> {
        self.preview.frame()
    }

    /// Export the active slide as JPEG. `Ok(None)` when no slide is active.
    #[tracing::instrument(skip(self))]
    pub fn export_current(&mut self, quality: Option<f32>) -> CarouselResult<Option<ExportedFile>> {
        let Some(slide) = self.active.and_then(|id| self.slide(id)).cloned() else {
            return Ok(None);
        };
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        let result = self.export_slide(&slide, quality).map(|bytes| ExportedFile {
            file_name: slide.export_name(),
            bytes,
        });
        self.record_export(result, "Slide saved").map(Some)
    }

    /// Export every slide, in order, into one stored zip. `Ok(None)` when there are no slides.
    ///
    /// The first failing slide aborts the whole batch; no partial archive is produced.
    #[tracing::instrument(skip(self), fields(slides = self.slides.len()))]
    pub fn export_all(&mut self, quality: Option<f32>) -> CarouselResult<Option<ExportedFile>> {
        if self.slides.is_empty() {
            return Ok(None);
        }
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        let result = self.export_archive(quality).map(|bytes| ExportedFile {
            file_name: ARCHIVE_NAME.to_owned(),
            bytes,
        });
        let saved = format!("All slides saved to {ARCHIVE_NAME}");
        self.record_export(result, &saved).map(Some)
    }

    fn export_archive(&mut self, quality: f32) -> CarouselResult<Vec<u8>> {
        let mut zip = SlideArchive::new();
        let slides = self.slides.clone();
        for (i, slide) in slides.iter().enumerate() {
            let jpeg = self.export_slide(slide, quality)?;
            zip.add(&format!("slide_{:02}.jpg", i + 1), &jpeg)?;
        }
        zip.finish()
    }

    fn export_slide(&mut self, slide: &Slide, quality: f32) -> CarouselResult<Vec<u8>> {
        let image = self
            .images
            .get_or_decode(slide.id(), slide.bytes())
            .map_err(|e| name_slide(e, slide.name()))?;
        let caption = self.caption(slide.id()).to_owned();
        self.composer
            .export(self.aspect, &image, &caption, &self.style, quality)
    }

    fn record_export(
        &mut self,
        result: CarouselResult<ExportedFile>,
        saved: &str,
    ) -> CarouselResult<ExportedFile> {
        match &result {
            Ok(file) => {
                tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "export finished");
                self.notice = Some(saved.to_owned());
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.notice = Some(e.to_string());
            }
        }
        result
    }
}

impl Drop for CarouselSession {
    fn drop(&mut self) {
        let released = self
            .slides
            .iter()
            .filter(|s| self.images.release(s.id()))
            .count();
        tracing::debug!(released, "session closed");
    }
}

fn name_slide(err: CarouselError, name: &str) -> CarouselError {
    match err {
        CarouselError::Decode(msg) => CarouselError::decode(format!("slide '{name}': {msg}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
